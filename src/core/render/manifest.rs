//! Kubernetes Secret manifest templates.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::core::constants::MANIFEST_API_VERSION;
use crate::core::domain::SecretReference;
use crate::error::{RenderError, Result};

/// Caller-supplied identity of the rendered Secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestMeta {
    pub name: String,
    pub namespace: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata<'a>,
    #[serde(rename = "type")]
    secret_type: &'static str,
    data: Mapping,
}

#[derive(Serialize)]
struct Metadata<'a> {
    name: &'a str,
    namespace: &'a str,
}

/// Render a `kind: Secret` manifest whose `data` values are reference tokens.
///
/// # Errors
///
/// Returns `RenderError::Serialize` if YAML encoding fails.
pub fn render(reference: &SecretReference, meta: &ManifestMeta) -> Result<String> {
    // Mapping keeps insertion order, so data follows the label order.
    let data: Mapping = reference
        .fields()
        .map(|f| (Value::from(f.label), Value::from(f.token)))
        .collect();

    let manifest = Manifest {
        api_version: MANIFEST_API_VERSION,
        kind: "Secret",
        metadata: Metadata {
            name: &meta.name,
            namespace: &meta.namespace,
        },
        secret_type: "Opaque",
        data,
    };

    serde_yaml::to_string(&manifest).map_err(|e| RenderError::Serialize(e).into())
}
