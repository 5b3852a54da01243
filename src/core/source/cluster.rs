//! Kubernetes Secret source.
//!
//! Reads a Secret with `kubectl get secret -o json` and base64-decodes its
//! `data` values. Names are validated before kubectl is invoked.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroize;

use super::DataSource;
use crate::core::constants;
use crate::core::domain::SecretSet;
use crate::core::runner::CommandRunner;
use crate::core::validation::{validate_namespace, validate_secret_name};
use crate::error::{Result, SourceError};

#[derive(Deserialize)]
struct SecretObject {
    #[serde(default)]
    data: BTreeMap<String, String>,
}

// Base64 is an encoding, not protection.
impl Zeroize for SecretObject {
    fn zeroize(&mut self) {
        self.data.values_mut().for_each(|value| value.zeroize());
    }
}

impl Drop for SecretObject {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Reads one Secret from the current kubeconfig context.
#[derive(Debug, Clone)]
pub struct ClusterSecretSource<R> {
    runner: R,
    program: String,
    context: Option<String>,
    namespace: String,
    name: String,
}

impl<R: CommandRunner> ClusterSecretSource<R> {
    /// Source for `namespace/name`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidDnsName` if either name is not a valid
    /// Kubernetes object name.
    pub fn new(runner: R, namespace: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let name = name.into();
        validate_namespace(&namespace)?;
        validate_secret_name(&name)?;

        Ok(Self {
            runner,
            program: constants::KUBECTL_PROGRAM.to_string(),
            context: None,
            namespace,
            name,
        })
    }

    /// Use a different `kubectl` binary.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Read from a specific kubeconfig context.
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            "get".to_string(),
            "secret".to_string(),
            self.name.clone(),
            "--namespace".to_string(),
            self.namespace.clone(),
        ];
        if let Some(context) = &self.context {
            args.push("--context".to_string());
            args.push(context.clone());
        }
        args.push("--output".to_string());
        args.push("json".to_string());
        args
    }
}

impl<R: CommandRunner> DataSource for ClusterSecretSource<R> {
    fn describe(&self) -> String {
        format!("secret {}/{}", self.namespace, self.name)
    }

    fn fetch_secrets(&self) -> Result<SecretSet> {
        let mut out = self
            .runner
            .run(&self.program, &self.args(), None)
            .map_err(|source| SourceError::Cluster {
                namespace: self.namespace.clone(),
                name: self.name.clone(),
                source,
            })?;

        let parsed: std::result::Result<SecretObject, _> = serde_json::from_slice(&out);
        out.zeroize();
        let object = parsed.map_err(|source| SourceError::Decode {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            source,
        })?;

        debug!(secret = %self.describe(), keys = object.data.len(), "read cluster secret");

        let mut set = SecretSet::new();
        for (key, encoded) in &object.data {
            let decoded = decode_value(key, encoded)?;
            set.insert(key.as_str(), decoded)?;
        }

        if set.is_empty() {
            return Err(SourceError::Empty(self.describe()).into());
        }
        Ok(set)
    }
}

fn decode_value(key: &str, encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|_| SourceError::InvalidBase64(key.to_string()))?;
    String::from_utf8(bytes).map_err(|err| {
        let mut bytes = err.into_bytes();
        bytes.zeroize();
        SourceError::NotUtf8(key.to_string()).into()
    })
}
