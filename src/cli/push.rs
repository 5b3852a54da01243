//! Push command.
//!
//! Reads plaintext from a source, mirrors it into a 1Password item, and writes
//! a template holding `op://` references in place of the values.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::output;
use crate::cli::session::Session;
use crate::cli::{Format, PushOptions};
use crate::core::constants;
use crate::core::domain::SecretReference;
use crate::core::reconcile::Reconciler;
use crate::core::render::{ManifestMeta, Template, TemplateKind};
use crate::core::runner::ProcessRunner;
use crate::core::source::{ClusterSecretSource, DataSource, EnvFileSource, Source};
use crate::core::validation::{validate_namespace, validate_secret_name};
use crate::error::{Error, ReconcileError, RenderError, Result};

/// Push the contents of an env file.
pub fn env(session: &Session, path: PathBuf, item: String, options: PushOptions) -> Result<()> {
    let format = options.format.unwrap_or(Format::Env);
    let template = env_template(&path, &item, format, &options)?;
    let source: Source<ProcessRunner> = Source::EnvFile(EnvFileSource::new(path));
    push(session, &source, &item, &template, &options)
}

/// Push the data of a Kubernetes Secret.
pub fn secret(
    session: &Session,
    name: String,
    namespace: String,
    item: Option<String>,
    options: PushOptions,
) -> Result<()> {
    let config = session.config();
    let cluster = ClusterSecretSource::new(ProcessRunner, namespace.as_str(), name.as_str())?
        .with_program(config.kubectl_program())
        .with_context(config.kubectl.context.clone());

    let item = item.unwrap_or_else(|| name.clone());
    let format = options.format.unwrap_or(Format::Manifest);
    let template = secret_template(&name, &namespace, format, &options)?;
    push(session, &Source::Cluster(cluster), &item, &template, &options)
}

fn push(
    session: &Session,
    source: &dyn DataSource,
    item: &str,
    template: &Template,
    options: &PushOptions,
) -> Result<()> {
    let force = confirm_replace(session, template.path(), options.force)?;

    let fields = source.fetch_secrets()?;
    let uploaded: Vec<String> = fields.keys().map(str::to_string).collect();
    info!(source = %source.describe(), fields = uploaded.len(), "read secrets");

    let scope = session.vault_scope(options.scope.clone())?;
    let reconciler = Reconciler::new(session.client(), &scope);

    let reference = if options.require_existing {
        reconciler.update_existing(item, fields)?
    } else {
        let retry = (!options.overwrite).then(|| fields.clone());
        match reconciler.reconcile(item, fields, options.overwrite) {
            Err(Error::Reconcile(ReconcileError::AlreadyExists(name))) => {
                let prompt = format!("Item '{}' already exists in 1Password. Update it?", name);
                match retry {
                    Some(fields) if session.prompter().confirm(&prompt)? => {
                        reconciler.reconcile(item, fields, true)?
                    }
                    _ => return Err(ReconcileError::AlreadyExists(name).into()),
                }
            }
            result => result?,
        }
    };

    output::success(&format!(
        "mirrored {} fields from {} to {}",
        uploaded.len(),
        source.describe(),
        output::name(reference.item_name())
    ));
    output::kv("account:", reference.account());
    output::kv("vault:  ", format!("{} ({})", reference.vault_name(), reference.vault_id()));
    output::kv("item:   ", format!("{} ({})", reference.item_name(), reference.item_id()));

    let stale = stale_fields(&reference, &uploaded);
    if !stale.is_empty() {
        output::warn(&format!(
            "item keeps fields not present in the source; they stay in the template: {}",
            stale.join(", ")
        ));
    }

    template.render(&reference, force)?;
    output::success(&format!("wrote {}", output::path(template.path().display())));
    output::hint(&format!("restore with: {}", output::cmd(&restore_command(&reference, template))));

    Ok(())
}

/// Whether an existing template may be replaced; asks when not forced.
fn confirm_replace(session: &Session, path: &Path, force: bool) -> Result<bool> {
    if force || !path.exists() {
        return Ok(force);
    }
    let prompt = format!("{} already exists. Replace it?", path.display());
    if session.prompter().confirm(&prompt)? {
        Ok(true)
    } else {
        Err(RenderError::TargetExists(path.to_path_buf()).into())
    }
}

/// Labels the item still carries that were not part of this upload.
fn stale_fields<'a>(reference: &'a SecretReference, uploaded: &[String]) -> Vec<&'a str> {
    reference
        .field_labels()
        .iter()
        .filter(|label| !uploaded.contains(*label))
        .map(String::as_str)
        .collect()
}

fn env_template(path: &Path, item: &str, format: Format, options: &PushOptions) -> Result<Template> {
    match format {
        Format::Env => {
            let output = options
                .output
                .clone()
                .unwrap_or_else(|| with_suffix(path, constants::ENV_TEMPLATE_EXTENSION));
            Ok(Template::new(
                output,
                TemplateKind::Env {
                    restore_to: path.to_path_buf(),
                },
            ))
        }
        Format::Manifest => {
            let meta = manifest_meta(item, constants::DEFAULT_NAMESPACE, options)?;
            let output = options
                .output
                .clone()
                .unwrap_or_else(|| manifest_path(&meta.name));
            Ok(Template::new(output, TemplateKind::Manifest(meta)))
        }
    }
}

fn secret_template(
    name: &str,
    namespace: &str,
    format: Format,
    options: &PushOptions,
) -> Result<Template> {
    match format {
        Format::Env => {
            let restore_to = PathBuf::from(format!("{}.env", name));
            let output = options
                .output
                .clone()
                .unwrap_or_else(|| with_suffix(&restore_to, constants::ENV_TEMPLATE_EXTENSION));
            Ok(Template::new(output, TemplateKind::Env { restore_to }))
        }
        Format::Manifest => {
            let meta = manifest_meta(name, namespace, options)?;
            let output = options
                .output
                .clone()
                .unwrap_or_else(|| manifest_path(&meta.name));
            Ok(Template::new(output, TemplateKind::Manifest(meta)))
        }
    }
}

fn manifest_meta(name: &str, namespace: &str, options: &PushOptions) -> Result<ManifestMeta> {
    let meta = ManifestMeta {
        name: options.manifest_name.clone().unwrap_or_else(|| name.to_string()),
        namespace: options
            .manifest_namespace
            .clone()
            .unwrap_or_else(|| namespace.to_string()),
    };
    validate_secret_name(&meta.name)?;
    validate_namespace(&meta.namespace)?;
    Ok(meta)
}

fn manifest_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", name, constants::MANIFEST_EXTENSION))
}

/// `path` with `.ext` appended to the full file name (`.env` -> `.env.tpl`).
fn with_suffix(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn restore_command(reference: &SecretReference, template: &Template) -> String {
    match template.kind() {
        TemplateKind::Env { restore_to } => format!(
            "op inject --account {} -i {} -o {}",
            reference.account(),
            template.path().display(),
            restore_to.display()
        ),
        TemplateKind::Manifest(_) => format!(
            "op inject --account {} -i {} | kubectl apply -f -",
            reference.account(),
            template.path().display()
        ),
    }
}
