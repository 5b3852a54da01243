//! Restoration templates.
//!
//! A [`Template`] turns a [`SecretReference`] into a file whose values are
//! `{{op://<vault>/<item>/<field>}}` tokens, for `op inject` to resolve later.
//!
//! - **env**: `KEY={{op://...}}` lines with a header naming the source item
//! - **manifest**: a Kubernetes `Secret` with the tokens under `data`

mod env;
mod manifest;

pub use manifest::ManifestMeta;

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::domain::SecretReference;
use crate::error::{RenderError, Result};

/// Output format and its format-specific inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKind {
    /// Env-style file; `restore_to` is where `op inject` should write plaintext.
    Env { restore_to: PathBuf },
    /// Kubernetes Secret manifest.
    Manifest(ManifestMeta),
}

/// A template file to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    path: PathBuf,
    kind: TemplateKind,
}

impl Template {
    pub fn new(path: impl Into<PathBuf>, kind: TemplateKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &TemplateKind {
        &self.kind
    }

    /// Rendered file contents.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Serialize` if a manifest cannot be encoded.
    pub fn contents(&self, reference: &SecretReference) -> Result<String> {
        match &self.kind {
            TemplateKind::Env { restore_to } => Ok(env::render(reference, &self.path, restore_to)),
            TemplateKind::Manifest(meta) => manifest::render(reference, meta),
        }
    }

    /// Render and write the template.
    ///
    /// An existing file is left untouched unless `overwrite` is set.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::TargetExists` if the file exists and `overwrite`
    /// is false, or `RenderError::Write` if it cannot be written.
    pub fn render(&self, reference: &SecretReference, overwrite: bool) -> Result<()> {
        let contents = self.contents(reference)?;

        if !overwrite && self.path.exists() {
            return Err(RenderError::TargetExists(self.path.clone()).into());
        }

        debug!(path = %self.path.display(), fields = reference.field_labels().len(), "writing template");
        write_file(&self.path, contents.as_bytes(), overwrite)
    }
}

fn write_file(path: &Path, contents: &[u8], overwrite: bool) -> Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        // Also catches a file created after the existence probe.
        options.create_new(true);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let write_err = |source: std::io::Error| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = options.open(path).map_err(|source: std::io::Error| {
        if source.kind() == std::io::ErrorKind::AlreadyExists {
            RenderError::TargetExists(path.to_path_buf())
        } else {
            write_err(source)
        }
    })?;
    file.write_all(contents).map_err(write_err)?;
    file.flush().map_err(write_err)?;

    // Ensure private permissions even when replacing an existing file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .map_err(write_err)?;
    }

    Ok(())
}
