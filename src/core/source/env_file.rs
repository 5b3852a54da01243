//! `.env` file source.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::DataSource;
use crate::core::domain::{env, SecretSet};
use crate::error::{Result, SourceError};

/// Reads `KEY=value` pairs from a file.
#[derive(Debug, Clone)]
pub struct EnvFileSource {
    path: PathBuf,
}

impl EnvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for EnvFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_secrets(&self) -> Result<SecretSet> {
        let set = env::load(&self.path)?;
        debug!(path = %self.path.display(), entries = set.len(), "loaded env file");

        if set.is_empty() {
            return Err(SourceError::Empty(self.describe()).into());
        }
        Ok(set)
    }
}
