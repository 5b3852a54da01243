//! Plaintext data sources.
//!
//! Every source implements [`DataSource`]; [`Source`] tags the concrete
//! providers so callers can hold either without boxing.

mod cluster;
mod env_file;

pub use cluster::ClusterSecretSource;
pub use env_file::EnvFileSource;

use crate::core::domain::SecretSet;
use crate::core::runner::CommandRunner;
use crate::error::Result;

/// Produces the plaintext secret set to mirror.
pub trait DataSource {
    /// Human-readable origin, used in messages.
    fn describe(&self) -> String;

    /// Read the secrets.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the source cannot be read or decoded, or is empty.
    fn fetch_secrets(&self) -> Result<SecretSet>;
}

/// One of the supported data sources.
#[derive(Debug)]
pub enum Source<R> {
    EnvFile(EnvFileSource),
    Cluster(ClusterSecretSource<R>),
}

impl<R: CommandRunner> DataSource for Source<R> {
    fn describe(&self) -> String {
        match self {
            Self::EnvFile(s) => s.describe(),
            Self::Cluster(s) => s.describe(),
        }
    }

    fn fetch_secrets(&self) -> Result<SecretSet> {
        match self {
            Self::EnvFile(s) => s.fetch_secrets(),
            Self::Cluster(s) => s.fetch_secrets(),
        }
    }
}
