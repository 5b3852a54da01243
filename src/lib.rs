//! opsync - mirror plaintext secrets into 1Password.
//!
//! Reads secrets from a `.env` file or a Kubernetes Secret, creates or updates
//! a 1Password item holding them, and writes a template whose values are
//! `{{op://vault/item/field}}` references instead of plaintext.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── push          # Source → vault → template
//! │   ├── accounts      # List signed-in accounts
//! │   ├── vaults        # List vaults
//! │   ├── items         # List items
//! │   ├── session       # Config, client, and scope selection
//! │   ├── prompt        # Interactive selection and confirmation
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .opsync.toml management
//!     ├── runner        # External program execution
//!     ├── vault/        # op argument building and JSON decoding
//!     ├── resolver      # Exact-name item lookup
//!     ├── reconcile     # Create-or-update decision
//!     ├── render/       # env and manifest templates
//!     └── source/       # .env file and cluster Secret readers
//! ```
//!
//! # Example
//!
//! ```no_run
//! use opsync::{ProcessRunner, Reconciler, SecretSet, Template, TemplateKind, VaultClient, VaultScope};
//!
//! # fn main() -> opsync::error::Result<()> {
//! let client = VaultClient::new(ProcessRunner);
//! let scope = VaultScope::new(Some("acme.1password.com".into()), Some("Infra".into()));
//!
//! let fields = SecretSet::from_pairs([("DATABASE_URL", "postgres://...")])?;
//! let reference = Reconciler::new(&client, &scope).reconcile("prod-db", fields, false)?;
//!
//! Template::new(".env.tpl", TemplateKind::Env { restore_to: ".env".into() })
//!     .render(&reference, false)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::domain::{
    reference_token, Account, Field, FieldReference, ItemMatch, SecretReference, SecretSet,
    VaultInfo,
};
pub use crate::core::reconcile::Reconciler;
pub use crate::core::render::{ManifestMeta, Template, TemplateKind};
pub use crate::core::resolver::ItemResolver;
pub use crate::core::runner::{CommandRunner, ProcessRunner};
pub use crate::core::source::{ClusterSecretSource, DataSource, EnvFileSource, Source};
pub use crate::core::vault::{build_args, ItemPayload, Operation, VaultClient, VaultScope};
