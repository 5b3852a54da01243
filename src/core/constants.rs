//! Constants used throughout opsync.
//!
//! Centralizes magic strings and configuration values.

/// Default 1Password CLI program name.
pub const OP_PROGRAM: &str = "op";

/// Default Kubernetes CLI program name.
pub const KUBECTL_PROGRAM: &str = "kubectl";

/// Scheme prefix of a vault reference inside a template token.
pub const REFERENCE_SCHEME: &str = "op://";

/// Item category used for every created item.
pub const ITEM_CATEGORY: &str = "LOGIN";

/// Field type used for every mirrored secret field.
pub const FIELD_TYPE_CONCEALED: &str = "CONCEALED";

/// Diagnostic emitted by `op item get` when no item has the requested name.
pub const STDERR_ITEM_NOT_FOUND: &str = "isn't an item";

/// Diagnostic emitted by `op item get` when the name is ambiguous.
pub const STDERR_MORE_THAN_ONE_MATCH: &str = "More than one item matches";

/// Project-local configuration file name.
pub const CONFIG_FILE: &str = ".opsync.toml";

/// Configuration path relative to the user config directory.
pub const USER_CONFIG_FILE: &str = "opsync/config.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "OPSYNC_LOG";

/// Extension appended to env sources for the default template path.
pub const ENV_TEMPLATE_EXTENSION: &str = "tpl";

/// Namespace used when none is given.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Extension of rendered manifests.
pub const MANIFEST_EXTENSION: &str = "yaml";

/// Kubernetes API version of the rendered manifest.
pub const MANIFEST_API_VERSION: &str = "v1";

/// Generic failure.
pub const EXIT_FAILURE: i32 = 1;

/// Item already exists and overwrite was not requested.
pub const EXIT_CONFLICT: i32 = 3;

/// More than one item matches the requested name.
pub const EXIT_AMBIGUOUS: i32 = 4;

/// Item required for a direct update does not exist.
pub const EXIT_NOT_FOUND: i32 = 5;
