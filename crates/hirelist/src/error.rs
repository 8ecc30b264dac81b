//! Error types for the hirelist crate.
//!
//! Errors only arise at construction and configuration boundaries. Running
//! the pipeline never fails; malformed records and inactive filters degrade
//! to "nothing matched" instead.

use thiserror::Error;

/// Errors that can occur when building filters, sorts, or view configs.
#[derive(Debug, Error)]
pub enum HirelistError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Comparator name that neither the built-ins nor the registry know.
    #[error("unknown comparator kind '{0}'")]
    UnknownComparator(String),

    /// View configuration could not be parsed as JSON.
    #[error("invalid view config: {0}")]
    Config(#[from] serde_json::Error),

    /// View configuration could not be parsed as YAML.
    #[error("invalid view config: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),
}

/// Result type for hirelist operations.
pub type Result<T> = std::result::Result<T, HirelistError>;
