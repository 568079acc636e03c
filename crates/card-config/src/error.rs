//! Error types for configuration handling

use thiserror::Error;

/// Errors that can occur when working with card configurations
///
/// Migration itself never fails; the only fallible step is parsing a
/// canonical JSON object into the typed configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid card configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
