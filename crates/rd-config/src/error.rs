use thiserror::Error;

/// Failure to produce a usable [`crate::RdConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider could not be read or a value has the wrong type.
    #[error("failed to load readiness configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A value parsed but cannot be used.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
