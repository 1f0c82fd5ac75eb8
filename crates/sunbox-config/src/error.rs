use thiserror::Error;

/// Errors related to loading and validating the deployment configuration,
/// including file and environment sources and malformed key material.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Config source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable `{0}` must be set")]
    MissingEnvVar(&'static str),

    #[error("Missing signing key: set `{0}`")]
    MissingSigningKey(String),

    #[error("Invalid signing key: {0}")]
    InvalidKeyMaterial(String),

    #[error("Unknown network profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid value for `{field}`: {reason}")]
    Validation { field: String, reason: String },
}

impl ConfigurationError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigurationError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
