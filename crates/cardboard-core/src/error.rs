use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read registry file {path}: {source}")]
    RegistryFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("registry file not found: {0}")]
    RegistryFileMissing(String),

    #[error("failed to parse registry file {path}: {source}")]
    RegistryFileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("registry validation failed: {0}")]
    Validation(String),
}
