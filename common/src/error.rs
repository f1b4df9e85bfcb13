use thiserror::Error;

/// All possible error types that may occur outside of an HTTP exchange with the booking API
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Storage I/O error\n{0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error\n{0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage backend is unavailable. {0}")]
    StorageUnavailable(&'static str),
    #[error("Invalid configuration value for `{key}`: {value}")]
    InvalidConfig { key: &'static str, value: String },
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("Logger initialization failed\n{0}")]
    Logging(String),
    #[error("Generic error\n{0}")]
    Generic(String),
}

/// Generic [Result][std::result::Result] type where the error is always [PortalError]
pub type PortalResult<T> = std::result::Result<T, PortalError>;
