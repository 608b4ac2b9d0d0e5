//! Error handling module for ClipX

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for ClipX operations
#[derive(Error, Debug)]
pub enum ClipXError {
    /// A use case failed
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Invalid time given on the command line
    #[error("Invalid time format: {time}. Expected HH:MM:SS, MM:SS, or seconds")]
    InvalidTimeFormat { time: String },

    /// The clip job finished unsuccessfully
    #[error("Clip failed: {message}")]
    ClipFailed { message: String },

    /// The user cancelled while a job was running
    #[error("Download cancelled")]
    Interrupted,

    /// Configuration file error
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClipXError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ClipXError::Domain(DomainError::BadArgs(_))
            | ClipXError::Domain(DomainError::InvalidUrl(_))
            | ClipXError::Domain(DomainError::InvalidTimeRange(_))
            | ClipXError::InvalidTimeFormat { .. } => 2,
            ClipXError::Interrupted | ClipXError::Domain(DomainError::Cancelled(_)) => 130,
            _ => 1,
        }
    }
}

/// Result type alias for ClipX operations
pub type ClipXResult<T> = std::result::Result<T, ClipXError>;
