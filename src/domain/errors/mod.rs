// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Clip interval is empty or inverted
    InvalidTimeRange(String),
    /// Video URL is not one the service accepts
    InvalidUrl(String),
    /// The clip service declined the request
    Rejected(String),
    /// Network failure talking to the clip service
    Transport(String),
    /// Response could not be understood
    Protocol(String),
    /// Configuration is missing or malformed
    Config(String),
    /// Local file system failure
    Io(String),
    /// The operation was cancelled or superseded before it finished
    Cancelled(String),
}

impl DomainError {
    /// Message suitable for showing to the user as-is
    pub fn user_message(&self) -> &str {
        match self {
            DomainError::BadArgs(msg)
            | DomainError::InvalidTimeRange(msg)
            | DomainError::InvalidUrl(msg)
            | DomainError::Rejected(msg)
            | DomainError::Transport(msg)
            | DomainError::Protocol(msg)
            | DomainError::Config(msg)
            | DomainError::Io(msg)
            | DomainError::Cancelled(msg) => msg,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::InvalidTimeRange(msg) => write!(f, "Invalid time range: {}", msg),
            DomainError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            DomainError::Rejected(msg) => write!(f, "Request rejected: {}", msg),
            DomainError::Transport(msg) => write!(f, "Network error: {}", msg),
            DomainError::Protocol(msg) => write!(f, "Unexpected response: {}", msg),
            DomainError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::Io(msg) => write!(f, "I/O error: {}", msg),
            DomainError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
