// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;
use async_trait::async_trait;

/// Port for the remote clip service
#[async_trait]
pub trait ClipApiPort: Send + Sync {
    /// Fetch title, duration and available formats of a video
    async fn extract_info(&self, url: &str) -> Result<VideoInfo, DomainError>;

    /// Ask the service to start a clip job.
    ///
    /// Returns `DomainError::Rejected` when the service answers but declines,
    /// and `DomainError::Transport` when it could not be reached.
    async fn create_clip_task(&self, request: &ClipJobRequest)
        -> Result<AcceptedTask, DomainError>;

    /// Fetch the current status of a clip job
    async fn task_status(&self, task_id: &TaskId) -> Result<TaskSnapshot, DomainError>;

    /// Save a finished clip to `destination`, returning the bytes written
    async fn fetch_file(&self, download_url: &str, destination: &Path)
        -> Result<u64, DomainError>;
}

/// Receives progress and outcome of the active clip job.
///
/// Callbacks are never made for a job that was cancelled or superseded.
pub trait TaskObserver: Send + Sync {
    fn on_progress(&self, percent: u8);

    fn on_completed(&self, download_url: &str);

    fn on_failed(&self, message: &str);
}

/// Port for user-facing notices
pub trait NotifierPort: Send + Sync {
    /// Show a transient warning notice
    fn notify_warning(&self, message: &str);

    /// Arm the "leaving cancels the download" prompt with `message`, or
    /// disarm it with `None`
    fn set_leave_guard(&self, message: Option<&str>);
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Get configuration value
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Set configuration value
    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Load configuration from file
    async fn load_config(&self, file_path: &str) -> Result<(), DomainError>;

    /// Validate configuration
    async fn validate_config(&self) -> Result<(), DomainError>;

    /// Path of the file the configuration was loaded from, if any
    async fn get_config_file_path(&self) -> Result<Option<String>, DomainError>;
}

/// Log level enumeration
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
