// Domain models - Core types and data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::utils::time::{format_clock, format_file_size_mb};

/// Seconds in one hour
pub const SECONDS_PER_HOUR: u64 = 3600;

/// Seconds in one minute
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Which end of the clip a selection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// One of the three editable fields of a time selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
    Second,
}

/// An hour/minute/second triple as picked by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimeSelection {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeSelection {
    /// Create a selection from its components without bounds checks
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Decompose a whole number of seconds into hours, minutes and seconds
    pub fn from_seconds(total: u64) -> Self {
        let hour = u32::try_from(total / SECONDS_PER_HOUR).unwrap_or(u32::MAX);
        let minute = ((total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u32;
        let second = (total % SECONDS_PER_MINUTE) as u32;
        Self::new(hour, minute, second)
    }

    /// Total seconds represented by this selection
    pub fn to_seconds(&self) -> u64 {
        self.hour as u64 * SECONDS_PER_HOUR
            + self.minute as u64 * SECONDS_PER_MINUTE
            + self.second as u64
    }

    /// Return a copy with one field replaced
    pub fn with_field(self, field: TimeField, value: u32) -> Self {
        match field {
            TimeField::Hour => Self { hour: value, ..self },
            TimeField::Minute => Self {
                minute: value,
                ..self
            },
            TimeField::Second => Self {
                second: value,
                ..self
            },
        }
    }

    /// Pull every field into its picker range: minutes and seconds into
    /// `[0, 59]`, hours into `[0, max_hour]`.
    pub fn clamp_fields(self, max_hour: u32) -> Self {
        Self {
            hour: self.hour.min(max_hour),
            minute: self.minute.min(59),
            second: self.second.min(59),
        }
    }

    /// Parse `HH:MM:SS`, `MM:SS` or plain seconds
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        if let Ok(seconds) = trimmed.parse::<u64>() {
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let parse_part = |part: &str, name: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| DomainError::BadArgs(format!("Invalid {} in '{}'", name, time_str)))
        };

        let (hour, minute, second) = match parts.as_slice() {
            [m, s] => (0, parse_part(m, "minutes")?, parse_part(s, "seconds")?),
            [h, m, s] => (
                parse_part(h, "hours")?,
                parse_part(m, "minutes")?,
                parse_part(s, "seconds")?,
            ),
            _ => {
                return Err(DomainError::BadArgs(format!(
                    "Invalid time '{}'. Supported formats: seconds, MM:SS, HH:MM:SS",
                    time_str
                )))
            }
        };

        if parts.len() == 3 && minute >= 60 {
            return Err(DomainError::BadArgs("Minutes must be less than 60".to_string()));
        }
        if second >= 60 {
            return Err(DomainError::BadArgs("Seconds must be less than 60".to_string()));
        }

        // MM:SS may carry more than 59 minutes
        Ok(Self::from_seconds(Self::new(hour, minute, second).to_seconds()))
    }
}

impl fmt::Display for TimeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Highest hour a selection may carry for a video of `duration` seconds
pub fn max_hour_for(duration: u64) -> u32 {
    u32::try_from(duration.div_ceil(SECONDS_PER_HOUR)).unwrap_or(u32::MAX)
}

/// A `[start, end)` span of the video in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClipInterval {
    pub start_seconds: u64,
    pub end_seconds: u64,
}

impl ClipInterval {
    pub const fn new(start_seconds: u64, end_seconds: u64) -> Self {
        Self {
            start_seconds,
            end_seconds,
        }
    }

    /// Length of the clip in seconds
    pub fn length(&self) -> u64 {
        self.end_seconds.saturating_sub(self.start_seconds)
    }

    pub fn is_empty(&self) -> bool {
        self.end_seconds <= self.start_seconds
    }

    /// Reject empty or inverted intervals
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::InvalidTimeRange(
                "End time must be greater than start time".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ClipInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_clock(self.start_seconds),
            format_clock(self.end_seconds)
        )
    }
}

/// One downloadable rendition of a video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoFormat {
    pub format_id: Option<String>,
    pub quality: String,
    pub ext: Option<String>,
    pub filesize_bytes: Option<u64>,
}

impl VideoFormat {
    pub fn new(quality: impl Into<String>) -> Self {
        Self {
            format_id: None,
            quality: quality.into(),
            ext: None,
            filesize_bytes: None,
        }
    }

    /// Whether a requested quality names this format, by label or by id
    pub fn matches(&self, requested: &str) -> bool {
        self.quality == requested || self.format_id.as_deref() == Some(requested)
    }

    /// Picker label, e.g. `720p (approx. 12.3 MB)`
    pub fn label(&self) -> String {
        match self.filesize_bytes {
            Some(size) if size > 0 => {
                format!("{} (approx. {})", self.quality, format_file_size_mb(size))
            }
            _ => self.quality.clone(),
        }
    }

    /// Scale the full-video size down to the clip's share of the duration
    pub fn estimated_clip_size(&self, duration: u64, interval: &ClipInterval) -> Option<u64> {
        let full_size = self.filesize_bytes.filter(|size| *size > 0)?;
        if duration == 0 {
            return None;
        }
        Some((full_size as f64 / duration as f64 * interval.length() as f64) as u64)
    }
}

/// Metadata of an extracted video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInfo {
    pub video_id: Option<String>,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub duration: u64,
    pub uploader: Option<String>,
    pub formats: Vec<VideoFormat>,
}

impl VideoInfo {
    /// Find the format a quality string refers to
    pub fn find_format(&self, quality: &str) -> Option<&VideoFormat> {
        self.formats.iter().find(|format| format.matches(quality))
    }
}

/// Server-assigned identifier of a clip job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-side job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// One observation of a job's status
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSnapshot {
    pub task_id: TaskId,
    pub status: TaskStatus,
    /// Percentage in `[0, 100]`
    pub progress: u8,
    pub download_url: Option<String>,
    pub error_message: Option<String>,
    pub file_size: Option<u64>,
}

/// Everything the service needs to start a clip job
#[derive(Debug, Clone, PartialEq)]
pub struct ClipJobRequest {
    pub url: String,
    pub interval: ClipInterval,
    pub quality: String,
}

/// The service's acceptance of a clip job
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedTask {
    pub task_id: TaskId,
    pub estimated_size: Option<u64>,
}

#[cfg(test)]
mod tests;
