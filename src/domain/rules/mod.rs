// Domain rules - Business logic and policies

use url::Url;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Default shortest clip produced when the end has to be pushed past the start
pub const DEFAULT_MIN_CLIP_SECONDS: u64 = 60;

/// Outcome of deriving a clip interval from the two selections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedRange {
    pub interval: ClipInterval,
    /// Set when the end had to be moved; the end picker must show this value
    pub corrected_end: Option<TimeSelection>,
}

/// Rules turning raw start/end selections into a valid clip interval
pub struct RangePolicy {
    min_clip_seconds: u64,
}

impl Default for RangePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CLIP_SECONDS)
    }
}

impl RangePolicy {
    /// A minimum below one second is raised to one, so a corrected end
    /// always lies after the start unless the video ends first
    pub fn new(min_clip_seconds: u64) -> Self {
        Self {
            min_clip_seconds: min_clip_seconds.max(1),
        }
    }

    pub fn min_clip_seconds(&self) -> u64 {
        self.min_clip_seconds
    }

    /// Clamp both ends to `[0, duration]`; when the end does not lie after
    /// the start, push it to `min(start + min_clip, duration)`.
    ///
    /// The result always satisfies `start <= end <= duration`. It is empty
    /// only when the start sits on the very end of the video.
    pub fn derive(
        &self,
        start: &TimeSelection,
        end: &TimeSelection,
        duration: u64,
    ) -> DerivedRange {
        let start_seconds = start.to_seconds().min(duration);
        let mut end_seconds = end.to_seconds().min(duration);
        let mut corrected_end = None;

        if end_seconds <= start_seconds {
            end_seconds = start_seconds
                .saturating_add(self.min_clip_seconds)
                .min(duration);
            corrected_end = Some(TimeSelection::from_seconds(end_seconds));
        }

        DerivedRange {
            interval: ClipInterval::new(start_seconds, end_seconds),
            corrected_end,
        }
    }
}

/// Hosts the clip service knows how to extract from
const SUPPORTED_HOSTS: &[&str] = &["youtube.com", "youtu.be", "youtube-nocookie.com"];

/// Length of a video id on the supported hosts
const VIDEO_ID_LEN: usize = 11;

/// Business rules for video URLs
pub struct UrlValidator;

impl UrlValidator {
    /// Check the URL points at a supported host and carries a video id.
    /// A missing scheme is tolerated and treated as https.
    pub fn validate(raw: &str) -> Result<Url, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let url = match Url::parse(trimmed) {
            Ok(url) => url,
            Err(_) => Url::parse(&format!("https://{}", trimmed))
                .map_err(|e| DomainError::InvalidUrl(format!("{}: {}", trimmed, e)))?,
        };

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "Unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let host = url.host_str().unwrap_or_default();
        let host = host.strip_prefix("www.").unwrap_or(host);
        if !SUPPORTED_HOSTS.contains(&host) {
            return Err(DomainError::InvalidUrl(format!(
                "Unsupported video host '{}'",
                host
            )));
        }

        match Self::video_id(&url) {
            Some(_) => Ok(url),
            None => Err(DomainError::InvalidUrl(format!(
                "No video id found in '{}'",
                trimmed
            ))),
        }
    }

    /// Extract the video id from `?v=`, `/embed/<id>`, `/v/<id>` or a short link
    pub fn video_id(url: &Url) -> Option<String> {
        let from_query = url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned());

        let candidate = from_query.or_else(|| {
            let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
            match segments.as_slice() {
                ["embed", id, ..] | ["v", id, ..] | ["shorts", id, ..] => Some(id.to_string()),
                [id] if url.host_str().map_or(false, |h| h.ends_with("youtu.be")) => {
                    Some(id.to_string())
                }
                _ => None,
            }
        })?;

        let id: String = candidate.chars().take(VIDEO_ID_LEN).collect();
        let well_formed = id.chars().count() == VIDEO_ID_LEN
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        well_formed.then_some(id)
    }
}

/// Business rules for quality selection
pub struct QualitySelector;

impl QualitySelector {
    /// Pick the requested quality, or the first listed format when none is
    /// given. A video that lists no formats accepts any quality string.
    pub fn select(info: &VideoInfo, requested: Option<&str>) -> Result<String, DomainError> {
        match requested {
            Some(quality) if info.formats.is_empty() => Ok(quality.to_string()),
            Some(quality) => info
                .find_format(quality)
                .map(|format| format.quality.clone())
                .ok_or_else(|| {
                    let available: Vec<&str> =
                        info.formats.iter().map(|f| f.quality.as_str()).collect();
                    DomainError::BadArgs(format!(
                        "Quality '{}' is not available. Choose one of: {}",
                        quality,
                        available.join(", ")
                    ))
                }),
            None => info
                .formats
                .first()
                .map(|format| format.quality.clone())
                .ok_or_else(|| {
                    DomainError::BadArgs("No quality available for this video".to_string())
                }),
        }
    }
}

#[cfg(test)]
mod tests;
