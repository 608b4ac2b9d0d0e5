// Clip interactor - Orchestrates the extract, select, submit flow

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use crate::app::range_selector::RangeSelector;
use crate::app::task_controller::{TaskController, TaskPhase};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;
use crate::utils::time::format_file_size;

/// Video currently bound to the range selector
struct LoadedVideo {
    url: String,
    info: VideoInfo,
}

/// Interactor for the clip use case
pub struct ClipInteractor {
    api: Arc<dyn ClipApiPort>,
    controller: TaskController,
    selector: Mutex<RangeSelector>,
    video: Mutex<Option<LoadedVideo>>,
}

impl ClipInteractor {
    /// Create new clip interactor with injected ports
    pub fn new(api: Arc<dyn ClipApiPort>, controller: TaskController, min_clip_seconds: u64) -> Self {
        Self {
            api,
            controller,
            selector: Mutex::new(RangeSelector::new(min_clip_seconds)),
            video: Mutex::new(None),
        }
    }

    fn selector(&self) -> MutexGuard<'_, RangeSelector> {
        self.selector.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn loaded(&self) -> MutexGuard<'_, Option<LoadedVideo>> {
        self.video.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up a video and bind the range selector to its duration.
    ///
    /// Any job still running for a previous video is cancelled first.
    pub async fn extract(&self, raw_url: &str) -> Result<VideoInfo, DomainError> {
        let url = UrlValidator::validate(raw_url)?;

        self.controller.cancel();
        *self.loaded() = None;

        info!(%url, "Extracting video info");
        let info = self.api.extract_info(url.as_str()).await?;
        info!(
            title = %info.title,
            duration = info.duration,
            formats = info.formats.len(),
            "Video info extracted"
        );

        self.selector().initialize(info.duration);
        *self.loaded() = Some(LoadedVideo {
            url: url.to_string(),
            info: info.clone(),
        });
        Ok(info)
    }

    pub fn video(&self) -> Option<VideoInfo> {
        self.loaded().as_ref().map(|video| video.info.clone())
    }

    /// Set both pickers at once and return the corrected interval
    pub fn select_range(&self, start: TimeSelection, end: TimeSelection) -> ClipInterval {
        let mut selector = self.selector();
        selector.set_start(start);
        selector.set_end(end)
    }

    pub fn edit(&self, endpoint: Endpoint, field: TimeField, value: u32) -> ClipInterval {
        self.selector().edit(endpoint, field, value)
    }

    pub fn current_interval(&self) -> ClipInterval {
        self.selector().current_interval()
    }

    /// Current pickers as `(start, end)`
    pub fn selection(&self) -> (TimeSelection, TimeSelection) {
        let selector = self.selector();
        (selector.start(), selector.end())
    }

    pub fn segment_label(&self) -> String {
        self.selector().segment_label()
    }

    pub fn length_label(&self) -> String {
        self.selector().length_label()
    }

    /// Submit the selected range of the extracted video
    pub async fn download(&self, quality: Option<&str>) -> Result<TaskId, DomainError> {
        let (url, quality, estimate) = {
            let loaded = self.loaded();
            let video = loaded.as_ref().ok_or_else(|| {
                DomainError::BadArgs("Extract video info before downloading".to_string())
            })?;
            let quality = QualitySelector::select(&video.info, quality)?;
            let interval = self.current_interval();
            let estimate = video
                .info
                .find_format(&quality)
                .and_then(|format| format.estimated_clip_size(video.info.duration, &interval));
            (video.url.clone(), quality, estimate)
        };

        let interval = self.current_interval();
        match estimate {
            Some(bytes) => info!(%interval, %quality, estimate = %format_file_size(bytes), "Requesting clip"),
            None => info!(%interval, %quality, "Requesting clip"),
        }

        self.controller.submit(&url, interval, &quality).await
    }

    pub fn cancel(&self) {
        self.controller.cancel();
    }

    pub fn is_downloading(&self) -> bool {
        self.controller.is_downloading()
    }

    pub fn phase(&self) -> TaskPhase {
        self.controller.phase()
    }

    /// Wait for the active job to settle
    pub async fn wait(&self) -> TaskPhase {
        self.controller.wait().await
    }

    /// Save a finished clip locally
    pub async fn save(&self, download_url: &str, destination: &Path) -> Result<u64, DomainError> {
        let bytes = self.api.fetch_file(download_url, destination).await?;
        info!(path = %destination.display(), size = %format_file_size(bytes), "Clip saved");
        Ok(bytes)
    }
}
