//! Command implementations

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::app::container::AppContainer;
use crate::app::download_warning::LEAVE_WARNING;
use crate::app::TaskPhase;
use crate::cli::args::{ClipArgs, InfoArgs};
use crate::domain::model::{TimeSelection, VideoInfo};
use crate::error::ClipXError;
use crate::ports::TaskObserver;
use crate::utils::time::{format_clock, format_file_size};

/// Task observer printing job progress on the terminal
#[derive(Default)]
pub struct ConsoleObserver {
    progress_shown: AtomicBool,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn end_progress_line(&self) {
        if self.progress_shown.swap(false, Ordering::SeqCst) {
            eprintln!();
        }
    }
}

impl TaskObserver for ConsoleObserver {
    fn on_progress(&self, percent: u8) {
        self.progress_shown.store(true, Ordering::SeqCst);
        eprint!("\rProcessing... {:>3}%", percent);
    }

    fn on_completed(&self, download_url: &str) {
        self.end_progress_line();
        println!("Clip ready: {}", download_url);
    }

    fn on_failed(&self, message: &str) {
        self.end_progress_line();
        eprintln!("Download failed: {}", message);
    }
}

/// Execute the info command
pub async fn info(container: &dyn AppContainer, args: InfoArgs) -> Result<()> {
    info!("Starting info operation");

    let interactor = container.clip_interactor();
    let video = interactor
        .extract(&args.url)
        .await
        .map_err(ClipXError::from)
        .context("Failed to fetch video info")?;

    if args.json {
        let json = serde_json::to_string_pretty(&video)
            .map_err(ClipXError::from)
            .context("Failed to serialize video info to JSON")?;
        println!("{}", json);
    } else {
        display_video_info(&video);
    }

    info!("Info operation completed successfully");
    Ok(())
}

/// Execute the clip command
pub async fn clip(container: &dyn AppContainer, args: ClipArgs) -> Result<()> {
    info!("Starting clip operation");

    let start = parse_time(&args.start)?;
    let end = args.end.as_deref().map(parse_time).transpose()?;

    let interactor = container.clip_interactor();
    let video = interactor
        .extract(&args.url)
        .await
        .map_err(ClipXError::from)
        .context("Failed to fetch video info")?;
    println!("{} ({})", video.title, format_clock(video.duration));

    let requested_end = end.unwrap_or_else(|| TimeSelection::from_seconds(video.duration));
    interactor.select_range(start, requested_end);
    let (_, corrected_end) = interactor.selection();
    if corrected_end.to_seconds() != requested_end.to_seconds() {
        warn!(requested = %requested_end, corrected = %corrected_end, "End time adjusted");
        println!("End time adjusted to {}", corrected_end);
    }
    println!("{}  {}", interactor.segment_label(), interactor.length_label());

    let task_id = interactor
        .download(args.quality.as_deref())
        .await
        .map_err(ClipXError::from)?;
    info!(task_id = %task_id, "Waiting for clip");

    let phase = tokio::select! {
        phase = interactor.wait() => phase,
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!("Failed to listen for Ctrl-C: {}", e);
            }
            if interactor.is_downloading() {
                let message = container
                    .notifier()
                    .leave_message()
                    .unwrap_or_else(|| LEAVE_WARNING.to_string());
                eprintln!("\n{}", message);
            }
            interactor.cancel();
            return Err(ClipXError::Interrupted.into());
        }
    };

    match phase {
        TaskPhase::Completed { download_url, .. } => {
            if let Some(output) = &args.output {
                let bytes = interactor
                    .save(&download_url, output)
                    .await
                    .map_err(ClipXError::from)
                    .context("Failed to save clip")?;
                println!("Saved {} to {}", format_file_size(bytes), output.display());
            }
            info!("Clip operation completed successfully");
            Ok(())
        }
        TaskPhase::Failed { message, .. } => {
            error!("Clip failed: {}", message);
            Err(ClipXError::ClipFailed { message }.into())
        }
        other => Err(ClipXError::ClipFailed {
            message: format!("Job ended in unexpected state {:?}", other),
        }
        .into()),
    }
}

fn parse_time(raw: &str) -> Result<TimeSelection, ClipXError> {
    TimeSelection::parse(raw).map_err(|_| ClipXError::InvalidTimeFormat {
        time: raw.to_string(),
    })
}

/// Display video information in human-readable format
fn display_video_info(video: &VideoInfo) {
    println!("Video Information");
    println!("=================");
    println!("Title: {}", video.title);
    if let Some(uploader) = &video.uploader {
        println!("Uploader: {}", uploader);
    }
    println!("Duration: {}", format_clock(video.duration));
    if let Some(thumbnail) = &video.thumbnail_url {
        println!("Thumbnail: {}", thumbnail);
    }
    println!();

    if video.formats.is_empty() {
        println!("Qualities: (none listed)");
        return;
    }
    println!("Qualities:");
    for format in &video.formats {
        println!("  {}", format.label());
    }
}
