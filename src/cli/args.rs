//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Video URL
    pub url: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the clip command
#[derive(Args, Debug)]
pub struct ClipArgs {
    /// Video URL
    pub url: String,

    /// Start time (HH:MM:SS, MM:SS, or seconds)
    #[arg(short, long, default_value = "0")]
    pub start: String,

    /// End time (HH:MM:SS, MM:SS, or seconds; default: end of video)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Quality label or format id (default: first listed)
    #[arg(short, long)]
    pub quality: Option<String>,

    /// Save the finished clip to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Shortest clip produced when the end has to be corrected, in seconds
    #[arg(long)]
    pub min_clip: Option<u64>,
}
