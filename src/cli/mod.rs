//! CLI module for ClipX
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// ClipX - Trim and download video clips through a clip service
///
/// Looks up a video, lets you pick a time range and quality, then submits a
/// clip job to the service and follows it until the clip is ready.
#[derive(Parser, Debug)]
#[command(name = "clipx")]
#[command(about = "ClipX - Trim and download video clips through a clip service")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Clip service base URL
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Configuration file (TOML with a [clipx] table)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, default_value = "compact", global = true)]
    pub log_format: String,

    /// Delay between two job status checks, in milliseconds
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show title, duration and available qualities of a video
    Info(args::InfoArgs),
    /// Cut a segment out of a video and wait for the clip
    Clip(args::ClipArgs),
}
