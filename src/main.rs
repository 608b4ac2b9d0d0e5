//! ClipX CLI
//!
//! Trim and download video clips through a clip service.
//!
//! # Usage
//!
//! ```bash
//! clipx info "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
//! clipx clip "https://youtu.be/dQw4w9WgXcQ" --start 00:01:00 --end 00:02:00 --quality 720p
//! clipx --server http://clips.local:8000 clip "https://youtu.be/dQw4w9WgXcQ" -s 90 -o clip.mp4
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use clipx_cli::adapters::TomlConfigAdapter;
use clipx_cli::app::container::DefaultAppContainer;
use clipx_cli::cli::commands::{self, ConsoleObserver};
use clipx_cli::cli::{Cli, Commands};
use clipx_cli::config_initialization::initialize_configuration_hierarchy;
use clipx_cli::error::ClipXError;
use clipx_cli::utils::logging::{LogFormat, LoggingConfig};

/// Main entry point for the ClipX CLI application
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<ClipXError>()
            .map(ClipXError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Resolve configuration before logging so the file's log level applies
    let config = TomlConfigAdapter::new();
    let settings = initialize_configuration_hierarchy(&config, &cli)
        .await
        .map_err(ClipXError::from)
        .context("Failed to load configuration")?;

    LoggingConfig {
        level: settings.log_level.clone(),
        format: LogFormat::parse(&cli.log_format).map_err(ClipXError::from)?,
        target: false,
    }
    .initialize();

    info!("Starting ClipX CLI");
    info!(server = %settings.server_url, config_file = ?settings.config_file, "Configuration loaded");

    let container = DefaultAppContainer::new(&settings, Arc::new(ConsoleObserver::new()))
        .map_err(ClipXError::from)
        .context("Failed to initialize application")?;

    // Execute the requested command
    match cli.command {
        Commands::Info(args) => {
            info!("Executing info command");
            commands::info(&container, args).await?;
        }
        Commands::Clip(args) => {
            info!("Executing clip command");
            commands::clip(&container, args).await?;
        }
    }

    info!("ClipX CLI completed successfully");
    Ok(())
}
