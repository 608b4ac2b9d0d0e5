//! Configuration initialization and hierarchy management

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::cli::{Cli, Commands};
use crate::domain::errors::DomainError;
use crate::ports::ConfigPort;

/// Files probed, in order, when `--config` is not given
pub const CONFIG_SEARCH_PATHS: &[&str] = &["clipx.toml", "config/clipx.toml"];

/// Environment variables and the configuration keys they override
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("CLIPX_SERVER_URL", "server_url"),
    ("CLIPX_API_PREFIX", "api_prefix"),
    ("CLIPX_POLL_INTERVAL_MS", "poll_interval_ms"),
    ("CLIPX_MIN_CLIP_SECONDS", "min_clip_seconds"),
    ("CLIPX_REMINDER_INTERVAL_MS", "reminder_interval_ms"),
    ("CLIPX_LOG_LEVEL", "log_level"),
    ("CLIPX_USER_AGENT", "user_agent"),
];

/// Typed view of the resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub api_prefix: String,
    pub poll_interval: Duration,
    pub min_clip_seconds: u64,
    pub reminder_interval: Duration,
    pub log_level: String,
    pub user_agent: String,
    pub config_file: Option<String>,
}

impl Settings {
    /// Read every key from a validated configuration
    pub async fn from_config(config: &dyn ConfigPort) -> Result<Self, DomainError> {
        Ok(Self {
            server_url: required(config, "server_url").await?,
            api_prefix: required(config, "api_prefix").await?,
            poll_interval: Duration::from_millis(number(config, "poll_interval_ms").await?),
            min_clip_seconds: number(config, "min_clip_seconds").await?,
            reminder_interval: Duration::from_millis(number(config, "reminder_interval_ms").await?),
            log_level: required(config, "log_level").await?,
            user_agent: required(config, "user_agent").await?,
            config_file: config.get_config_file_path().await?,
        })
    }
}

async fn required(config: &dyn ConfigPort, key: &str) -> Result<String, DomainError> {
    config
        .get_config(key)
        .await?
        .ok_or_else(|| DomainError::Config(format!("Missing configuration key: {}", key)))
}

async fn number(config: &dyn ConfigPort, key: &str) -> Result<u64, DomainError> {
    let value = required(config, key).await?;
    value
        .parse()
        .map_err(|e| DomainError::Config(format!("Invalid value for {}: {}", key, e)))
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration_hierarchy(
    config: &dyn ConfigPort,
    cli: &Cli,
) -> Result<Settings, DomainError> {
    resolve_configuration(config, cli, |name| std::env::var(name).ok()).await
}

/// Same as [`initialize_configuration_hierarchy`] with an injectable environment
pub async fn resolve_configuration<F>(
    config: &dyn ConfigPort,
    cli: &Cli,
    env: F,
) -> Result<Settings, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    // Step 1: defaults are seeded by the adapter
    // Step 2: file
    load_config_file(config, cli.config.as_deref()).await?;

    // Step 3: environment
    load_environment_variables(config, env).await?;

    // Step 4: command line
    apply_cli_configuration_overrides(config, cli).await?;

    config.validate_config().await?;
    Settings::from_config(config).await
}

/// Load the explicit config file, or the first one found on the search path
async fn load_config_file(config: &dyn ConfigPort, explicit: Option<&Path>) -> Result<(), DomainError> {
    if let Some(path) = explicit {
        return config.load_config(&path.to_string_lossy()).await;
    }

    for path in CONFIG_SEARCH_PATHS {
        if Path::new(path).exists() {
            debug!("Loading configuration from: {}", path);
            return config.load_config(path).await;
        }
    }

    debug!("No configuration file found, using defaults");
    Ok(())
}

/// Apply environment variable overrides
async fn load_environment_variables<F>(config: &dyn ConfigPort, env: F) -> Result<usize, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_overrides = 0;
    for (env_var, config_key) in ENV_MAPPINGS {
        if let Some(value) = env(env_var).filter(|v| !v.trim().is_empty()) {
            debug!("Found environment override: {} = {}", env_var, value);
            config.set_config(config_key, value.trim()).await?;
            env_overrides += 1;
        }
    }

    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }
    Ok(env_overrides)
}

/// Apply command-line overrides
async fn apply_cli_configuration_overrides(config: &dyn ConfigPort, cli: &Cli) -> Result<usize, DomainError> {
    let mut cli_overrides = 0;

    if let Some(server) = &cli.server {
        config.set_config("server_url", server).await?;
        cli_overrides += 1;
    }
    if let Some(level) = &cli.log_level {
        config.set_config("log_level", level).await?;
        cli_overrides += 1;
    }
    if let Some(interval) = cli.poll_interval_ms {
        config.set_config("poll_interval_ms", &interval.to_string()).await?;
        cli_overrides += 1;
    }
    if let Commands::Clip(args) = &cli.command {
        if let Some(min_clip) = args.min_clip {
            config.set_config("min_clip_seconds", &min_clip.to_string()).await?;
            cli_overrides += 1;
        }
    }

    if cli_overrides > 0 {
        debug!("Applied {} CLI configuration overrides", cli_overrides);
    }
    Ok(cli_overrides)
}
