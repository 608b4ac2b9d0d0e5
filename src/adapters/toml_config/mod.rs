// TOML config adapter - Configuration management using TOML files

use crate::domain::errors::*;
use crate::ports::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use url::Url;

/// Table holding this tool's keys inside a config file
pub const CONFIG_SECTION: &str = "clipx";

/// Keys whose values must be positive integers
const POSITIVE_INTEGER_KEYS: &[&str] = &["poll_interval_ms", "reminder_interval_ms", "min_clip_seconds"];

/// Built-in defaults, lowest precedence
pub const DEFAULTS: &[(&str, &str)] = &[
    ("server_url", "http://127.0.0.1:8000"),
    ("api_prefix", "/api"),
    ("poll_interval_ms", "2000"),
    ("min_clip_seconds", "60"),
    ("reminder_interval_ms", "5000"),
    ("log_level", "info"),
    ("user_agent", concat!("clipx/", env!("CARGO_PKG_VERSION"))),
];

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: Arc<RwLock<HashMap<String, String>>>,
    config_file_path: Arc<RwLock<Option<PathBuf>>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter seeded with the defaults
    pub fn new() -> Self {
        let config = DEFAULTS
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self {
            config: Arc::new(RwLock::new(config)),
            config_file_path: Arc::new(RwLock::new(None)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>, DomainError> {
        self.config
            .read()
            .map_err(|_| DomainError::Config("Configuration lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>, DomainError> {
        self.config
            .write()
            .map_err(|_| DomainError::Config("Configuration lock poisoned".to_string()))
    }

    /// Merge the `[clipx]` table of a TOML document into the configuration
    fn deserialize_config(&self, toml_content: &str) -> Result<usize, DomainError> {
        let parsed: toml::Value = toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;

        let Some(table) = parsed.get(CONFIG_SECTION).and_then(|s| s.as_table()) else {
            return Ok(0);
        };

        let mut config = self.write()?;
        let mut merged = 0;
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(DomainError::Config(format!(
                        "Unsupported value for '{}': {}",
                        key, other
                    )))
                }
            };
            config.insert(key.clone(), text);
            merged += 1;
        }

        Ok(merged)
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.read()?.get(key).cloned())
    }

    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.write()?.insert(key.to_string(), value.to_string());
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn load_config(&self, file_path: &str) -> Result<(), DomainError> {
        let path = PathBuf::from(file_path);

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DomainError::Config(format!("Failed to read config file {}: {}", file_path, e)))?;

        let merged = self.deserialize_config(&content)?;
        tracing::debug!("Loaded {} keys from {}", merged, file_path);

        let mut config_path = self
            .config_file_path
            .write()
            .map_err(|_| DomainError::Config("Configuration lock poisoned".to_string()))?;
        *config_path = Some(path);

        Ok(())
    }

    async fn validate_config(&self) -> Result<(), DomainError> {
        let config = self.read()?;

        if let Some(log_level) = config.get("log_level") {
            LogLevel::parse(log_level)?;
        }

        if let Some(server_url) = config.get("server_url") {
            let url = Url::parse(server_url).map_err(|e| {
                DomainError::Config(format!("Invalid server_url '{}': {}", server_url, e))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(DomainError::Config(format!(
                    "server_url must be http or https, got '{}'",
                    url.scheme()
                )));
            }
        }

        for key in POSITIVE_INTEGER_KEYS {
            if let Some(value) = config.get(*key) {
                let parsed: u64 = value.parse().map_err(|e| {
                    DomainError::Config(format!("Invalid value for {}: {}", key, e))
                })?;
                if parsed == 0 {
                    return Err(DomainError::Config(format!("{} must be greater than zero", key)));
                }
            }
        }

        Ok(())
    }

    async fn get_config_file_path(&self) -> Result<Option<String>, DomainError> {
        let config_path = self
            .config_file_path
            .read()
            .map_err(|_| DomainError::Config("Configuration lock poisoned".to_string()))?;
        Ok(config_path
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()))
    }
}
