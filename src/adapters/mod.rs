// Adapters - External system implementations

pub mod http_api;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use http_api::HttpApiAdapter;
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::TracingNotifierAdapter;
