// Ambient server settings
// Host, logging and connection tuning; the route table comes from the command line

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings loaded from defaults, an optional file and `MOKK_*` environment variables
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Connection tuning
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Lifetime limit in seconds for a whole connection, keep-alive requests included
    pub connection_timeout: u64,
}

impl Settings {
    /// Load settings, layering `config_file` (if any) and `MOKK_*` variables over defaults
    pub fn load(config_file: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 30)?;

        if let Some(path) = config_file {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        builder
            .add_source(
                ::config::Environment::with_prefix("MOKK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                workers: None,
            },
            logging: LoggingConfig {
                access_log: false,
                access_log_format: "common".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive: true,
                connection_timeout: 30,
            },
        }
    }
}
