use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use doceencomenda_lead::LeadConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub lead: LeadConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Where new customers continue after leaving their contact
    #[serde(default)]
    pub signup_url: Option<String>,
}

impl AppConfig {
    pub fn signup_url(&self) -> Option<&str> {
        self.signup_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// `DOCEENCOMENDA__SECTION__KEY` variables.
///
/// Values stay strings until deserialized, so a phone such as `0055...`
/// keeps its leading zeros.
fn environment() -> Environment {
    Environment::with_prefix("DOCEENCOMENDA").separator("__")
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DOCEENCOMENDA__LEAD__STRATEGY, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(environment());

        // Names used by the previous static deployment
        if let Ok(phone) = env::var("WHATSAPP_PHONE") {
            builder = builder.set_override("lead.whatsapp.phone", phone)?;
        }
        if let Ok(api_url) = env::var("LEAD_API_URL") {
            builder = builder.set_override("lead.api_url", api_url)?;
        }
        if let Ok(signup_url) = env::var("SIGNUP_URL") {
            builder = builder.set_override("app.signup_url", signup_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    ///
    /// Missing lead destinations are not fatal: the server starts and each
    /// submission reports a generic failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.lead.max_tracked_forms == 0 {
            return Err("lead.max_tracked_forms must be at least 1".to_string());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(format!(
                "Unknown logging format '{}', expected 'pretty' or 'json'",
                self.logging.format
            ));
        }
        Ok(())
    }
}
