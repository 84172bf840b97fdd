use config::{Config, Environment, File};
use estoque_models::Thresholds;
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::InventoryResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
    pub logging: LoggingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Inventory file read once at start-up.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub metrics_enabled: bool,
    pub prometheus_namespace: String,
}

impl AppConfig {
    /// Layered load; any `config` failure surfaces as [`crate::InventoryError::Configuration`].
    pub fn load() -> InventoryResult<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = AppConfig::default();

        let config = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("data.path", defaults.data.path)?
            .set_default("thresholds.low_availability", defaults.thresholds.low_availability)?
            .set_default("thresholds.stale_days", defaults.thresholds.stale_days)?
            .set_default(
                "thresholds.critical_availability",
                defaults.thresholds.critical_availability,
            )?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("monitoring.metrics_enabled", defaults.monitoring.metrics_enabled)?
            .set_default(
                "monitoring.prometheus_namespace",
                defaults.monitoring.prometheus_namespace,
            )?
            // Shared defaults checked into the repository
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with ESTOQUE prefix
            .add_source(Environment::with_prefix("ESTOQUE").separator("__"));

        Ok(config.build()?.try_deserialize()?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            data: DataConfig {
                path: "df_estoque.csv".to_string(),
            },
            thresholds: Thresholds::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file_path: None,
            },
            monitoring: MonitoringConfig {
                metrics_enabled: true,
                prometheus_namespace: "estoque".to_string(),
            },
        }
    }
}
