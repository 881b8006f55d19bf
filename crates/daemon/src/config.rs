use pulse_types::DriverType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for the daemon
///
/// Covers the deployment-facing knobs only; signal-processing constants
/// are compile-time (see `pulse_dsp`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Port the HTTP service listens on
    pub listen_port: u16,
    /// How often the display surface is refreshed, in milliseconds
    pub display_refresh_ms: u64,
    /// Type of sensor driver to use (Mcp3008 or Mock)
    pub driver_type: DriverType,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            listen_port: 8080,
            display_refresh_ms: 500,
            driver_type: DriverType::Mock, // Default to Mock driver for safety
        }
    }
}

/// Load daemon configuration from file or create default if not found
pub fn load_config(config_path: &str) -> Arc<DaemonConfig> {
    match std::fs::read_to_string(config_path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {}", config_path);
                Arc::new(config)
            }
            Err(e) => {
                tracing::warn!("Error parsing configuration file: {}. Using defaults.", e);
                Arc::new(write_default_config(config_path))
            }
        },
        Err(_) => {
            tracing::info!("Configuration file not found. Using defaults.");
            Arc::new(write_default_config(config_path))
        }
    }
}

fn write_default_config(config_path: &str) -> DaemonConfig {
    let default_config = DaemonConfig::default();

    // Create default config file for future use
    if let Ok(json) = serde_json::to_string_pretty(&default_config) {
        if std::fs::write(config_path, json).is_ok() {
            tracing::info!("Created default configuration file at {}", config_path);
        }
    }

    default_config
}
