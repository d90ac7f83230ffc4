//! Configuration loader for the `geolab-samples` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::{env, net::SocketAddr, path::PathBuf};

use anyhow::{anyhow, Result};

/// Parse an optional boolean environment variable with a default value.
///
/// Accepts `1|true|yes|on` and `0|false|no|off`, case-insensitive.
macro_rules! parse_env_bool {
    ($var_name:expr, $default:expr) => {
        match env::var($var_name).ok().map(|v| v.trim().to_ascii_lowercase()) {
            None => $default,
            Some(v) => match v.as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => return Err(anyhow!("Invalid {}: {:?}", $var_name, other)),
            },
        }
    };
}

/// Parse an optional socket address environment variable with a default value.
macro_rules! parse_env_addr {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<SocketAddr>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or_else(|| SocketAddr::from($default))
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the local API binds to.
    pub bind_addr: SocketAddr,

    /// Initial recalculation mode of the session.
    pub auto_recalc: bool,

    /// Optional CSV file ingested at startup.
    pub preload_file: Option<PathBuf>,

    /// Load the built-in demonstration data at startup (ignored if a preload
    /// file is set).
    pub preload_mock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            auto_recalc: true,
            preload_file: None,
            preload_mock: false,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `SAMPLES_BIND_ADDR` – listen address (default: 127.0.0.1:8080)
/// - `SAMPLES_AUTO_RECALC` – start in auto recalculate mode (default: true)
/// - `SAMPLES_PRELOAD_FILE` – CSV file to ingest at startup
/// - `SAMPLES_PRELOAD_MOCK` – load mock data at startup (default: false)
///
/// Returns an error if any variable is set but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let bind_addr = parse_env_addr!("SAMPLES_BIND_ADDR", ([127, 0, 0, 1], 8080));
    let auto_recalc = parse_env_bool!("SAMPLES_AUTO_RECALC", true);
    let preload_mock = parse_env_bool!("SAMPLES_PRELOAD_MOCK", false);
    let preload_file = env::var("SAMPLES_PRELOAD_FILE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    Ok(Config {
        bind_addr,
        auto_recalc,
        preload_file,
        preload_mock,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        let preload_file = self
            .preload_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".to_string());

        tracing::info!("Configuration loaded:");
        tracing::info!("  SAMPLES_BIND_ADDR    : {}", self.bind_addr);
        tracing::info!("  SAMPLES_AUTO_RECALC  : {}", self.auto_recalc);
        tracing::info!("  SAMPLES_PRELOAD_FILE : {}", preload_file);
        tracing::info!("  SAMPLES_PRELOAD_MOCK : {}", self.preload_mock);
    }
}
