//! Configuration loader for the Justice backend.
//!
//! Reads `config.toml` from the data directory (`~/.justice/` by default)
//! and deserializes it into [`JusticeConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use justice_types::config::JusticeConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "JUSTICE_DATA_DIR";

/// Resolve the data directory: CLI flag, then `JUSTICE_DATA_DIR`, then `~/.justice`.
pub fn resolve_data_dir(cli_override: Option<PathBuf>) -> PathBuf {
    resolve_data_dir_from(cli_override, std::env::var_os(DATA_DIR_ENV))
}

fn resolve_data_dir_from(cli_override: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    cli_override
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".justice")
        })
}

/// Where fastembed caches downloaded model weights.
pub fn model_cache_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("models")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`JusticeConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> JusticeConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return JusticeConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return JusticeConfig::default();
        }
    };

    match toml::from_str::<JusticeConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            JusticeConfig::default()
        }
    }
}
