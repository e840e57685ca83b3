//! Configuration loader
//!
//! Loads Marketo credentials from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables (a local `.env`
//!    file is picked up when present)
//! 2. If incomplete, falls back to loading from file
//! 3. Probes a small set of paths for config files
//! 4. Supports TOML and JSON formats
//!
//! ## Environment Variables
//! - `MARKETO_CLIENT_ID`: OAuth client ID
//! - `MARKETO_CLIENT_SECRET`: OAuth client secret
//! - `MARKETO_INSTANCE_ID`: Per-tenant instance identifier
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./marketo.toml` or `./marketo.json` (current working directory)
//! 2. `../marketo.toml` or `../marketo.json` (parent directory)

use std::path::{Path, PathBuf};

use marketo_domain::{MarketoConfig, MarketoError, Result};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `MarketoError::Config` if configuration cannot be loaded from
/// either source, the file format is invalid, or required fields are
/// missing.
pub fn load() -> Result<MarketoConfig> {
    let _ = dotenvy::dotenv();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Marketo configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `MarketoError::Config` if required variables are missing or
/// empty.
pub fn load_from_env() -> Result<MarketoConfig> {
    let config = MarketoConfig::new(
        env_var("MARKETO_CLIENT_ID")?,
        env_var("MARKETO_CLIENT_SECRET")?,
        env_var("MARKETO_INSTANCE_ID")?,
    );
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the locations listed in the module
/// documentation. TOML and JSON formats are detected by file extension.
///
/// # Errors
/// Returns `MarketoError::Config` if the file is missing, unreadable, in an
/// unsupported format, or fails validation.
pub fn load_from_file(path: Option<&Path>) -> Result<MarketoConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => probe_config_paths().ok_or_else(|| {
            MarketoError::Config("no marketo.toml or marketo.json found".to_string())
        })?,
    };

    let contents = std::fs::read_to_string(&path)
        .map_err(|err| MarketoError::Config(format!("failed to read {}: {err}", path.display())))?;

    let config: MarketoConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&contents)
            .map_err(|err| MarketoError::Config(format!("invalid TOML config: {err}")))?,
        Some("json") => serde_json::from_str(&contents)
            .map_err(|err| MarketoError::Config(format!("invalid JSON config: {err}")))?,
        _ => {
            return Err(MarketoError::Config(format!(
                "unsupported config format: {}",
                path.display()
            )))
        }
    };

    config.validate()?;
    tracing::info!(path = %path.display(), "Marketo configuration loaded from file");
    Ok(config)
}

fn probe_config_paths() -> Option<PathBuf> {
    ["marketo.toml", "marketo.json", "../marketo.toml", "../marketo.json"]
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| MarketoError::Config(format!("{name} is not set")))
}
