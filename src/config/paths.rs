//! Path management for TripBuddy
//!
//! ## Path Resolution Order
//!
//! 1. `TRIPBUDDY_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/tripbuddy` or `~/.config/tripbuddy`
//! 3. Windows: `%APPDATA%\tripbuddy`

use std::path::{Path, PathBuf};

use crate::error::TripError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "TRIPBUDDY_DATA_DIR";

const APP_DIR: &str = "tripbuddy";

/// Locations of the settings file and the saved trip
#[derive(Debug, Clone)]
pub struct TripPaths {
    base_dir: PathBuf,
}

impl TripPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if no home directory can be determined.
    pub fn new() -> Result<Self, TripError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (`--data-dir`, tests)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `config.json`
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// `tripbuddy.json`, the saved trip snapshot
    pub fn data_file(&self) -> PathBuf {
        self.base_dir.join("tripbuddy.json")
    }

    pub fn ensure_directories(&self) -> Result<(), TripError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            TripError::Io(format!(
                "Failed to create directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, TripError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                TripError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join(APP_DIR))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, TripError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| TripError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join(APP_DIR))
}
