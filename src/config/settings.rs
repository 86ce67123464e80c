//! User settings for TripBuddy
//!
//! Settings only seed a fresh session. Once a trip has been saved, its
//! budget comes from the snapshot instead.

use serde::{Deserialize, Serialize};

use super::paths::TripPaths;
use crate::error::TripError;
use crate::models::{Currency, Money};
use crate::storage::write_json_atomic;

/// User settings for TripBuddy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Budget for a new trip, in whole SGD
    #[serde(default = "default_budget")]
    pub default_budget: u32,

    /// Currency code used for display at start-up
    #[serde(default = "default_base_currency")]
    pub base_currency: String,

    /// Log filter used when neither `RUST_LOG` nor `--log-level` is given
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Save the trip when the session ends
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_budget() -> u32 {
    1000
}

fn default_base_currency() -> String {
    Currency::CANONICAL.code().to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_autosave() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_budget: default_budget(),
            base_currency: default_base_currency(),
            log_level: default_log_level(),
            autosave: default_autosave(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &TripPaths) -> Result<Self, TripError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TripError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TripError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TripPaths) -> Result<(), TripError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Budget for a new trip; zero falls back to the built-in default
    pub fn default_budget_money(&self) -> Money {
        match self.default_budget {
            0 => Money::from_units(i64::from(default_budget())),
            units => Money::from_units(i64::from(units)),
        }
    }

    /// Configured base currency
    pub fn currency(&self) -> Result<Currency, TripError> {
        Currency::from_code(&self.base_currency).ok_or_else(|| {
            TripError::Config(format!("Unknown base currency: {}", self.base_currency))
        })
    }
}
