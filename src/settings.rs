//! Runner settings and preferences
//!
//! Loaded from a JSON file next to the binary. Any field may be omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Headless runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Session seed (random when absent)
    pub seed: Option<u64>,
    /// Number of runs to play
    pub runs: u32,
    /// Tick cap per run, so a run that never dies still ends
    pub max_ticks: u64,
    /// Game balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            runs: 5,
            max_ticks: 20_000,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings; the embedded tuning is sanitized like `Tuning::from_json`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.sanitized();
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read settings {}: {err}", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings {}: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
