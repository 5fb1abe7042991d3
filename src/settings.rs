//! Headless runner settings
//!
//! Loaded from an optional JSON file. Only controls how the runner drives a
//! match; physics and rules are fixed in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::Key;

/// A key transition applied before the given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedKey {
    pub tick: u64,
    pub key: Key,
    pub pressed: bool,
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Stop after this many ticks (0 = until the game ends)
    pub max_ticks: u64,
    /// Pace ticks against the wall clock instead of stepping a virtual clock
    pub realtime: bool,
    /// Start a new game instead of exiting when someone wins
    pub auto_restart: bool,
    /// Log a JSON snapshot every N ticks (0 = never)
    pub snapshot_interval: u64,
    /// Key presses/releases to feed in, by tick
    pub script: Vec<ScriptedKey>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_ticks: 60 * 60 * 10, // ten minutes at 60 Hz
            realtime: false,
            auto_restart: false,
            snapshot_interval: 600,
            script: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON, or `None` if malformed
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Invalid settings: {}", e);
                None
            }
        }
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
            }
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Script entries ordered by tick
    pub fn sorted_script(&self) -> Vec<ScriptedKey> {
        let mut script = self.script.clone();
        script.sort_by_key(|s| s.tick);
        script
    }
}
