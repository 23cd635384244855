//! Configuration loading and management

mod io;
mod settings;

pub use settings::{ApiSettings, TimerSettings};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure (`~/.achtrack/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for cached catalog and progress documents.
    /// Defaults to `~/.achtrack/data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Remote API settings
    #[serde(default)]
    pub api: ApiSettings,

    /// Debounce and hold-to-repeat timing
    #[serde(default)]
    pub timers: TimerSettings,
}

impl Config {
    /// Resolved data directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("data"))
    }
}
