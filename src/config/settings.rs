//! Settings sections

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::{DEFAULT_BASE_URL, MAX_IDS_PER_REQUEST};

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the achievements API (no trailing slash needed)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Read timeout per request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum ids per `?ids=` request; longer lists are split
    #[serde(default = "default_max_ids_per_request")]
    pub max_ids_per_request: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_ids_per_request() -> usize {
    MAX_IDS_PER_REQUEST
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_ids_per_request: default_max_ids_per_request(),
        }
    }
}

/// Timing for view refresh and held buttons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Quiet period before a burst of changes refreshes the view
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Interval between repeats while increment/decrement is held
    #[serde(default = "default_repeat_interval_ms")]
    pub repeat_interval_ms: u64,
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_repeat_interval_ms() -> u64 {
    100
}

impl TimerSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            repeat_interval_ms: default_repeat_interval_ms(),
        }
    }
}
