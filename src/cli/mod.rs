//! CLI command implementations

pub mod catalog;
pub mod countdown;
pub mod dailies;
pub mod init;
pub mod key;
pub mod progress;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};

use achtrack::api::{AchievementApi, HttpApi, OfflineApi};
use achtrack::cache::CacheStore;
use achtrack::config::Config;
use achtrack::tracker::Tracker;

/// Options shared by every command
pub struct Session {
    pub config: Config,
    pub data_dir: PathBuf,
    pub offline: bool,
}

impl Session {
    pub fn load(config_path: Option<&Path>, data_dir: Option<PathBuf>, offline: bool) -> Result<Self> {
        let config = Config::load(config_path)?;
        let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
        tracing::debug!("Using data directory {}", data_dir.display());

        Ok(Self {
            config,
            data_dir,
            offline,
        })
    }

    fn api(&self) -> Arc<dyn AchievementApi> {
        if self.offline {
            Arc::new(OfflineApi)
        } else {
            let api = &self.config.api;
            Arc::new(HttpApi::new(&api.base_url, api.timeout(), api.max_ids_per_request))
        }
    }

    /// Local state only; nothing fetched yet
    pub fn open(&self) -> Tracker {
        Tracker::open(CacheStore::new(&self.data_dir), self.api())
    }

    /// Open and run the startup sequence. Fails if no catalog could be loaded.
    pub async fn start(&self) -> Result<Tracker> {
        let mut tracker = self.open();
        let status = tracker.start().await.clone();
        if !status.is_loaded() {
            bail!("Catalog unavailable ({})", status);
        }
        Ok(tracker)
    }
}

/// `[x]` / `[ ]` marker
pub(crate) fn check_mark(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

/// Parse a comma or space separated id list
pub(crate) fn parse_ids(raw: &[String]) -> Result<Vec<u32>> {
    let mut ids = Vec::new();
    for part in raw.iter().flat_map(|r| r.split(',')) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<u32>() {
            Ok(id) => ids.push(id),
            Err(_) => bail!("Invalid id: {}", part),
        }
    }
    Ok(ids)
}
