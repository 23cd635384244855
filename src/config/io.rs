//! Config file location, loading and saving

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;
use crate::cache::write_atomic;

impl Config {
    /// `~/.achtrack/`, or `./.achtrack/` without a home directory
    pub fn global_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".achtrack")
    }

    /// `~/.achtrack/config.toml`
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the config while holding `<path>.lock`, so concurrent writers
    /// replace the file one at a time.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let rendered = toml::to_string_pretty(self).context("Failed to serialize config")?;

        let _lock = lock_beside(path)?;
        write_atomic(path, rendered.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Load `path`, or the global config when `None`.
    ///
    /// A missing global config is created with defaults; a missing explicit
    /// path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let global_path = Self::global_config_path();
                if !global_path.exists() {
                    Self::init(&global_path, false)?;
                }
                Self::from_file(&global_path)
            }
        }
    }

    /// Write a default config to `path`. Returns false if one already exists
    /// and `force` is not set.
    pub fn init(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            return Ok(false);
        }
        Self::default().save_to_file(path)?;
        tracing::info!("Created {}", path.display());
        Ok(true)
    }
}

/// Exclusive lock on `<path>.lock`, released on drop
fn lock_beside(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let lock_path = path.with_extension("toml.lock");
    let lock = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;
    lock.lock_exclusive().context("Failed to acquire config lock")?;
    Ok(lock)
}
