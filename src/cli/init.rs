//! Init command implementation

use anyhow::Result;
use std::path::{Path, PathBuf};

use achtrack::config::Config;

/// Write a default config file (`~/.achtrack/config.toml` unless a path is given)
pub async fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path: PathBuf = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if Config::init(&path, force)? {
        println!("Created {}", path.display());
    } else {
        println!("{} already exists (use --force to overwrite).", path.display());
    }
    Ok(())
}
