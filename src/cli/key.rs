//! API key commands

use anyhow::{Result, bail};

use achtrack::domain::ApiKey;

use super::Session;
use super::catalog::print_summary;

/// Store a key and pull the account's completion flags
pub async fn set_command(session: &Session, raw: &str) -> Result<()> {
    let Some(key) = ApiKey::parse(raw) else {
        bail!("API key must not be empty");
    };

    let mut tracker = session.open();
    tracker.start().await;
    let changed = tracker.set_api_key(key).await?;
    println!("API key saved. {} achievement(s) updated from your account.", changed);
    print_summary(&tracker);
    Ok(())
}

/// Forget the key, optionally resetting all progress
pub async fn remove_command(session: &Session, reset: bool) -> Result<()> {
    let mut tracker = session.open();
    if reset {
        tracker.start().await;
    }

    let was_set = tracker.has_api_key();
    let reset_count = tracker.remove_api_key(reset)?;
    if was_set {
        println!("API key removed.");
    } else {
        println!("No API key was stored.");
    }
    if reset {
        println!("Reset {} achievement(s).", reset_count);
    }
    Ok(())
}
