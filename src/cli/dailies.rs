//! Seasonal daily selection

use anyhow::Result;

use super::{Session, check_mark, parse_ids};

/// List the seasonal daily pool and which categories are selected
pub async fn list_command(session: &Session) -> Result<()> {
    let tracker = session.start().await?;
    let pool = tracker.seasonal_pool();
    if pool.is_empty() {
        println!("No seasonal daily categories available.");
        return Ok(());
    }

    println!("Seasonal dailies:");
    for category in pool {
        println!(
            "  {} {:>5}  {}",
            check_mark(tracker.selection().contains(category.id)),
            category.id,
            category.name
        );
    }
    println!();
    println!("Daily: {}", tracker.summary().daily);
    Ok(())
}

/// Replace the selection
pub async fn select_command(session: &Session, raw_ids: &[String]) -> Result<()> {
    let ids = parse_ids(raw_ids)?;
    let mut tracker = session.start().await?;
    let rejected = tracker.select_seasonal_dailies(ids)?;
    for id in &rejected {
        eprintln!("Category {} is not a seasonal daily, skipped", id);
    }
    println!("Selected {} seasonal daily categories.", tracker.selection().ids().len());
    println!("Daily: {}", tracker.summary().daily);
    Ok(())
}
