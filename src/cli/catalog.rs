//! Catalog commands: sync, refresh, tree, search, show

use anyhow::{Result, bail};

use achtrack::tracker::Tracker;
use achtrack::view::GroupView;

use super::{Session, check_mark};

/// Load the catalog (cache or API) and print a summary
pub async fn sync_command(session: &Session) -> Result<()> {
    let tracker = session.start().await?;
    print_status(&tracker);
    Ok(())
}

/// Discard cached catalog data and fetch it again
pub async fn refresh_command(session: &Session) -> Result<()> {
    let mut tracker = session.open();
    let status = tracker.refresh().await.clone();
    if !status.is_loaded() {
        bail!("Refresh failed ({})", status);
    }
    print_status(&tracker);
    Ok(())
}

/// Print the group -> category tree
pub async fn tree_command(session: &Session) -> Result<()> {
    let tracker = session.start().await?;
    print_groups(&tracker, &tracker.tree().groups);
    Ok(())
}

/// Search achievement and category names
pub async fn search_command(session: &Session, query: &str) -> Result<()> {
    let tracker = session.start().await?;
    let results = tracker.search(query);
    if results.is_empty() {
        println!("No matches for '{}'.", query);
        return Ok(());
    }

    for group in &results {
        println!("{}", group.name);
        for category in &group.categories {
            println!("  {} ({})", category.name, category.id);
            for id in category.displayed_ids() {
                if let Some(achievement) = tracker.catalog().achievement(*id) {
                    println!("    {} {:>6}  {}", check_mark(achievement.is_complete), id, achievement.name);
                }
            }
        }
    }
    Ok(())
}

/// List the achievements of one category
pub async fn show_command(session: &Session, category_id: u32, hide_completed: bool) -> Result<()> {
    let mut tracker = session.start().await?;
    tracker.load_category(category_id).await;

    let Some(category) = tracker.catalog().category(category_id) else {
        bail!("Unknown category {}", category_id);
    };
    println!("{} ({})\n", category.name, category.id);

    let achievements = tracker
        .category_achievements(category_id, hide_completed)
        .unwrap_or_default();
    if achievements.is_empty() {
        println!("Nothing to show.");
        return Ok(());
    }

    for achievement in achievements {
        println!(
            "  {} {:>6}  {}  - {}",
            check_mark(achievement.is_complete),
            achievement.id,
            achievement.name,
            achievement.progress_display()
        );
        if !achievement.requirement.is_empty() {
            println!("             {}", achievement.requirement);
        }
    }
    Ok(())
}

pub(crate) fn print_status(tracker: &Tracker) {
    let catalog = tracker.catalog();
    println!("Catalog {}", tracker.status());
    println!(
        "  {} groups, {} categories, {} achievements",
        catalog.groups().len(),
        catalog.categories().len(),
        catalog.achievements().len()
    );
    print_summary(tracker);
}

pub(crate) fn print_summary(tracker: &Tracker) {
    let summary = tracker.summary();
    println!("Overall: {}", summary.overall);
    println!("Daily:   {}", summary.daily);
}

fn print_groups(tracker: &Tracker, groups: &[GroupView]) {
    if groups.is_empty() {
        println!("No achievement groups loaded.");
        return;
    }

    for group in groups {
        println!("{}", group.name);
        for category in &group.categories {
            let ids = category.displayed_ids();
            let done = ids
                .iter()
                .filter(|id| tracker.catalog().achievement(**id).is_some_and(|a| a.is_complete))
                .count();
            println!("  {:>5}  {} [{}/{}]", category.id, category.name, done, ids.len());
        }
    }
    println!();
    print_summary(tracker);
}
