//! Progress commands: inc, dec, complete, reset

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, bail};

use achtrack::domain::Achievement;
use achtrack::timers::{Debouncer, HoldRepeat};
use achtrack::tracker::{Step, Tracker};

use super::catalog::print_summary;
use super::{Session, parse_ids};

/// Apply `times` increments or decrements, or hold the button for `hold`
pub async fn step_command(session: &Session, id: u32, step: Step, times: u32, hold: Option<Duration>) -> Result<()> {
    let mut tracker = session.start().await?;
    if tracker.catalog().achievement(id).is_none() {
        bail!("Unknown achievement {}", id);
    }

    let applied = match hold {
        Some(duration) => hold_for(session, &mut tracker, id, step, duration).await?.0,
        None => repeat(&mut tracker, id, step, times)?,
    };

    if let Some(achievement) = tracker.catalog().achievement(id) {
        println!("{} step(s) applied.", applied);
        print_achievement(achievement);
    }
    print_summary(&tracker);
    Ok(())
}

fn repeat(tracker: &mut Tracker, id: u32, step: Step, times: u32) -> Result<u32> {
    let mut applied = 0;
    for _ in 0..times {
        let changes = match step {
            Step::Increment => tracker.increment(id)?,
            Step::Decrement => tracker.decrement(id)?,
        };
        if !changes.any() {
            break;
        }
        applied += 1;
    }
    Ok(applied)
}

/// Simulate a held button: ticks every repeat interval until `duration`
/// elapses or a tier boundary stops the repeat. The achievement line is
/// reprinted once each burst of steps settles.
///
/// Returns the applied step count and the lines printed.
async fn hold_for(
    session: &Session,
    tracker: &mut Tracker,
    id: u32,
    step: Step,
    duration: Duration,
) -> Result<(u32, Vec<String>)> {
    let timers = &session.config.timers;
    let (mut debouncer, mut settled) = Debouncer::new(timers.debounce());

    let latest = Arc::new(Mutex::new(String::new()));
    let printer = {
        let latest = latest.clone();
        tokio::spawn(async move {
            let mut rendered = Vec::new();
            while settled.recv().await.is_some() {
                if let Ok(line) = latest.lock() {
                    println!("  {}", line);
                    rendered.push(line.clone());
                }
            }
            rendered
        })
    };

    let hold = HoldRepeat::new();
    let mut ticks = hold.press(timers.repeat_interval());
    let releaser = {
        let hold = hold.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            hold.release();
        })
    };

    let applied = tracker
        .repeat_while_held(id, step, &hold, &mut ticks, |achievement| {
            if let Ok(mut line) = latest.lock() {
                *line = achievement.progress_display();
            }
            debouncer.trigger();
        })
        .await?;
    releaser.abort();

    // Let the last burst settle, then close the channel so the printer ends
    if debouncer.is_pending() {
        tokio::time::sleep(timers.debounce() * 2).await;
    }
    drop(debouncer);
    let rendered = printer.await.unwrap_or_default();
    Ok((applied, rendered))
}

/// Mark the given achievements complete
pub async fn complete_command(session: &Session, raw_ids: &[String]) -> Result<()> {
    let ids = parse_ids(raw_ids)?;
    let mut tracker = session.start().await?;
    let changed = tracker.mark_complete(&ids)?;
    println!("Marked {} achievement(s) complete.", changed);
    print_summary(&tracker);
    Ok(())
}

/// Mark every achievement of a category complete
pub async fn complete_category_command(session: &Session, category_id: u32) -> Result<()> {
    let mut tracker = session.start().await?;
    tracker.load_category(category_id).await;
    let changed = tracker.mark_category_complete(category_id)?;
    println!("Marked {} achievement(s) complete.", changed);
    print_summary(&tracker);
    Ok(())
}

/// Reset the given achievements to not started
pub async fn reset_command(session: &Session, raw_ids: &[String]) -> Result<()> {
    let ids = parse_ids(raw_ids)?;
    let mut tracker = session.start().await?;
    let changed = tracker.reset(&ids)?;
    println!("Reset {} achievement(s).", changed);
    print_summary(&tracker);
    Ok(())
}

/// Reset every achievement
pub async fn reset_all_command(session: &Session) -> Result<()> {
    let mut tracker = session.start().await?;
    let changed = tracker.reset_all().context("Failed to reset progress")?;
    println!("Reset {} achievement(s).", changed);
    print_summary(&tracker);
    Ok(())
}

fn print_achievement(achievement: &Achievement) {
    println!("{} ({}): {}", achievement.name, achievement.id, achievement.progress_display());
}
