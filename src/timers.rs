//! Timing helpers: daily reset countdown, debounce, hold-to-repeat
//!
//! The timers never touch catalog or progress state themselves. They emit
//! ticks on a channel and the owner applies them on its own task, so all
//! mutations stay serialized.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Days, Utc};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

/// Time left until the next UTC midnight
pub fn time_until_daily_reset(now: DateTime<Utc>) -> chrono::Duration {
    let next_reset = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .unwrap_or(now);

    let remaining = next_reset - now;
    if remaining < chrono::Duration::zero() {
        chrono::Duration::zero()
    } else {
        remaining
    }
}

/// `hh:mm:ss`
pub fn format_countdown(remaining: chrono::Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

// ========================================
// DEBOUNCE
// ========================================

/// Coalesces bursts of triggers into one notification after a quiet period
pub struct Debouncer {
    delay: Duration,
    tx: UnboundedSender<()>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Notifications arrive on the returned receiver
    pub fn new(delay: Duration) -> (Self, UnboundedReceiver<()>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Restart the quiet period. Must be called inside a tokio runtime.
    pub fn trigger(&mut self) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(());
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ========================================
// HOLD TO REPEAT
// ========================================

/// Repeating tick source gated by a "held" flag.
///
/// Cloning shares the same flag and timer, so one task can consume ticks
/// while another releases. Consumers must check [`HoldRepeat::is_held`]
/// before applying each tick: ticks already queued at release are stale.
#[derive(Clone, Default)]
pub struct HoldRepeat {
    held: Arc<AtomicBool>,
    timer: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl HoldRepeat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `interval` (first tick after one interval)
    pub fn press(&self, interval: Duration) -> UnboundedReceiver<()> {
        self.release();

        let (tx, rx) = unbounded_channel();
        self.held.store(true, Ordering::SeqCst);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });

        if let Ok(mut timer) = self.timer.lock() {
            *timer = Some(task);
        }
        rx
    }

    /// Stop the timer, then clear the flag
    pub fn release(&self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(task) = timer.take() {
                task.abort();
            }
        }
        self.held.store(false, Ordering::SeqCst);
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}
