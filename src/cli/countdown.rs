//! Daily reset countdown

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;

use achtrack::timers::{format_countdown, time_until_daily_reset};

/// Print time until the next UTC midnight; with `watch`, update every
/// second until interrupted.
pub async fn countdown_command(watch: bool) -> Result<()> {
    if !watch {
        println!("{}", format_countdown(time_until_daily_reset(Utc::now())));
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let remaining = format_countdown(time_until_daily_reset(Utc::now()));
                write!(stdout, "\rDaily reset in {}", remaining)?;
                stdout.flush()?;
            }
            _ = tokio::signal::ctrl_c() => {
                writeln!(stdout)?;
                break;
            }
        }
    }
    Ok(())
}
