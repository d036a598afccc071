use std::{
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

use tokio::{task::JoinHandle, time};
use tracing::debug;

use crate::constants::{MILLIS_PER_SECOND, TICK_INTERVAL};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeRemaining {
    Ended,
    Left(String),
}

impl TimeRemaining {
    pub fn is_ended(&self) -> bool {
        matches!(self, TimeRemaining::Ended)
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRemaining::Ended => f.write_str("Ended"),
            TimeRemaining::Left(text) => f.write_str(text),
        }
    }
}

/// Countdown text for a deadline in seconds, evaluated at `now_ms`.
///
/// Shows the largest non-zero unit and the one below it (`"2d 3h"`, `"5m 12s"`),
/// or bare seconds under a minute.
pub fn time_remaining(deadline_secs: i64, now_ms: i64) -> TimeRemaining {
    let deadline_ms = deadline_secs.saturating_mul(MILLIS_PER_SECOND);
    if now_ms >= deadline_ms {
        return TimeRemaining::Ended;
    }

    let seconds = deadline_ms.saturating_sub(now_ms) / MILLIS_PER_SECOND;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let text = if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    };
    TimeRemaining::Left(text)
}

/// Wall-clock source for the ticker. Domain functions take `now` as an argument instead.
pub trait Clock: Send + Sync + 'static {
    fn now_millis(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Recomputes [`time_remaining`] every second on the tokio runtime.
///
/// The task stops by itself after reporting `Ended`, and is aborted when the
/// handle is dropped, so a discarded view cannot leave a timer running.
#[derive(Debug)]
pub struct Countdown {
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Must be called from within a tokio runtime.
    pub fn start<C, F>(deadline_secs: i64, clock: C, mut on_tick: F) -> Self
    where
        C: Clock,
        F: FnMut(TimeRemaining) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(TICK_INTERVAL);
            loop {
                ticker.tick().await;
                let remaining = time_remaining(deadline_secs, clock.now_millis());
                let ended = remaining.is_ended();
                on_tick(remaining);
                if ended {
                    debug!(deadline_secs, "countdown reached deadline");
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Same as dropping the handle.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
