//! Countdown to local midnight on New Year's Day
//!
//! The deadline is computed once from the viewer's clock and never changes.
//! The countdown itself is a two-phase machine: it publishes `HH:MM:SS` on
//! every tick while running, publishes a single `Expired` update when the
//! deadline passes, and is silent from then on.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};

use crate::consts::EXPIRED_DISPLAY;

/// Midnight on January 1 of the year after `now`
pub fn next_new_year(now: NaiveDateTime) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(now.year().checked_add(1)?, 1, 1)?.and_hms_opt(0, 0, 0)
}

/// Fixed target instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    /// Unix epoch milliseconds
    pub epoch_ms: i64,
    /// Year the deadline starts
    pub year: i32,
}

impl Deadline {
    /// Next New Year's midnight in `now`'s timezone.
    ///
    /// Returns `None` if that local midnight does not exist (a DST gap at
    /// midnight) or the year overflows. An ambiguous midnight resolves to the
    /// earlier instant.
    pub fn next_new_year<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<Self> {
        let target = next_new_year(now.naive_local())?;
        let instant = now.timezone().from_local_datetime(&target).earliest()?;
        Some(Self {
            epoch_ms: instant.timestamp_millis(),
            year: target.year(),
        })
    }

    /// Milliseconds left at `now_ms`, clamped to zero
    pub fn remaining_ms(&self, now_ms: i64) -> u64 {
        self.epoch_ms.saturating_sub(now_ms).max(0) as u64
    }
}

/// Format a signed millisecond difference as `HH:MM:SS`.
///
/// Hours are not wrapped at 24. Any `diff_ms <= 0` yields the expired display.
pub fn format_countdown(diff_ms: i64) -> String {
    if diff_ms <= 0 {
        return EXPIRED_DISPLAY.to_string();
    }
    let total_seconds = diff_ms / 1000;
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{mins:02}:{secs:02}")
}

/// Countdown phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    Running,
    /// Terminal; the tick source should be cancelled
    Expired,
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownUpdate {
    /// New `HH:MM:SS` display value
    Remaining(String),
    /// Deadline reached: show the expired display and reveal the unlock action
    Expired,
}

/// The countdown timer
#[derive(Debug, Clone)]
pub struct Countdown {
    deadline: Option<Deadline>,
    phase: CountdownPhase,
    ticks: u64,
}

impl Countdown {
    /// A `None` deadline counts as already passed
    pub fn new(deadline: Option<Deadline>) -> Self {
        Self {
            deadline,
            phase: CountdownPhase::Running,
            ticks: 0,
        }
    }

    pub fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn is_expired(&self) -> bool {
        self.phase == CountdownPhase::Expired
    }

    /// Ticks that produced an update
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance at wall-clock `now_ms`; `None` once expired
    pub fn tick(&mut self, now_ms: i64) -> Option<CountdownUpdate> {
        if self.is_expired() {
            return None;
        }
        self.ticks += 1;

        let remaining = self.deadline.map_or(0, |d| d.remaining_ms(now_ms));
        if remaining == 0 {
            self.phase = CountdownPhase::Expired;
            log::info!("Countdown expired after {} ticks", self.ticks);
            return Some(CountdownUpdate::Expired);
        }
        let diff = i64::try_from(remaining).unwrap_or(i64::MAX);
        Some(CountdownUpdate::Remaining(format_countdown(diff)))
    }
}
