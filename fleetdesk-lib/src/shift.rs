use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};

/// Length of a driver's shift in minutes.
pub const SHIFT_MINUTES: u32 = 480;

/// Wall-clock time worth one [`ShiftClock::tick`].
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Counts down the minutes left in a driver's shift.
///
/// The clock has no timer of its own; every [`tick`](ShiftClock::tick) removes one minute
/// until none are left, after which ticking does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftClock {
    total: u32,
    remaining: u32,
}

impl ShiftClock {
    pub fn new() -> Self {
        Self::with_minutes(SHIFT_MINUTES)
    }

    pub fn with_minutes(total: u32) -> Self {
        Self {
            total,
            remaining: total,
        }
    }

    /// Take one minute off the clock. Returns `false` once the clock has run out and should no
    /// longer be ticked.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }

        self.remaining -= 1;
        self.remaining > 0
    }

    /// Tick once for every whole [`TICK_INTERVAL`] in `elapsed`. Returns the time left over,
    /// to be carried into the next call.
    pub fn catch_up(&mut self, mut elapsed: Duration) -> Duration {
        while elapsed >= TICK_INTERVAL {
            if !self.tick() {
                return Duration::ZERO;
            }
            elapsed = elapsed.saturating_sub(TICK_INTERVAL);
        }

        elapsed
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// How much of the shift has elapsed, from 0 to 100.
    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }

        let elapsed = self.total.saturating_sub(self.remaining);
        f64::from(elapsed) / f64::from(self.total) * 100.0
    }
}

impl Default for ShiftClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Remaining time as `HH:MM`
impl Display for ShiftClock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let hours = self.remaining.div_euclid(60);
        let minutes = self.remaining.rem_euclid(60);
        write!(f, "{hours:02}:{minutes:02}")
    }
}
