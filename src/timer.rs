use std::time::Duration;

use crate::traits::Clock;
use crate::types::RepeatTiming;

/// A start/stop stopwatch read against an external clock.
///
/// Mirrors the usual stopwatch contract: a reset stopwatch is stopped and
/// reads zero, a restarted one is running from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stopwatch {
    started_at: Option<Duration>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        match self.started_at {
            Some(start) => now.saturating_sub(start),
            None => Duration::ZERO,
        }
    }

    pub fn restart(&mut self, now: Duration) {
        self.started_at = Some(now);
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }
}

/// The first-delay-then-repeat policy for one held input.
///
/// `next_delay_ms` is the threshold the stopwatch must reach before the next
/// synthetic activation. Zero means no repeat is in progress.
pub struct RepeatTimer {
    stopwatch: Stopwatch,
    next_delay_ms: i64,
    clock: Box<dyn Clock>,
}

impl RepeatTimer {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            next_delay_ms: 0,
            clock,
        }
    }

    pub fn elapsed_ms(&self) -> i64 {
        let elapsed = self.stopwatch.elapsed(self.clock.now()).as_millis();
        i64::try_from(elapsed).unwrap_or(i64::MAX)
    }

    pub fn next_delay_ms(&self) -> i64 {
        self.next_delay_ms
    }

    pub fn is_running(&self) -> bool {
        self.stopwatch.is_running()
    }

    /// Called while a hotbar input is held. Returns `true` when a synthetic
    /// activation is due, and arms the next threshold.
    ///
    /// The overshoot past the old threshold is subtracted from the new one so
    /// that polling once per cycle does not drift the cadence.
    pub fn poll(&mut self) -> bool {
        let elapsed = self.elapsed_ms();
        if elapsed < self.next_delay_ms {
            return false;
        }

        // Old threshold, before reassignment.
        let delta = self.next_delay_ms - elapsed;
        self.next_delay_ms = if self.next_delay_ms == 0 {
            RepeatTiming::INITIAL_DELAY_MS + delta
        } else {
            RepeatTiming::REPEAT_DELAY_MS + delta
        };
        self.stopwatch.restart(self.clock.now());
        true
    }

    /// Drops any repeat in progress. Returns whether there was one.
    pub fn clear_if_running(&mut self) -> bool {
        if !self.stopwatch.is_running() {
            return false;
        }
        self.reset();
        true
    }

    pub fn reset(&mut self) {
        self.next_delay_ms = 0;
        self.stopwatch.reset();
    }
}

impl std::fmt::Debug for RepeatTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatTimer")
            .field("stopwatch", &self.stopwatch)
            .field("next_delay_ms", &self.next_delay_ms)
            .finish_non_exhaustive()
    }
}
