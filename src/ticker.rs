//! Fixed-interval tick scheduling.
//!
//! The game loop asks its ticker how many ticks came due and runs the
//! simulation that many times. `IntervalTicker` follows the wall clock;
//! `ManualTicker` only moves when told to, which keeps tests deterministic.

use std::time::{Duration, Instant};

/// Scheduler driving the simulation at a fixed interval.
pub trait Ticker {
    /// Starts (or restarts) ticking every `interval`.
    fn start(&mut self, interval: Duration);

    /// Stops ticking; no ticks come due until the next `start`.
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Returns the number of ticks that came due since the last call.
    fn due_ticks(&mut self) -> u32;

    /// Invokes `on_tick` once for every due tick.
    fn run_due<F: FnMut()>(&mut self, mut on_tick: F)
    where
        Self: Sized,
    {
        for _ in 0..self.due_ticks() {
            on_tick();
        }
    }
}

/// Wall-clock ticker. Fires at most one tick per poll, so a stalled frame
/// never makes the snake jump several cells at once.
#[derive(Debug, Clone, Default)]
pub struct IntervalTicker {
    interval: Option<Duration>,
    last_tick: Option<Instant>,
}

impl IntervalTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn due_at(&mut self, now: Instant) -> u32 {
        let (Some(interval), Some(last_tick)) = (self.interval, self.last_tick) else {
            return 0;
        };

        if now.saturating_duration_since(last_tick) >= interval {
            self.last_tick = Some(now);
            1
        } else {
            0
        }
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.last_tick = Some(Instant::now());
    }

    fn stop(&mut self) {
        self.interval = None;
        self.last_tick = None;
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    fn due_ticks(&mut self) -> u32 {
        self.due_at(Instant::now())
    }
}

/// Test-controlled ticker advanced with [`ManualTicker::advance`].
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    interval: Option<Duration>,
    pending: Duration,
}

impl ManualTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves virtual time forward. Ignored while stopped.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.interval.is_some() {
            self.pending += elapsed;
        }
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.pending = Duration::ZERO;
    }

    fn stop(&mut self) {
        self.interval = None;
        self.pending = Duration::ZERO;
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    fn due_ticks(&mut self) -> u32 {
        let Some(interval) = self.interval.filter(|interval| !interval.is_zero()) else {
            return 0;
        };

        let due = self.pending.as_nanos() / interval.as_nanos();
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        self.pending -= interval * due;
        due
    }
}
