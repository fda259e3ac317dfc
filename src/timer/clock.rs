//! Clock sources that drive the timer's countdown.
//!
//! The timer never reads the wall clock itself. It asks a [`TickSource`] to
//! start, stop or re-arm, and something else feeds the elapsed time back in
//! through `PomodoroTimer::tick`. In production that is
//! [`IntervalTickSource`]; tests use [`MockTickSource`] and call `tick`
//! directly with whatever durations they need.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Shortest refresh period accepted by [`IntervalTickSource`].
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Default refresh period for the terminal screen.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

// ============================================================================
// TickSource
// ============================================================================

/// A periodic clock that can be started, stopped and re-armed.
///
/// Implementations must hold at most one active periodic source: calling
/// `start` or `restart` while already active replaces the running source
/// instead of adding a second one.
pub trait TickSource {
    /// Begins (or resumes) emitting ticks.
    fn start(&mut self);

    /// Stops emitting ticks.
    fn stop(&mut self);

    /// Re-arms the source from now, discarding any partial period.
    fn restart(&mut self);

    /// Returns the time elapsed since the last emitted tick and marks it as
    /// consumed. Zero while stopped.
    fn take_partial(&mut self) -> Duration;

    /// Returns true if ticks are currently being emitted.
    fn is_active(&self) -> bool;
}

// ============================================================================
// IntervalTickSource
// ============================================================================

/// Tokio interval that reports real elapsed time between ticks.
#[derive(Debug)]
pub struct IntervalTickSource {
    period: Duration,
    interval: Option<Interval>,
    last_tick: Instant,
}

impl IntervalTickSource {
    /// Creates a stopped source with the given refresh period.
    ///
    /// Periods below [`MIN_TICK_PERIOD`] are raised to it.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_TICK_PERIOD),
            interval: None,
            last_tick: Instant::now(),
        }
    }

    /// Returns the refresh period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next tick and returns the time elapsed since the previous
    /// one (or since the source was last armed).
    ///
    /// While stopped this never completes, so it can sit in a `select!` branch
    /// unconditionally. Cancel safe.
    pub async fn next_tick(&mut self) -> Duration {
        let Some(interval) = self.interval.as_mut() else {
            return std::future::pending().await;
        };
        interval.tick().await;

        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        elapsed
    }

    fn arm(&mut self) {
        let now = Instant::now();
        let mut interval = interval_at(now + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Replacing the Option drops any previous interval.
        self.interval = Some(interval);
        self.last_tick = now;
    }
}

impl Default for IntervalTickSource {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl TickSource for IntervalTickSource {
    fn start(&mut self) {
        if self.interval.is_some() {
            debug!("Clock already active, re-arming");
        }
        self.arm();
        debug!(period_ms = self.period.as_millis() as u64, "Clock started");
    }

    fn stop(&mut self) {
        if self.interval.take().is_some() {
            debug!("Clock stopped");
        }
    }

    fn restart(&mut self) {
        self.arm();
        debug!("Clock restarted");
    }

    fn take_partial(&mut self) -> Duration {
        if self.interval.is_none() {
            return Duration::ZERO;
        }
        let now = Instant::now();
        let partial = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        partial
    }

    fn is_active(&self) -> bool {
        self.interval.is_some()
    }
}

// ============================================================================
// MockTickSource
// ============================================================================

/// Mock clock for testing. Records every control call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MockTickSource {
    active: bool,
    partial: Duration,
    start_count: u32,
    stop_count: u32,
    restart_count: u32,
}

impl MockTickSource {
    /// Creates a stopped mock with no pending partial period.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time reported by the next `take_partial` call.
    pub fn set_partial(&mut self, partial: Duration) {
        self.partial = partial;
    }

    /// Number of `start` calls.
    #[must_use]
    pub fn start_count(&self) -> u32 {
        self.start_count
    }

    /// Number of `stop` calls.
    #[must_use]
    pub fn stop_count(&self) -> u32 {
        self.stop_count
    }

    /// Number of `restart` calls.
    #[must_use]
    pub fn restart_count(&self) -> u32 {
        self.restart_count
    }
}

impl TickSource for MockTickSource {
    fn start(&mut self) {
        self.active = true;
        self.start_count += 1;
    }

    fn stop(&mut self) {
        self.active = false;
        self.stop_count += 1;
    }

    fn restart(&mut self) {
        self.active = true;
        self.restart_count += 1;
    }

    fn take_partial(&mut self) -> Duration {
        std::mem::take(&mut self.partial)
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

// ============================================================================
// Tests
// ============================================================================
