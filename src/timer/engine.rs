//! Timer engine for the Pomodoro screen.
//!
//! This module provides the core state machine:
//! - Run status transitions (Idle → Running ⇄ Paused)
//! - Countdown driven by externally supplied elapsed time
//! - Atomic Work ⇄ Rest rollover when a phase runs out
//! - Change events for subscribers

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::clock::{IntervalTickSource, TickSource};
use crate::types::{ConfigError, PomodoroConfig, RunStatus, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Change notifications delivered to subscribers.
///
/// Every event carries the snapshot taken after the change was fully applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// Run status changed (started, paused or resumed)
    StatusChanged {
        /// State after the change
        state: TimerState,
    },
    /// Phase rolled over
    PhaseChanged {
        /// State after the rollover
        state: TimerState,
    },
    /// Remaining time changed
    TimeChanged {
        /// State after the change
        state: TimerState,
    },
}

impl TimerEvent {
    /// Returns the snapshot carried by this event.
    pub fn state(&self) -> &TimerState {
        match self {
            TimerEvent::StatusChanged { state }
            | TimerEvent::PhaseChanged { state }
            | TimerEvent::TimeChanged { state } => state,
        }
    }
}

// ============================================================================
// PomodoroTimer
// ============================================================================

/// Work/rest timer state machine.
///
/// Owns the [`TimerState`] exclusively; callers read snapshots through
/// [`current_state`](Self::current_state) or subscribe to [`TimerEvent`]s.
pub struct PomodoroTimer<C: TickSource> {
    config: PomodoroConfig,
    state: TimerState,
    clock: C,
    subscribers: Vec<mpsc::UnboundedSender<TimerEvent>>,
}

impl<C: TickSource> PomodoroTimer<C> {
    /// Creates an idle timer at the start of a work phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: PomodoroConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            state: TimerState::new(&config),
            config,
            clock,
            subscribers: Vec::new(),
        })
    }

    /// Registers a new subscriber.
    ///
    /// Dropping the receiver unsubscribes; it is pruned on the next event.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<TimerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Handles the single start/pause control.
    ///
    /// Starts an idle timer, resumes a paused one, pauses a running one.
    pub fn toggle_start_stop(&mut self) {
        if self.state.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Starts or resumes the countdown.
    ///
    /// Returns false (and does nothing) if the timer is already running.
    pub fn start(&mut self) -> bool {
        let previous = self.state.status;
        if previous.is_running() {
            debug!("Start ignored, timer already running");
            return false;
        }

        self.state.status = RunStatus::Running;
        self.clock.start();

        info!(
            from = previous.as_str(),
            phase = self.state.phase.as_str(),
            remaining_secs = self.state.remaining.as_secs_f64(),
            "Timer running"
        );
        self.notify(TimerEvent::StatusChanged {
            state: self.state.clone(),
        });
        true
    }

    /// Pauses the countdown, keeping the remaining time.
    ///
    /// Time elapsed since the clock's last tick is applied first, while still
    /// running, so it can complete the phase.
    ///
    /// Returns false (and does nothing) unless the timer is running.
    pub fn pause(&mut self) -> bool {
        if !self.state.is_running() {
            debug!(status = self.state.status.as_str(), "Pause ignored, timer not running");
            return false;
        }

        let partial = self.clock.take_partial();
        if !partial.is_zero() {
            self.tick(partial);
        }

        self.state.status = RunStatus::Paused;
        self.clock.stop();

        info!(
            phase = self.state.phase.as_str(),
            remaining_secs = self.state.remaining.as_secs_f64(),
            "Timer paused"
        );
        self.notify(TimerEvent::StatusChanged {
            state: self.state.clone(),
        });
        true
    }

    /// Advances the countdown by `elapsed`.
    ///
    /// When the phase runs out it rolls over to the other phase at full
    /// length; any surplus elapsed time is discarded. Subscribers then get
    /// `PhaseChanged` followed by `TimeChanged`, both carrying the
    /// post-rollover state. Ticks while idle or paused are ignored.
    ///
    /// Returns true if the phase rolled over.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.state.is_running() {
            debug!(status = self.state.status.as_str(), "Tick ignored, timer not running");
            return false;
        }

        match self.state.remaining.checked_sub(elapsed) {
            Some(remaining) if !remaining.is_zero() => {
                self.state.remaining = remaining;
                self.notify(TimerEvent::TimeChanged {
                    state: self.state.clone(),
                });
                false
            }
            _ => {
                self.roll_over();
                true
            }
        }
    }

    /// Flips the phase and resets the countdown in one step.
    fn roll_over(&mut self) {
        let finished = self.state.phase;
        let next = finished.next();

        self.state.phase = next;
        self.state.remaining = self.config.duration_for(next);
        self.clock.restart();

        info!(
            finished = finished.as_str(),
            started = next.as_str(),
            remaining_secs = self.state.remaining.as_secs_f64(),
            "Phase rolled over"
        );

        let snapshot = self.state.clone();
        self.notify(TimerEvent::PhaseChanged {
            state: snapshot.clone(),
        });
        self.notify(TimerEvent::TimeChanged { state: snapshot });
    }

    fn notify(&mut self, event: TimerEvent) {
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());

        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            debug!(dropped, "Pruned closed subscribers");
        }
    }

    /// Returns the current timer state.
    pub fn current_state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the configuration the timer was built with.
    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    /// Returns the clock source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns a mutable reference to the clock (for testing).
    #[cfg(test)]
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

impl PomodoroTimer<IntervalTickSource> {
    /// Waits for the next wall-clock tick and returns the elapsed time.
    ///
    /// Never completes while the timer is idle or paused.
    pub async fn next_tick(&mut self) -> Duration {
        self.clock.next_tick().await
    }
}

// ============================================================================
// Tests
// ============================================================================
