//! Core data types for the Pomodoro screen.
//!
//! This module defines the data structures used for:
//! - Phase and run status of the timer
//! - Timer configuration with validation
//! - The observable timer state snapshot

mod error;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use error::ConfigError;

// ============================================================================
// Phase
// ============================================================================

/// One of the two alternating timer modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Focused work session
    Work,
    /// Rest between work sessions
    Rest,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Rest => "rest",
        }
    }

    /// Returns the phase that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Phase::Work => Phase::Rest,
            Phase::Rest => Phase::Work,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Work
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Work => f.write_str("Work"),
            Phase::Rest => f.write_str("Rest"),
        }
    }
}

// ============================================================================
// RunStatus
// ============================================================================

/// Whether the countdown is idle, paused, or running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Never started
    Idle,
    /// Started, then paused
    Paused,
    /// Counting down
    Running,
}

impl RunStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Paused => "paused",
            RunStatus::Running => "running",
        }
    }

    /// Returns true if the countdown is advancing.
    pub fn is_running(&self) -> bool {
        matches!(self, RunStatus::Running)
    }
}

impl Default for RunStatus {
    fn default() -> Self {
        RunStatus::Idle
    }
}

// ============================================================================
// PomodoroConfig
// ============================================================================

/// Default work duration (sample configuration).
pub const DEFAULT_WORK_DURATION: Duration = Duration::from_secs(5);

/// Default rest duration (sample configuration).
pub const DEFAULT_REST_DURATION: Duration = Duration::from_secs(3);

/// Phase durations, fixed when the timer is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroConfig {
    /// Length of a work phase
    #[serde(rename = "workSeconds", with = "duration_secs")]
    pub work_duration: Duration,
    /// Length of a rest phase
    #[serde(rename = "restSeconds", with = "duration_secs")]
    pub rest_duration: Duration,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_duration: DEFAULT_WORK_DURATION,
            rest_duration: DEFAULT_REST_DURATION,
        }
    }
}

impl PomodoroConfig {
    /// Creates a new configuration with the specified work duration.
    pub fn with_work_duration(mut self, duration: Duration) -> Self {
        self.work_duration = duration;
        self
    }

    /// Creates a new configuration with the specified rest duration.
    pub fn with_rest_duration(mut self, duration: Duration) -> Self {
        self.rest_duration = duration;
        self
    }

    /// Returns the initial duration of the given phase.
    pub fn duration_for(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work_duration,
            Phase::Rest => self.rest_duration,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroDuration` if either phase has no length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for phase in [Phase::Work, Phase::Rest] {
            if self.duration_for(phase).is_zero() {
                return Err(ConfigError::ZeroDuration { phase });
            }
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Snapshot of the timer: phase, remaining time and run status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase
    pub phase: Phase,
    /// Time left in the current phase
    #[serde(rename = "remainingSeconds", with = "duration_secs")]
    pub remaining: Duration,
    /// Run status
    pub status: RunStatus,
}

impl TimerState {
    /// Creates the initial state: an idle work phase at full length.
    pub fn new(config: &PomodoroConfig) -> Self {
        Self {
            phase: Phase::Work,
            remaining: config.duration_for(Phase::Work),
            status: RunStatus::Idle,
        }
    }

    /// Returns true if the countdown is advancing.
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Returns true if the timer was started and then paused.
    pub fn is_paused(&self) -> bool {
        self.status == RunStatus::Paused
    }

    /// Returns true if the timer has never been started.
    pub fn is_idle(&self) -> bool {
        self.status == RunStatus::Idle
    }
}

/// Serializes a `Duration` as fractional seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
