//! Timer module for the Pomodoro screen.
//!
//! This module contains the countdown core:
//! - `engine`: the work/rest state machine and its change events
//! - `clock`: tick sources that feed elapsed time into the engine

pub mod clock;
pub mod engine;

pub use clock::{IntervalTickSource, MockTickSource, TickSource, DEFAULT_TICK_PERIOD};
pub use engine::{PomodoroTimer, TimerEvent};
