//! Pomodoro Screen Library
//!
//! A single-screen Pomodoro work/rest timer. It includes:
//! - A timer engine that alternates Work and Rest phases under a start/pause control
//! - Clock sources that feed real elapsed time into the engine
//! - A presentation layer (countdown label, progress ring, action icon, colors)
//! - A screen controller and CLI that run it in a terminal

pub mod cli;
pub mod presentation;
pub mod screen;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use presentation::{format_time, Display, OutputMode, ScreenModel};
pub use screen::{Command, ScreenController};
pub use timer::{IntervalTickSource, MockTickSource, PomodoroTimer, TickSource, TimerEvent};
pub use types::{ConfigError, Phase, PomodoroConfig, RunStatus, TimerState};
