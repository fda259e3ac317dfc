//! CLI module for the Pomodoro screen.
//!
//! - `commands`: Command definitions using clap derive

pub mod commands;

pub use commands::{Cli, Commands, RunArgs};
