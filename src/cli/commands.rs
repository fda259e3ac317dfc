//! Command definitions for the Pomodoro screen CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::presentation::OutputMode;
use crate::timer::DEFAULT_TICK_PERIOD;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Screen - a work/rest timer in your terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-screen",
    version,
    about = "Single-screen Pomodoro work/rest timer",
    long_about = "A single-screen Pomodoro timer. Work and rest phases alternate \
                  automatically; one control starts, pauses and resumes the countdown.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the timer screen (Enter toggles start/pause, q quits)
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Screen refresh period in milliseconds (1-1000)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_TICK_PERIOD.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..=1000)
    )]
    pub refresh_ms: u64,

    /// Print every change as a JSON line instead of drawing the screen
    #[arg(short, long)]
    pub json: bool,

    /// Plain text output without colors, even on a terminal
    #[arg(long)]
    pub no_color: bool,
}

impl RunArgs {
    /// Returns the refresh period.
    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    /// Returns the output mode.
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
