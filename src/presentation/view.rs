//! Screen model: what the single timer screen shows for a given state.
//!
//! This module is renderer-agnostic. It turns a [`TimerState`] into a label,
//! a progress value, an action icon and the phase colors; the terminal
//! renderer in `display` (or any other front-end) only draws the result.

use serde::Serialize;

use super::format::{format_time, progress_fraction};
use crate::types::{Phase, PomodoroConfig, RunStatus, TimerState};

// ============================================================================
// Colors
// ============================================================================

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// ANSI escape that sets this color as the terminal foreground.
    pub fn ansi_fg(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

const WORK_STROKE: Rgb = Rgb::new(252, 140, 128);
const WORK_BACKGROUND: Rgb = Rgb::new(250, 222, 219);
const REST_STROKE: Rgb = Rgb::new(97, 197, 163);
const REST_BACKGROUND: Rgb = Rgb::new(176, 227, 208);

/// Progress ring colors for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhasePalette {
    /// Filled part of the ring; also tints the action control
    pub stroke: Rgb,
    /// Unfilled track of the ring
    pub background: Rgb,
}

impl PhasePalette {
    /// Returns the palette for a phase.
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Work => Self {
                stroke: WORK_STROKE,
                background: WORK_BACKGROUND,
            },
            Phase::Rest => Self {
                stroke: REST_STROKE,
                background: REST_BACKGROUND,
            },
        }
    }
}

// ============================================================================
// ActionIcon
// ============================================================================

/// Icon on the start/pause control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionIcon {
    /// Shown while idle or paused
    Play,
    /// Shown while running
    Pause,
}

impl ActionIcon {
    /// Returns the icon for a run status.
    pub fn for_status(status: RunStatus) -> Self {
        if status.is_running() {
            ActionIcon::Pause
        } else {
            ActionIcon::Play
        }
    }

    /// Returns the icon name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionIcon::Play => "play",
            ActionIcon::Pause => "pause",
        }
    }

    /// Returns the terminal glyph.
    pub fn glyph(&self) -> &'static str {
        match self {
            ActionIcon::Play => "▶",
            ActionIcon::Pause => "⏸",
        }
    }
}

// ============================================================================
// ScreenModel
// ============================================================================

/// Everything the screen renders for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenModel {
    pub phase: Phase,
    pub status: RunStatus,
    /// Countdown label, `MM:SS`
    pub label: String,
    /// Ring fill in `[0, 1]`
    pub progress: f64,
    pub icon: ActionIcon,
    pub palette: PhasePalette,
}

impl ScreenModel {
    /// Builds the screen model for a state.
    pub fn from_state(state: &TimerState, config: &PomodoroConfig) -> Self {
        Self {
            phase: state.phase,
            status: state.status,
            label: format_time(state.remaining),
            progress: progress_fraction(state, config),
            icon: ActionIcon::for_status(state.status),
            palette: PhasePalette::for_phase(state.phase),
        }
    }
}
