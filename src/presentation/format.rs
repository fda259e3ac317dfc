//! Countdown label and progress formatting.

use std::time::Duration;

use crate::types::{PomodoroConfig, TimerState};

/// Formats remaining time as `MM:SS`.
///
/// Minutes are rounded down and the seconds part is rounded up, so a
/// countdown shows `00:01` until the very last instant rather than `00:00`.
///
/// ```
/// use std::time::Duration;
/// use pomodoro_screen::presentation::format_time;
///
/// assert_eq!(format_time(Duration::from_millis(125_700)), "02:06");
/// assert_eq!(format_time(Duration::ZERO), "00:00");
/// ```
pub fn format_time(remaining: Duration) -> String {
    let whole = remaining.as_secs();
    let minutes = whole / 60;
    let seconds = whole % 60 + u64::from(remaining.subsec_nanos() > 0);
    format!("{:02}:{:02}", minutes, seconds)
}

/// Fraction of the current phase already elapsed, in `[0, 1]`.
pub fn progress_fraction(state: &TimerState, config: &PomodoroConfig) -> f64 {
    let total = config.duration_for(state.phase).as_secs_f64();
    if total <= 0.0 {
        return 0.0;
    }
    let elapsed = total - state.remaining.as_secs_f64();
    (elapsed / total).clamp(0.0, 1.0)
}
