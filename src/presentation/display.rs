//! Terminal renderer for the timer screen.
//!
//! Two output modes:
//! - `Text`: one status line (`▶ [######--------------] 00:03  Work`),
//!   colored and redrawn in place on a terminal, one plain line per change
//!   otherwise
//! - `Json`: one JSON object per change, for piping into other tools

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use serde_json::json;

use super::view::ScreenModel;
use crate::timer::TimerEvent;
use crate::types::{PomodoroConfig, TimerState};

/// Width of the text progress bar in cells.
const BAR_WIDTH: usize = 20;

const RESET: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";

/// How the screen is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Colored single-line screen
    #[default]
    Text,
    /// JSON lines
    Json,
}

// ============================================================================
// Display
// ============================================================================

/// Renders timer snapshots to a writer (stdout by default).
pub struct Display {
    mode: OutputMode,
    config: PomodoroConfig,
    /// Colors and in-place redraw
    ansi: bool,
    out: Box<dyn Write + Send>,
}

impl Display {
    /// Creates a renderer writing to stdout.
    ///
    /// ANSI output is enabled only when stdout is a terminal.
    pub fn stdout(mode: OutputMode, config: PomodoroConfig) -> Self {
        let ansi = io::stdout().is_terminal();
        Self::with_writer(mode, config, io::stdout()).with_ansi(ansi)
    }

    /// Creates a renderer writing plain text to the given sink.
    pub fn with_writer(
        mode: OutputMode,
        config: PomodoroConfig,
        out: impl Write + Send + 'static,
    ) -> Self {
        Self {
            mode,
            config,
            ansi: false,
            out: Box::new(out),
        }
    }

    /// Enables or disables colors and in-place redraw.
    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Returns true if ANSI escapes are written.
    pub fn is_ansi(&self) -> bool {
        self.ansi
    }

    /// Returns the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Renders the initial snapshot, before any event arrives.
    pub fn show_state(&mut self, state: &TimerState) -> Result<()> {
        match self.mode {
            OutputMode::Text => {
                let model = ScreenModel::from_state(state, &self.config);
                self.write_text(&model)?;
            }
            OutputMode::Json => {
                let value = json!({ "event": "snapshot", "state": state });
                writeln!(self.out, "{value}")?;
            }
        }
        self.out.flush().context("Failed to flush screen output")
    }

    /// Renders one timer event.
    pub fn show_event(&mut self, event: &TimerEvent) -> Result<()> {
        match self.mode {
            OutputMode::Text => {
                let model = ScreenModel::from_state(event.state(), &self.config);
                self.write_text(&model)?;
            }
            OutputMode::Json => {
                let line = serde_json::to_string(event).context("Failed to encode event")?;
                writeln!(self.out, "{line}")?;
            }
        }
        self.out.flush().context("Failed to flush screen output")
    }

    /// Moves past the redrawn line so the shell prompt starts clean.
    pub fn finish(&mut self) -> Result<()> {
        if self.mode == OutputMode::Text && self.ansi {
            writeln!(self.out)?;
        }
        self.out.flush().context("Failed to flush screen output")
    }

    fn write_text(&mut self, model: &ScreenModel) -> io::Result<()> {
        let line = Self::format_line(model, self.ansi);
        if self.ansi {
            write!(self.out, "{CLEAR_LINE}{line}")
        } else {
            writeln!(self.out, "{line}")
        }
    }

    /// Formats the one-line text screen for a model.
    pub fn format_line(model: &ScreenModel, ansi: bool) -> String {
        let filled = ((model.progress * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let done = "#".repeat(filled);
        let todo = "-".repeat(BAR_WIDTH - filled);
        let icon = model.icon.glyph();

        if !ansi {
            return format!("{icon} [{done}{todo}] {}  {}", model.label, model.phase);
        }

        let stroke = model.palette.stroke.ansi_fg();
        let track = model.palette.background.ansi_fg();

        format!(
            "{stroke}{icon}{RESET} [{stroke}{done}{RESET}{track}{todo}{RESET}] {label}  {phase}",
            label = model.label,
            phase = model.phase,
        )
    }

    /// Prints the key bindings.
    pub fn show_controls() {
        eprintln!("Enter: start/pause   q: quit");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::types::{Phase, RunStatus};

    /// Cloneable in-memory sink.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn running_rest(remaining_ms: u64) -> TimerState {
        TimerState {
            phase: Phase::Rest,
            remaining: Duration::from_millis(remaining_ms),
            status: RunStatus::Running,
        }
    }

    mod format_line_tests {
        use super::*;

        #[test]
        fn test_initial_line() {
            let config = PomodoroConfig::default();
            let model = ScreenModel::from_state(&TimerState::new(&config), &config);

            let line = strip_ansi(&Display::format_line(&model, true));
            assert_eq!(line, "▶ [--------------------] 00:05  Work");
        }

        #[test]
        fn test_half_rest_line() {
            let config = PomodoroConfig::default();
            let model = ScreenModel::from_state(&running_rest(1_500), &config);

            let line = strip_ansi(&Display::format_line(&model, true));
            assert_eq!(line, "⏸ [##########----------] 00:02  Rest");
        }

        #[test]
        fn test_line_uses_phase_color() {
            let config = PomodoroConfig::default();
            let model = ScreenModel::from_state(&running_rest(1_500), &config);

            let line = Display::format_line(&model, true);
            assert!(line.starts_with("\x1b[38;2;97;197;163m"));
        }

        #[test]
        fn test_plain_line_has_no_escapes() {
            let config = PomodoroConfig::default();
            let model = ScreenModel::from_state(&running_rest(1_500), &config);

            let line = Display::format_line(&model, false);
            assert!(!line.contains('\x1b'));
            assert_eq!(line, "⏸ [##########----------] 00:02  Rest");
        }
    }

    mod output_tests {
        use super::*;

        #[test]
        fn test_text_event_redraws_line() {
            let buffer = SharedBuffer::default();
            let mut display =
                Display::with_writer(OutputMode::Text, PomodoroConfig::default(), buffer.clone())
                    .with_ansi(true);

            display
                .show_event(&TimerEvent::TimeChanged {
                    state: running_rest(1_500),
                })
                .unwrap();
            display.finish().unwrap();

            let text = buffer.contents();
            assert!(text.starts_with(CLEAR_LINE));
            assert!(text.ends_with('\n'));
            assert!(strip_ansi(&text).contains("00:02  Rest"));
        }

        #[test]
        fn test_text_to_plain_writer_has_no_escapes() {
            let buffer = SharedBuffer::default();
            let config = PomodoroConfig::default();
            let mut display = Display::with_writer(OutputMode::Text, config, buffer.clone());
            assert!(!display.is_ansi());

            display.show_state(&TimerState::new(&config)).unwrap();
            display
                .show_event(&TimerEvent::TimeChanged {
                    state: running_rest(1_500),
                })
                .unwrap();
            display.finish().unwrap();

            let text = buffer.contents();
            assert!(!text.contains('\x1b'));
            assert!(!text.contains('\r'));
            assert_eq!(
                text.lines().collect::<Vec<_>>(),
                [
                    "▶ [--------------------] 00:05  Work",
                    "⏸ [##########----------] 00:02  Rest",
                ]
            );
        }

        #[test]
        fn test_json_snapshot_and_event() {
            let buffer = SharedBuffer::default();
            let config = PomodoroConfig::default();
            let mut display = Display::with_writer(OutputMode::Json, config, buffer.clone());

            display.show_state(&TimerState::new(&config)).unwrap();
            display
                .show_event(&TimerEvent::PhaseChanged {
                    state: running_rest(3_000),
                })
                .unwrap();
            display.finish().unwrap();

            let text = buffer.contents();
            let lines: Vec<serde_json::Value> = text
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect();

            assert_eq!(lines.len(), 2);
            assert_eq!(lines[0]["event"], "snapshot");
            assert_eq!(lines[0]["state"]["status"], "idle");
            assert_eq!(lines[1]["event"], "phase_changed");
            assert_eq!(lines[1]["state"]["phase"], "rest");
            assert_eq!(lines[1]["state"]["remainingSeconds"], 3.0);
        }

        #[test]
        fn test_show_error() {
            Display::show_error("Test error message");
        }
    }
}
