//! Screen controller: wires input, clock, timer and renderer together.
//!
//! Everything runs on one task. A single `select!` loop waits for whichever
//! comes first: a line of user input, a clock tick, a timer event, or Ctrl-C.
//! The timer is only ever touched from this loop, so nothing is locked.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::presentation::Display;
use crate::timer::{IntervalTickSource, PomodoroTimer, TimerEvent};
use crate::types::{ConfigError, PomodoroConfig};

// ============================================================================
// Command
// ============================================================================

/// User input understood by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The start/pause control
    Toggle,
    /// Leave the screen
    Quit,
}

impl Command {
    /// Parses one line of input. Empty lines toggle.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "s" | "space" | "toggle" => Some(Command::Toggle),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

// ============================================================================
// ScreenController
// ============================================================================

/// Owns the timer for the lifetime of the screen and renders its changes.
pub struct ScreenController {
    timer: PomodoroTimer<IntervalTickSource>,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    display: Display,
}

impl ScreenController {
    /// Builds the controller and subscribes the renderer to the timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: PomodoroConfig,
        refresh_period: Duration,
        display: Display,
    ) -> Result<Self, ConfigError> {
        let mut timer = PomodoroTimer::new(config, IntervalTickSource::new(refresh_period))?;
        let events = timer.subscribe();

        Ok(Self {
            timer,
            events,
            display,
        })
    }

    /// Returns the timer.
    pub fn timer(&self) -> &PomodoroTimer<IntervalTickSource> {
        &self.timer
    }

    /// Runs the screen until the user quits, input closes, or Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        info!("Screen started");
        self.display.show_state(self.timer.current_state())?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        info!("Input closed");
                        break;
                    };
                    match Command::parse(&line) {
                        Some(Command::Toggle) => self.timer.toggle_start_stop(),
                        Some(Command::Quit) => {
                            info!("Quit requested");
                            break;
                        }
                        None => warn!(input = line.trim(), "Unrecognized command"),
                    }
                }
                elapsed = self.timer.next_tick() => {
                    self.timer.tick(elapsed);
                }
                Some(event) = self.events.recv() => {
                    debug!(?event, "Rendering event");
                    self.display.show_event(&event)?;
                }
                result = &mut ctrl_c => {
                    result.context("Failed to listen for Ctrl-C")?;
                    info!("Interrupted");
                    break;
                }
            }
        }

        while let Ok(event) = self.events.try_recv() {
            self.display.show_event(&event)?;
        }
        self.display.finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod command_tests {
        use super::*;

        #[test]
        fn test_parse_toggle() {
            assert_eq!(Command::parse(""), Some(Command::Toggle));
            assert_eq!(Command::parse("  "), Some(Command::Toggle));
            assert_eq!(Command::parse("s"), Some(Command::Toggle));
            assert_eq!(Command::parse("Space"), Some(Command::Toggle));
        }

        #[test]
        fn test_parse_quit() {
            assert_eq!(Command::parse("q"), Some(Command::Quit));
            assert_eq!(Command::parse("QUIT\n"), Some(Command::Quit));
            assert_eq!(Command::parse("exit"), Some(Command::Quit));
        }

        #[test]
        fn test_parse_unknown() {
            assert_eq!(Command::parse("reset"), None);
        }
    }

    mod controller_tests {
        use super::*;
        use std::io::{self, Write};
        use std::sync::{Arc, Mutex};

        use tokio::io::{AsyncWriteExt, BufReader};
        use tokio::time::sleep;

        use crate::presentation::OutputMode;
        use crate::types::{Phase, RunStatus};

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

        fn create_controller(buffer: &SharedBuffer) -> ScreenController {
            let config = PomodoroConfig::default();
            let display = Display::with_writer(OutputMode::Json, config, buffer.clone());
            ScreenController::new(config, Duration::from_millis(100), display).unwrap()
        }

        #[tokio::test(start_paused = true)]
        async fn test_quit_before_start_stays_idle() {
            let buffer = SharedBuffer::default();
            let mut controller = create_controller(&buffer);

            controller.run(BufReader::new(&b"q\n"[..])).await.unwrap();

            assert_eq!(controller.timer().current_state().status, RunStatus::Idle);
            assert!(buffer.contents().contains("\"snapshot\""));
        }

        #[tokio::test(start_paused = true)]
        async fn test_toggle_then_eof_renders_status_change() {
            let buffer = SharedBuffer::default();
            let mut controller = create_controller(&buffer);

            controller.run(BufReader::new(&b"\n"[..])).await.unwrap();

            assert_eq!(
                controller.timer().current_state().status,
                RunStatus::Running
            );
            assert!(buffer.contents().contains("\"status_changed\""));
        }

        #[tokio::test(start_paused = true)]
        async fn test_clock_drives_countdown_and_rollover() {
            let buffer = SharedBuffer::default();
            let controller = create_controller(&buffer);
            let (mut writer, reader) = tokio::io::duplex(64);

            let handle = tokio::spawn(async move {
                let mut controller = controller;
                let result = controller.run(BufReader::new(reader)).await;
                (controller, result)
            });

            writer.write_all(b"\n").await.unwrap();
            sleep(Duration::from_millis(6_050)).await;
            writer.write_all(b"q\n").await.unwrap();

            let (controller, result) = handle.await.unwrap();
            result.unwrap();

            let state = controller.timer().current_state();
            assert_eq!(state.status, RunStatus::Running);
            assert_eq!(state.phase, Phase::Rest);
            assert!(state.remaining < Duration::from_secs(3));

            let output = buffer.contents();
            assert!(output.contains("\"time_changed\""));
            assert!(output.contains("\"phase_changed\""));
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_stops_countdown() {
            let buffer = SharedBuffer::default();
            let controller = create_controller(&buffer);
            let (mut writer, reader) = tokio::io::duplex(64);

            let handle = tokio::spawn(async move {
                let mut controller = controller;
                let result = controller.run(BufReader::new(reader)).await;
                (controller, result)
            });

            writer.write_all(b"\n").await.unwrap();
            sleep(Duration::from_millis(1_050)).await;
            writer.write_all(b"\n").await.unwrap();
            // Long enough to roll over twice if the clock kept running.
            sleep(Duration::from_secs(10)).await;
            writer.write_all(b"q\n").await.unwrap();

            let (controller, result) = handle.await.unwrap();
            result.unwrap();

            let state = controller.timer().current_state();
            assert_eq!(state.status, RunStatus::Paused);
            assert_eq!(state.phase, Phase::Work);
            // Ten full ticks plus the 50ms since the last one.
            assert_eq!(state.remaining, Duration::from_millis(3_950));
            assert!(!buffer.contents().contains("\"phase_changed\""));
        }

        #[tokio::test(start_paused = true)]
        async fn test_toggling_faster_than_refresh_still_counts_down() {
            let buffer = SharedBuffer::default();
            let controller = create_controller(&buffer);
            let (mut writer, reader) = tokio::io::duplex(64);

            let handle = tokio::spawn(async move {
                let mut controller = controller;
                let result = controller.run(BufReader::new(reader)).await;
                (controller, result)
            });

            for _ in 0..3 {
                writer.write_all(b"\n").await.unwrap();
                sleep(Duration::from_millis(30)).await;
                writer.write_all(b"\n").await.unwrap();
                sleep(Duration::from_millis(500)).await;
            }
            writer.write_all(b"q\n").await.unwrap();

            let (controller, result) = handle.await.unwrap();
            result.unwrap();

            let state = controller.timer().current_state();
            assert_eq!(state.status, RunStatus::Paused);
            assert_eq!(state.remaining, Duration::from_millis(4_910));
        }
    }
}
