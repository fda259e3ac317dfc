//! Pomodoro Screen - a single-screen work/rest timer
//!
//! Work and rest phases alternate automatically:
//! - 5 seconds of work
//! - 3 seconds of rest
//! - repeat until you quit

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use pomodoro_screen::cli::{Cli, Commands, RunArgs};
use pomodoro_screen::presentation::Display;
use pomodoro_screen::screen::ScreenController;
use pomodoro_screen::types::PomodoroConfig;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    let code = match execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            Display::show_error(&format!("{e:#}"));
            1
        }
    };

    // Exit without waiting on the blocking stdin reader.
    std::process::exit(code);
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_screen(&args).await?,
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Opens the timer screen on stdin/stdout.
async fn run_screen(args: &RunArgs) -> Result<()> {
    let config = PomodoroConfig::default();
    let mut display = Display::stdout(args.output_mode(), config);
    if args.no_color {
        display = display.with_ansi(false);
    }
    let mut controller = ScreenController::new(config, args.refresh_period(), display)
        .context("Invalid timer configuration")?;

    Display::show_controls();
    controller.run(BufReader::new(tokio::io::stdin())).await
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
