//! glyphwalk - move a single glyph around the terminal
//!
//! Takes over the terminal, draws a marker in the middle of the screen and
//! moves it one cell per arrow key. The marker never leaves the screen and
//! never covers the hint line on row 0.
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | Arrow keys | Move the marker |
//! | q / Q | Quit |
//! | Ctrl+C | Quit |
//!
//! The terminal is restored on every exit path.

mod config;
mod core;
mod ui;

use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;
use crate::core::session::Session;
use crate::ui::RawTerminal;

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("glyphwalk {}", VERSION);
}

fn print_help() {
    eprintln!("glyphwalk {} - Move a glyph around the terminal", VERSION);
    eprintln!();
    eprintln!("Usage: glyphwalk [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  Arrow keys            Move the marker");
    eprintln!("  q, Q, Ctrl+C          Quit");
    eprintln!();
    eprintln!("Configuration: ~/.glyphwalk/config.toml");
    eprintln!("Log file:      ~/.glyphwalk/glyphwalk.log");
}

/// What the command line asked for
#[derive(Debug, PartialEq)]
enum Command {
    Run,
    Help,
    Version,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, String> {
    let mut command = Command::Run;
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--version" => command = Command::Version,
            other => return Err(format!("Unknown argument: {}. Use -h for help.", other)),
        }
    }
    Ok(command)
}

/// Route tracing output to `~/.glyphwalk/glyphwalk.log`.
///
/// The screen belongs to the session, so nothing is logged to the terminal.
/// If the file can't be opened, logging stays off.
fn init_logging(config: &Config) {
    let log_path = crate::config::app_dir()
        .map(|dir| dir.join("glyphwalk.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("glyphwalk.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> anyhow::Result<()> {
    let command = match parse_args(env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };
    match command {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            print_version();
            return Ok(());
        }
        Command::Run => {}
    }

    // Problems are reported before the screen is taken over
    let (config, config_error) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => {
            eprintln!("Warning: {} (using defaults)", e);
            (Config::default(), Some(e))
        }
    };

    init_logging(&config);
    info!("glyphwalk {} starting...", VERSION);
    if let Some(e) = config_error {
        warn!("Ignoring config: {}", e);
    }

    let bounds = RawTerminal::size()?;
    info!("Terminal size: {}x{}", bounds.cols, bounds.rows);

    if let Err(e) = Session::new(bounds, &config).run() {
        error!("Session failed: {}", e);
        return Err(e.into());
    }

    info!("glyphwalk exiting");
    Ok(())
}
