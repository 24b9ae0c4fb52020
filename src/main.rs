//! user-directory binary entry point.
//!
//! Parses the command line, sets up logging, initializes the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.
//!
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use user_directory::api::DEFAULT_ENDPOINT;
use user_directory::app::{self, keymap::Keymap};
use user_directory::config::Config;
use user_directory::logging;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let config = Config::parse();
    let log_path = config.log_path();
    if let Err(err) = logging::init_tracing(&config.log_level, &log_path) {
        eprintln!("logging disabled: {err:#}");
    }
    tracing::info!(endpoint = DEFAULT_ENDPOINT, "starting user-directory");
    let keymap = Keymap::load(config.keybinds.as_deref());

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &config, &keymap);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!("application error: {err:#}");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
