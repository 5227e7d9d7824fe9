//! userdesk binary entry point.
//!
//! Parses options, sets up file logging and the store, then runs the TUI
//! with the terminal in raw mode and restores it on exit.
//!
use anyhow::Result;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use userdesk::app::{self, AppState};
use userdesk::cli::{Args, init_logging};

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file, &args.log_level)?;

    let store = args.build_store()?;
    let mut state = AppState::new(store, &args.app_config());
    tracing::info!(operator = %state.operator, "starting userdesk");

    let mut terminal = init_terminal()?;
    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture).ok();
    terminal.show_cursor().ok();

    if let Err(err) = &res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    res
}
