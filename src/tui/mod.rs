//! Terminal User Interface
//!
//! The interactive theme panel. Runs on a current-thread tokio runtime: a
//! spawned task polls the terminal and the UI loop owns every theme handle.

pub mod app;
pub mod events;
pub mod tabs;
pub mod ui;

use crate::core::app::Session;
use anyhow::Result;

/// Run the TUI for the session until the user quits
pub fn run_app_with_tui(session: Session) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_tui(session))
}

pub async fn run_tui(session: Session) -> Result<()> {
    use crossterm::{
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{backend::CrosstermBackend, Terminal};
    use std::io;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = app::App::new(session);
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
