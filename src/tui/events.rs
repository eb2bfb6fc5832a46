//! Terminal input polling
//!
//! Runs as its own task and forwards key presses to the UI loop.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Quit,
}

/// Whether `key` is the global quit chord (Ctrl+Q)
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub async fn handle_events(tx: mpsc::UnboundedSender<InputEvent>) -> anyhow::Result<()> {
    loop {
        if event::poll(POLL_INTERVAL)? {
            let input = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press && is_quit(&key) => {
                    InputEvent::Quit
                }
                Event::Key(key) if key.kind == KeyEventKind::Press => InputEvent::Key(key),
                Event::Resize(cols, rows) => InputEvent::Resize(cols, rows),
                _ => continue,
            };
            let quit = input == InputEvent::Quit;
            if tx.send(input).is_err() || quit {
                break;
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    Ok(())
}
