use super::TabAction;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Default)]
pub struct HelpState {
    pub scroll_offset: u16,
}

impl HelpState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Handle key events for the Help tab
pub fn handle_key_event(state: &mut HelpState, key: KeyEvent) -> Result<TabAction> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.scroll_offset = state.scroll_offset.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Ok(TabAction::None)
}

fn heading(text: &str) -> Line<'_> {
    Line::from(vec![Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD),
    )])
}

/// Draw the Help tab UI
pub fn draw(f: &mut Frame, state: &HelpState, area: Rect) {
    let help_text = vec![
        heading("Global Controls:"),
        Line::from(""),
        Line::from("  Ctrl+Q         - Quit application"),
        Line::from("  Tab            - Next tab"),
        Line::from("  Shift+Tab      - Previous tab"),
        Line::from("  1-3            - Jump to tab by number"),
        Line::from(""),
        heading("Theme Tab:"),
        Line::from(""),
        Line::from("  ←/→ or h/l     - Previous/next section"),
        Line::from("  ↑/↓ or k/j     - Select field"),
        Line::from("  Enter or e     - Type a value for the field"),
        Line::from("  Space/+ and -  - Cycle the field's options"),
        Line::from("  s              - Save and notify every view of the site"),
        Line::from("  r              - Reset the draft to the site defaults"),
        Line::from("  Esc            - Close the panel, discarding unsaved edits"),
        Line::from("  Enter or o     - Reopen a closed panel"),
        Line::from(""),
        heading("Sites Tab:"),
        Line::from(""),
        Line::from("  ↑/↓ or k/j     - Navigate the site list"),
        Line::from("  /              - Search name, department and description"),
        Line::from("  o              - Sort by name, pages or members"),
        Line::from("  d              - Toggle sort direction"),
        Line::from("  Enter          - Edit the selected site's theme"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true })
        .scroll((state.scroll_offset, 0));

    f.render_widget(paragraph, area);
}
