//! Theme tab: the interactive theme panel for the session's site

use super::{contrast, swatch, TabAction};
use crate::core::app::Session;
use crate::theme::{
    FieldKind, FieldSpec, SaveOutcome, ThemeConfig, ThemeConsumer, ThemePanel, ThemeSection,
};
use crate::utils::normalize_hex;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::warn;

const OPACITY_STEP: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct ThemeTabState {
    pub panel: ThemePanel,
    /// Follows the saved theme, as any other view of the site would
    pub preview: ThemeConsumer,
    pub selected_field: usize,
    /// Text being typed for the selected field
    pub input: Option<String>,
    pub status: Option<Status>,
}

impl ThemeTabState {
    /// Mount the panel for the session's site and open it
    pub fn new(session: &Session) -> Self {
        let mut panel = session.panel();
        panel.open();
        Self {
            panel,
            preview: session.consumer(),
            selected_field: 0,
            input: None,
            status: None,
        }
    }

    pub fn section(&self) -> ThemeSection {
        self.panel.active_section()
    }

    pub fn selected_spec(&self) -> Option<&'static FieldSpec> {
        self.section().fields().get(self.selected_field)
    }

    pub fn current_value(&self) -> Option<String> {
        let spec = self.selected_spec()?;
        self.panel.draft()?.get(self.section(), spec.key)
    }

    pub fn next_section(&mut self) {
        self.panel.set_active_section(self.section().next());
        self.selected_field = 0;
    }

    pub fn previous_section(&mut self) {
        self.panel.set_active_section(self.section().previous());
        self.selected_field = 0;
    }

    pub fn select_next(&mut self) {
        let count = self.section().fields().len();
        if count > 0 {
            self.selected_field = (self.selected_field + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_field = self.selected_field.saturating_sub(1);
    }

    /// Step the selected field through its options
    pub fn cycle(&mut self, forward: bool) {
        let Some(spec) = self.selected_spec() else {
            return;
        };
        let current = self.current_value().unwrap_or_default();

        let value = match spec.kind {
            FieldKind::Opacity => {
                let step = if forward { OPACITY_STEP } else { -OPACITY_STEP };
                let next = (current.parse::<f32>().unwrap_or(1.0) + step).clamp(0.0, 1.0);
                format!("{}", (next * 10.0).round() / 10.0)
            }
            kind => {
                let options = kind.options();
                if options.is_empty() {
                    return;
                }
                let len = options.len();
                let index = options.iter().position(|o| o.eq_ignore_ascii_case(&current));
                let next = match (index, forward) {
                    (Some(i), true) => (i + 1) % len,
                    (Some(i), false) => (i + len - 1) % len,
                    (None, _) => 0,
                };
                options[next].to_string()
            }
        };
        self.apply_edit(spec, &value);
    }

    pub fn begin_input(&mut self) {
        if self.panel.is_open() && self.selected_spec().is_some() {
            self.input = Some(String::new());
        }
    }

    pub fn commit_input(&mut self) {
        let Some(value) = self.input.take() else {
            return;
        };
        if let Some(spec) = self.selected_spec() {
            let value = match spec.kind {
                FieldKind::Color => normalize_hex(value.trim()).unwrap_or(value),
                _ => value,
            };
            self.apply_edit(spec, &value);
        }
    }

    fn apply_edit(&mut self, spec: &FieldSpec, value: &str) {
        match self.panel.edit(self.section(), spec.key, value) {
            Ok(()) => self.status = None,
            Err(e) => self.status = Some(Status::Error(format!("{:#}", e))),
        }
    }

    pub fn save(&mut self) {
        self.status = match self.panel.save() {
            SaveOutcome::Saved => Some(Status::Info(format!(
                "Saved at {}",
                chrono::Local::now().format("%H:%M:%S")
            ))),
            SaveOutcome::StorageFailed => Some(Status::Error(
                "Save failed: theme storage is unavailable".to_string(),
            )),
            SaveOutcome::NotOpen => None,
        };
    }

    pub fn reset(&mut self) {
        self.panel.reset();
        if self.panel.is_open() {
            self.status = Some(Status::Info("Reset to defaults (not saved)".to_string()));
        }
    }

    pub fn open(&mut self) {
        self.panel.open();
        self.status = None;
    }

    pub fn close(&mut self) {
        if self.panel.is_dirty() {
            self.status = Some(Status::Info("Discarded unsaved edits".to_string()));
        }
        self.panel.close();
    }

    /// Close the panel before the tab goes away
    pub fn shutdown(&mut self) {
        if self.panel.is_dirty() {
            warn!(
                "Discarding unsaved theme edits for site '{}'",
                self.panel.site_id()
            );
        }
        self.panel.close();
        self.preview.unmount();
    }
}

pub fn handle_key_event(state: &mut ThemeTabState, key: KeyEvent) -> Result<TabAction> {
    if let Some(input) = state.input.as_mut() {
        match key.code {
            KeyCode::Esc => state.input = None,
            KeyCode::Enter => state.commit_input(),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
        return Ok(TabAction::None);
    }

    if !state.panel.is_open() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char('o')) {
            state.open();
        }
        return Ok(TabAction::None);
    }

    match key.code {
        KeyCode::Right | KeyCode::Char('l') => state.next_section(),
        KeyCode::Left | KeyCode::Char('h') => state.previous_section(),
        KeyCode::Down | KeyCode::Char('j') => state.select_next(),
        KeyCode::Up | KeyCode::Char('k') => state.select_previous(),
        KeyCode::Char(' ') | KeyCode::Char('+') => state.cycle(true),
        KeyCode::Char('-') => state.cycle(false),
        KeyCode::Enter | KeyCode::Char('e') => state.begin_input(),
        KeyCode::Char('s') => state.save(),
        KeyCode::Char('r') => state.reset(),
        KeyCode::Esc => state.close(),
        _ => {}
    }
    Ok(TabAction::None)
}

pub fn draw(f: &mut Frame, state: &ThemeTabState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(area);

    match state.panel.draft() {
        Some(draft) => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    [
                        Constraint::Length(18),
                        Constraint::Min(36),
                        Constraint::Length(34),
                    ]
                    .as_ref(),
                )
                .split(rows[0]);
            draw_sections(f, state, columns[0]);
            draw_fields(f, state, draft, columns[1]);
            draw_preview(f, draft, columns[2]);
        }
        None => {
            let closed = Paragraph::new(vec![
                Line::from(""),
                Line::from(format!(
                    "  Theme panel for site '{}' is closed.",
                    state.panel.site_id()
                )),
                Line::from(""),
                Line::from("  Press Enter or o to open it."),
            ])
            .block(Block::default().borders(Borders::ALL).title("Theme"));
            f.render_widget(closed, rows[0]);
        }
    }

    draw_status(f, state, rows[1]);
}

fn draw_sections(f: &mut Frame, state: &ThemeTabState, area: Rect) {
    let items: Vec<ListItem> = ThemeSection::ALL
        .iter()
        .map(|section| ListItem::new(section.label()))
        .collect();
    let selected = ThemeSection::ALL
        .iter()
        .position(|section| *section == state.section());

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Sections"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(selected);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_fields(f: &mut Frame, state: &ThemeTabState, draft: &ThemeConfig, area: Rect) {
    let section = state.section();
    let items: Vec<ListItem> = section
        .fields()
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let value = draft.get(section, spec.key).unwrap_or_default();
            let shown = match (&state.input, index == state.selected_field) {
                (Some(input), true) => format!("{}_", input),
                _ => value.clone(),
            };
            let mut spans = vec![Span::raw(format!("{:<18} ", spec.label))];
            if spec.kind == FieldKind::Color {
                spans.push(Span::styled("  ", Style::default().bg(swatch(&value))));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::raw(shown));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if state.panel.is_dirty() {
        format!("{} (unsaved)", section.label())
    } else {
        section.label().to_string()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_field));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_preview(f: &mut Frame, draft: &ThemeConfig, area: Rect) {
    let bar = |bg: &str, fg: &str, label: &str| {
        Line::from(Span::styled(
            format!(" {:<30}", label),
            Style::default().bg(swatch(bg)).fg(swatch(fg)),
        ))
    };
    let body = Style::default()
        .bg(swatch(&draft.background.main_color))
        .fg(swatch(&draft.color_palette.text));
    let primary = &draft.color_palette.primary;

    let lines = vec![
        bar(&draft.header.background_color, &draft.header.text_color, "Header"),
        Line::from(Span::styled(format!(" {:<30}", ""), body)),
        Line::from(Span::styled(
            format!(" {:<30}", format!("{} {}", draft.text.font_family, draft.text.font_size)),
            body,
        )),
        Line::from(vec![
            Span::styled(" ", body),
            Span::styled(
                " Button ",
                Style::default().bg(swatch(primary)).fg(contrast(primary)),
            ),
            Span::styled(format!("{:<22}", ""), body),
        ]),
        Line::from(vec![
            Span::styled(" ", body),
            Span::styled("Link", Style::default().fg(swatch(primary))),
            Span::styled(format!("{:<26}", ""), body),
        ]),
        Line::from(Span::styled(format!(" {:<30}", ""), body)),
        bar(&draft.footer.background_color, &draft.footer.text_color, "Footer"),
    ];

    let preview =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Preview"));
    f.render_widget(preview, area);
}

fn draw_status(f: &mut Frame, state: &ThemeTabState, area: Rect) {
    let saved = state.preview.primary_color();
    let mut spans = vec![
        Span::raw(format!(" Site {} | saved primary ", state.panel.site_id())),
        Span::styled("  ", Style::default().bg(swatch(&saved))),
        Span::raw(format!(" {} | ", saved)),
    ];
    match &state.status {
        Some(Status::Info(message)) => spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Green),
        )),
        Some(Status::Error(message)) => spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )),
        None if state.input.is_some() => spans.push(Span::raw("Enter apply, Esc cancel")),
        None => spans.push(Span::raw(
            "←/→ section  ↑/↓ field  Enter type  Space cycle  s save  r reset  Esc close",
        )),
    }

    let status = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
