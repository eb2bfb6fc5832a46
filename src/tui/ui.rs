use crate::tui::{app::App, tabs};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(f.size());

    // Draw tab bar
    draw_tabs(f, app, chunks[0]);

    // Draw current tab content
    draw_tab_content(f, app, chunks[1]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = app
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{}.{}", i + 1, tab.tab_type.title())))
        .collect();

    let title = format!("sitetheme - site {}", app.session.site_id);
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .select(app.current_tab)
        .divider("│");

    f.render_widget(tabs, area);
}

fn draw_tab_content(f: &mut Frame, app: &App, area: Rect) {
    match &app.get_current_tab().state {
        tabs::TabState::Theme(state) => tabs::theme::draw(f, state, area),
        tabs::TabState::Sites(state) => tabs::sites::draw(f, state, area),
        tabs::TabState::Help(state) => tabs::help::draw(f, state, area),
    }
}
