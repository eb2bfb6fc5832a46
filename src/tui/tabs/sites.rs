//! Sites tab: the dashboard, recolored live as themes are saved

use super::{contrast, swatch, TabAction};
use crate::core::app::Session;
use crate::sites::{DashboardCard, DashboardView, SortKey};
use crate::utils::{truncate_text, SortDirection};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct SitesTabState {
    pub dashboard: DashboardView,
    pub selected_index: usize,
    pub search_query: String,
    pub is_searching: bool,
    pub sort: SortKey,
    pub direction: SortDirection,
}

impl SitesTabState {
    pub fn new(session: &Session) -> Self {
        Self {
            dashboard: session.dashboard(),
            selected_index: 0,
            search_query: String::new(),
            is_searching: false,
            sort: SortKey::default(),
            direction: SortDirection::default(),
        }
    }

    /// Cards as currently filtered and sorted
    pub fn visible(&self) -> Vec<DashboardCard> {
        self.dashboard
            .listing(&self.search_query, self.sort, self.direction)
    }

    pub fn select_next(&mut self, max_items: usize) {
        if max_items > 0 {
            self.selected_index = (self.selected_index + 1).min(max_items - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn toggle_direction(&mut self) {
        self.direction = match self.direction {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        };
    }
}

pub fn handle_key_event(state: &mut SitesTabState, key: KeyEvent) -> Result<TabAction> {
    if state.is_searching {
        match key.code {
            KeyCode::Esc => {
                state.is_searching = false;
                state.search_query.clear();
            }
            KeyCode::Enter => {
                state.is_searching = false;
            }
            KeyCode::Backspace => {
                state.search_query.pop();
            }
            KeyCode::Char(c) => {
                state.search_query.push(c);
            }
            _ => {}
        }
        state.selected_index = 0;
        return Ok(TabAction::None);
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            let count = state.visible().len();
            state.select_next(count);
        }
        KeyCode::Up | KeyCode::Char('k') => state.select_previous(),
        KeyCode::Char('/') => {
            state.is_searching = true;
            state.search_query.clear();
        }
        KeyCode::Char('o') => state.sort = state.sort.next(),
        KeyCode::Char('d') => state.toggle_direction(),
        KeyCode::Enter => {
            if let Some(card) = state.visible().get(state.selected_index) {
                return Ok(TabAction::SwitchSite(card.site.id.clone()));
            }
        }
        _ => {}
    }
    Ok(TabAction::None)
}

pub fn draw(f: &mut Frame, state: &SitesTabState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let arrow = match state.direction {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    };
    let search = if state.is_searching {
        format!("/{}_", state.search_query)
    } else if state.search_query.is_empty() {
        "/ to search".to_string()
    } else {
        format!("/{}", state.search_query)
    };
    let header = Paragraph::new(Line::from(format!(
        " {}   sort: {} {} (o, d)   Enter edits the selected site",
        search, state.sort, arrow
    )))
    .block(Block::default().borders(Borders::ALL).title("Dashboard"));
    f.render_widget(header, chunks[0]);

    let cards = state.visible();
    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<8}", card.color),
                    Style::default().bg(swatch(&card.color)).fg(contrast(&card.color)),
                ),
                Span::raw(format!(
                    " {:<24} {:<12} {:>3} pages {:>3} members  {}",
                    truncate_text(&card.site.name, 21),
                    truncate_text(&card.site.department, 9),
                    card.site.pages,
                    card.site.members,
                    truncate_text(&card.site.description, 40)
                )),
            ]))
        })
        .collect();

    let title = format!("Sites ({})", cards.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default();
    if !cards.is_empty() {
        list_state.select(Some(state.selected_index.min(cards.len() - 1)));
    }
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::SiteDirectory;
    use crate::theme::{ThemeConfig, ThemeStore, ThemeUpdated};
    use crossterm::event::KeyModifiers;

    fn press(state: &mut SitesTabState, code: KeyCode) -> TabAction {
        handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn session() -> Session {
        Session::new(SiteDirectory::embedded(), ThemeStore::in_memory(), "1", "#F8A5A5")
    }

    #[test]
    fn test_search_then_switch_site() {
        let session = session();
        let mut state = SitesTabState::new(&session);
        assert_eq!(state.visible().len(), 5);

        press(&mut state, KeyCode::Char('/'));
        for c in "team".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.visible().len(), 2);

        press(&mut state, KeyCode::Down);
        assert_eq!(
            press(&mut state, KeyCode::Enter),
            TabAction::SwitchSite("5".to_string())
        );
    }

    #[test]
    fn test_sort_controls_and_live_colors() {
        let session = session();
        let mut state = SitesTabState::new(&session);

        press(&mut state, KeyCode::Char('o'));
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.sort, SortKey::Pages);
        assert_eq!(state.visible()[0].site.name, "Information Technology");

        session.bus.publish(&ThemeUpdated {
            site_id: "3".to_string(),
            theme: ThemeConfig::with_primary("#000000"),
        });
        assert_eq!(state.visible()[0].color, "#000000");
    }
}
