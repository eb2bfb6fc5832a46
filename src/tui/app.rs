use crate::core::app::Session;
use crate::theme::DEFAULT_PRIMARY_COLOR;
use crate::tui::{
    events::{handle_events, is_quit, InputEvent},
    tabs::{Tab, TabAction, TabState, TabType},
    ui,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

pub struct App {
    pub session: Session,
    pub tabs: Vec<Tab>,
    pub current_tab: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        let tabs = vec![
            Tab::new(TabType::Theme, &session),
            Tab::new(TabType::Sites, &session),
            Tab::new(TabType::Help, &session),
        ];

        Self {
            session,
            tabs,
            current_tab: 0,
            should_quit: false,
        }
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel();

        // Spawn event handler
        tokio::spawn(handle_events(input_tx));

        loop {
            terminal.draw(|f| ui::draw(f, self))?;

            match input_rx.recv().await {
                Some(InputEvent::Key(key)) => self.handle_key_event(key)?,
                Some(InputEvent::Resize(_, _)) => {}
                Some(InputEvent::Quit) | None => self.should_quit = true,
            }

            if self.should_quit {
                self.shutdown();
                break;
            }
        }

        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if is_quit(&key) {
            self.should_quit = true;
            return Ok(());
        }

        if !self.get_current_tab().captures_input() {
            match key.code {
                KeyCode::Tab => {
                    self.next_tab();
                    return Ok(());
                }
                KeyCode::BackTab => {
                    self.previous_tab();
                    return Ok(());
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if let Some(digit) = c.to_digit(10) {
                        let tab_index = (digit as usize).saturating_sub(1);
                        if tab_index < self.tabs.len() {
                            self.current_tab = tab_index;
                        }
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        match self.get_current_tab_mut().handle_key_event(key)? {
            TabAction::None => {}
            TabAction::SwitchSite(site_id) => self.switch_site(&site_id),
        }
        Ok(())
    }

    /// Point the theme tab at another site, discarding the current draft
    pub fn switch_site(&mut self, site_id: &str) {
        self.session.baseline = self
            .session
            .directory
            .baseline_color(site_id)
            .unwrap_or(DEFAULT_PRIMARY_COLOR)
            .to_string();
        self.session.site_id = site_id.to_string();
        info!("Switched theme panel to site '{}'", site_id);

        if let Some(index) = self.tab_index(TabType::Theme) {
            if let TabState::Theme(state) = &mut self.tabs[index].state {
                state.shutdown();
            }
            self.tabs[index] = Tab::new(TabType::Theme, &self.session);
            self.current_tab = index;
        }
    }

    fn tab_index(&self, tab_type: TabType) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.tab_type == tab_type)
    }

    fn shutdown(&mut self) {
        for tab in &mut self.tabs {
            if let TabState::Theme(state) = &mut tab.state {
                state.shutdown();
            }
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = (self.current_tab + 1) % self.tabs.len();
    }

    pub fn previous_tab(&mut self) {
        if self.current_tab > 0 {
            self.current_tab -= 1;
        } else {
            self.current_tab = self.tabs.len() - 1;
        }
    }

    pub fn get_current_tab(&self) -> &Tab {
        &self.tabs[self.current_tab]
    }

    pub fn get_current_tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.current_tab]
    }
}
