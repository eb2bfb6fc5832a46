use crate::core::app::Session;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::style::Color;

pub mod help;
pub mod sites;
pub mod theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabType {
    Theme,
    Sites,
    Help,
}

impl TabType {
    pub fn title(&self) -> &'static str {
        match self {
            TabType::Theme => "Theme",
            TabType::Sites => "Sites",
            TabType::Help => "Help",
        }
    }
}

/// What a tab asks the app to do after handling a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabAction {
    None,
    /// Edit another site's theme
    SwitchSite(String),
}

pub struct Tab {
    pub tab_type: TabType,
    pub state: TabState,
}

pub enum TabState {
    Theme(theme::ThemeTabState),
    Sites(sites::SitesTabState),
    Help(help::HelpState),
}

impl Tab {
    pub fn new(tab_type: TabType, session: &Session) -> Self {
        let state = match tab_type {
            TabType::Theme => TabState::Theme(theme::ThemeTabState::new(session)),
            TabType::Sites => TabState::Sites(sites::SitesTabState::new(session)),
            TabType::Help => TabState::Help(help::HelpState::new()),
        };

        Self { tab_type, state }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<TabAction> {
        match &mut self.state {
            TabState::Theme(state) => theme::handle_key_event(state, key),
            TabState::Sites(state) => sites::handle_key_event(state, key),
            TabState::Help(state) => help::handle_key_event(state, key),
        }
    }

    /// Whether the tab is collecting free text, so global shortcuts stay off
    pub fn captures_input(&self) -> bool {
        match &self.state {
            TabState::Theme(state) => state.input.is_some(),
            TabState::Sites(state) => state.is_searching,
            TabState::Help(_) => false,
        }
    }
}

/// Terminal color for a hex string, or the terminal default
pub fn swatch(hex: &str) -> Color {
    match crate::utils::hex_to_rgb(hex) {
        Some(rgb) => Color::Rgb(rgb.r, rgb.g, rgb.b),
        None => Color::Reset,
    }
}

/// Readable text color on top of `hex`
pub fn contrast(hex: &str) -> Color {
    match crate::utils::hex_to_rgb(hex) {
        Some(rgb) if rgb.prefers_dark_text() => Color::Black,
        Some(_) => Color::White,
        None => Color::Reset,
    }
}
