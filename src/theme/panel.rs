//! Theme panel state machine
//!
//! The panel is either closed or open with an in-memory draft. Opening loads
//! the site's persisted theme; edits and resets only touch the draft; saving
//! persists the draft and then broadcasts it. Every draft change re-derives
//! the site's style element so the preview is always live.
//!
//! ```text
//!   Closed --open()--> Open(draft) --close()--> Closed
//!                        |  ^
//!        edit/reset/save +--+
//! ```

use super::broadcast::{ThemeBus, ThemeUpdated};
use super::config::{ThemeConfig, ThemeSection};
use super::store::ThemeStore;
use super::style::StyleRegistry;
use anyhow::{bail, Result};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Draft being edited while the panel is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub theme: ThemeConfig,
    /// Last value loaded from or written to storage
    pub persisted: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open(Draft),
}

/// What a call to [`ThemePanel::save`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written and broadcast
    Saved,
    /// The storage write failed; nothing was broadcast
    StorageFailed,
    /// The panel was closed; nothing happened
    NotOpen,
}

/// Theme editor for a single site
pub struct ThemePanel {
    site_id: String,
    baseline_color: String,
    store: ThemeStore,
    bus: ThemeBus,
    styles: Rc<RefCell<StyleRegistry>>,
    state: PanelState,
    active_section: ThemeSection,
}

impl std::fmt::Debug for ThemePanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePanel")
            .field("site_id", &self.site_id)
            .field("baseline_color", &self.baseline_color)
            .field("open", &self.is_open())
            .field("active_section", &self.active_section)
            .finish()
    }
}

impl ThemePanel {
    /// Mount a closed panel for `site_id`
    ///
    /// `baseline_color` is the site's accent before any theme is saved; it
    /// seeds the primary color on first load and on reset.
    pub fn new(
        site_id: impl Into<String>,
        baseline_color: impl Into<String>,
        store: ThemeStore,
        bus: ThemeBus,
        styles: Rc<RefCell<StyleRegistry>>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            baseline_color: baseline_color.into(),
            store,
            bus,
            styles,
            state: PanelState::Closed,
            active_section: ThemeSection::default(),
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn baseline_color(&self) -> &str {
        &self.baseline_color
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open(_))
    }

    /// The draft theme, while open
    pub fn draft(&self) -> Option<&ThemeConfig> {
        match &self.state {
            PanelState::Open(draft) => Some(&draft.theme),
            PanelState::Closed => None,
        }
    }

    /// Whether the draft has changes that are not persisted
    pub fn is_dirty(&self) -> bool {
        match &self.state {
            PanelState::Open(draft) => draft.theme != draft.persisted,
            PanelState::Closed => false,
        }
    }

    pub fn active_section(&self) -> ThemeSection {
        self.active_section
    }

    pub fn set_active_section(&mut self, section: ThemeSection) {
        self.active_section = section;
    }

    /// Open (or reopen) the panel with the persisted theme as the draft
    pub fn open(&mut self) {
        let theme = self.store.load(&self.site_id, &self.baseline_color);
        info!("Opened theme panel for site '{}'", self.site_id);
        self.state = PanelState::Open(Draft {
            persisted: theme.clone(),
            theme,
        });
        self.refresh_styles();
    }

    /// Change one field of the draft
    ///
    /// Nothing is persisted or broadcast. Invalid input leaves the draft as
    /// it was.
    pub fn edit(&mut self, section: ThemeSection, field: &str, value: &str) -> Result<()> {
        let PanelState::Open(draft) = &mut self.state else {
            bail!("Theme panel for site '{}' is not open", self.site_id);
        };
        draft.theme.set(section, field, value)?;
        debug!("Edited {}.{} = {} for site '{}'", section, field, value, self.site_id);
        self.refresh_styles();
        Ok(())
    }

    /// Replace the draft with defaults seeded from the site's baseline color
    pub fn reset(&mut self) {
        let PanelState::Open(draft) = &mut self.state else {
            debug!("Ignoring reset: panel for site '{}' is closed", self.site_id);
            return;
        };
        draft.theme = ThemeConfig::with_primary(self.baseline_color.clone());
        debug!("Reset draft for site '{}' to defaults", self.site_id);
        self.refresh_styles();
    }

    /// Persist the draft, then notify every subscriber; the panel stays open
    pub fn save(&mut self) -> SaveOutcome {
        let PanelState::Open(draft) = &mut self.state else {
            debug!("Ignoring save: panel for site '{}' is closed", self.site_id);
            return SaveOutcome::NotOpen;
        };

        if let Err(e) = self.store.try_save(&self.site_id, &draft.theme) {
            warn!("Theme for site '{}' was not saved: {:#}", self.site_id, e);
            return SaveOutcome::StorageFailed;
        }
        draft.persisted = draft.theme.clone();
        let event = ThemeUpdated {
            site_id: self.site_id.clone(),
            theme: draft.theme.clone(),
        };

        info!("Saved theme for site '{}'", self.site_id);
        self.bus.publish(&event);
        SaveOutcome::Saved
    }

    /// Close the panel, discarding unsaved edits
    ///
    /// The style element is re-derived from storage so a discarded draft's
    /// preview does not outlive the panel.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        if self.is_dirty() {
            debug!("Discarding unsaved theme edits for site '{}'", self.site_id);
        }
        self.state = PanelState::Closed;
        let persisted = self.store.load(&self.site_id, &self.baseline_color);
        self.styles.borrow_mut().apply(&self.site_id, &persisted);
        info!("Closed theme panel for site '{}'", self.site_id);
    }

    fn refresh_styles(&self) {
        if let PanelState::Open(draft) = &self.state {
            self.styles.borrow_mut().apply(&self.site_id, &draft.theme);
        }
    }
}
