//! Session initialization
//!
//! A session bundles the shared handles one run works with: the theme store,
//! the update bus and the style registry, plus the site being edited.

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::sites::{DashboardView, SiteDirectory};
use crate::theme::{FileStore, StyleRegistry, ThemeBus, ThemeConsumer, ThemePanel, ThemeStore};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Session {
    pub directory: SiteDirectory,
    pub store: ThemeStore,
    pub bus: ThemeBus,
    pub styles: Rc<RefCell<StyleRegistry>>,
    /// Site the panel edits
    pub site_id: String,
    /// Primary color for the site before any theme is saved
    pub baseline: String,
}

impl Session {
    pub fn new(
        directory: SiteDirectory,
        store: ThemeStore,
        site_id: impl Into<String>,
        baseline: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            store,
            bus: ThemeBus::new(),
            styles: Rc::new(RefCell::new(StyleRegistry::new())),
            site_id: site_id.into(),
            baseline: baseline.into(),
        }
    }

    /// A closed theme panel for the session's site
    pub fn panel(&self) -> ThemePanel {
        ThemePanel::new(
            self.site_id.clone(),
            self.baseline.clone(),
            self.store.clone(),
            self.bus.clone(),
            self.styles.clone(),
        )
    }

    /// A view following the session's site
    pub fn consumer(&self) -> ThemeConsumer {
        ThemeConsumer::mount(self.site_id.clone(), &self.baseline, &self.store, &self.bus)
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView::mount(&self.directory, &self.store, &self.bus)
    }
}

/// Build the session from CLI args and the user config file
pub fn create_session(cli_args: &CliArgs, config: &ConfigFile) -> Session {
    let directory = SiteDirectory::load(&ConfigFile::sites_path());
    let site_id = cli_args.resolve_site(config, &directory);
    let baseline = cli_args.resolve_baseline(&site_id, &directory);
    let store_dir = cli_args.resolve_store_dir(config);

    if directory.get(&site_id).is_none() {
        debug!("Site '{}' is not in the site list", site_id);
    }
    info!(
        "Session for site '{}' (baseline {}), themes in {:?}",
        site_id, baseline, store_dir
    );

    let store = ThemeStore::new(Rc::new(FileStore::new(store_dir)));
    Session::new(directory, store, site_id, baseline)
}
