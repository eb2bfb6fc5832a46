//! Multi-site dashboard
//!
//! One card per site, each colored with the site's saved primary color. The
//! view resolves every color from storage when mounted and keeps a single bus
//! subscription that recolors the matching card on each save.

use super::{Site, SiteDirectory};
use crate::theme::{Subscription, ThemeBus, ThemeStore};
use crate::utils::{filter_by_search, sort_by_field, SortDirection};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Listing order for dashboard cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Pages,
    Members,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Pages, SortKey::Members];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Pages => "pages",
            SortKey::Members => "members",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn next(self) -> Self {
        match self {
            SortKey::Name => SortKey::Pages,
            SortKey::Pages => SortKey::Members,
            SortKey::Members => SortKey::Name,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A site as the dashboard renders it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCard {
    pub site: Site,
    /// Saved primary color, or the site's baseline color
    pub color: String,
}

#[derive(Debug)]
pub struct DashboardView {
    cards: Rc<RefCell<Vec<DashboardCard>>>,
    subscription: Option<Subscription>,
}

impl DashboardView {
    pub fn mount(directory: &SiteDirectory, store: &ThemeStore, bus: &ThemeBus) -> Self {
        let cards: Vec<DashboardCard> = directory
            .sites()
            .iter()
            .map(|site| DashboardCard {
                color: store.load_primary_color_only(&site.id, &site.color),
                site: site.clone(),
            })
            .collect();
        let cards = Rc::new(RefCell::new(cards));

        let subscription = {
            let cards = Rc::downgrade(&cards);
            bus.subscribe(move |event| {
                let Some(cards) = cards.upgrade() else {
                    return;
                };
                let mut cards = cards.borrow_mut();
                match cards.iter_mut().find(|card| card.site.id == event.site_id) {
                    Some(card) => card.color = event.theme.color_palette.primary.clone(),
                    None => {
                        debug!("Dashboard ignoring update for unknown site '{}'", event.site_id)
                    }
                }
            })
        };

        debug!("Mounted dashboard with {} sites", directory.len());
        Self {
            cards,
            subscription: Some(subscription),
        }
    }

    /// Cards in directory order
    pub fn cards(&self) -> Vec<DashboardCard> {
        self.cards.borrow().clone()
    }

    pub fn color_for(&self, site_id: &str) -> Option<String> {
        self.cards
            .borrow()
            .iter()
            .find(|card| card.site.id == site_id)
            .map(|card| card.color.clone())
    }

    /// Filter by name, department and description, then sort
    pub fn listing(
        &self,
        search: &str,
        key: SortKey,
        direction: SortDirection,
    ) -> Vec<DashboardCard> {
        let cards = self.cards.borrow();
        let mut matched: Vec<DashboardCard> = filter_by_search(cards.as_slice(), search, |card| {
            vec![
                card.site.name.as_str(),
                card.site.department.as_str(),
                card.site.description.as_str(),
            ]
        })
        .into_iter()
        .cloned()
        .collect();

        match key {
            SortKey::Name => {
                sort_by_field(&mut matched, |card| card.site.name.to_lowercase(), direction)
            }
            SortKey::Pages => sort_by_field(&mut matched, |card| card.site.pages, direction),
            SortKey::Members => sort_by_field(&mut matched, |card| card.site.members, direction),
        }
        matched
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn unmount(&mut self) {
        if self.subscription.take().is_some() {
            debug!("Unmounted dashboard");
        }
    }
}
