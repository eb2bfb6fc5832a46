//! Read-only views that render with a site's theme
//!
//! A consumer resolves its color synchronously when mounted, so the first
//! render already uses the saved theme, then follows the [`ThemeBus`] for
//! its site until it is unmounted.

use super::broadcast::{Subscription, ThemeBus};
use super::config::ThemeConfig;
use super::store::ThemeStore;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug)]
struct ConsumerState {
    primary_color: String,
    theme: ThemeConfig,
    updates: usize,
}

/// A mounted view bound to one site's theme
#[derive(Debug)]
pub struct ThemeConsumer {
    site_id: String,
    state: Rc<RefCell<ConsumerState>>,
    subscription: Option<Subscription>,
}

impl ThemeConsumer {
    /// Resolve the site's colors from storage and start following updates
    pub fn mount(
        site_id: impl Into<String>,
        fallback: &str,
        store: &ThemeStore,
        bus: &ThemeBus,
    ) -> Self {
        let site_id = site_id.into();
        let state = Rc::new(RefCell::new(ConsumerState {
            primary_color: store.load_primary_color_only(&site_id, fallback),
            theme: store.load(&site_id, fallback),
            updates: 0,
        }));

        let subscription = {
            let state = Rc::downgrade(&state);
            bus.subscribe_site(site_id.clone(), move |event| {
                if let Some(state) = state.upgrade() {
                    let mut state = state.borrow_mut();
                    state.primary_color = event.theme.color_palette.primary.clone();
                    state.theme = event.theme.clone();
                    state.updates += 1;
                }
            })
        };

        debug!("Mounted theme consumer for site '{}'", site_id);
        Self {
            site_id,
            state,
            subscription: Some(subscription),
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Accent color to render with
    pub fn primary_color(&self) -> String {
        self.state.borrow().primary_color.clone()
    }

    pub fn theme(&self) -> ThemeConfig {
        self.state.borrow().theme.clone()
    }

    /// Number of broadcasts applied since mounting
    pub fn update_count(&self) -> usize {
        self.state.borrow().updates
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop following updates; the last known colors stay readable
    pub fn unmount(&mut self) {
        if self.subscription.take().is_some() {
            debug!("Unmounted theme consumer for site '{}'", self.site_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::broadcast::ThemeUpdated;
    use crate::theme::config::ThemeSection;

    fn update(site_id: &str, primary: &str) -> ThemeUpdated {
        ThemeUpdated {
            site_id: site_id.to_string(),
            theme: ThemeConfig::with_primary(primary),
        }
    }

    #[test]
    fn test_mount_reads_saved_color_before_first_render() {
        let store = ThemeStore::in_memory();
        let bus = ThemeBus::new();
        let mut saved = ThemeConfig::with_primary("#445566");
        saved.set(ThemeSection::Text, "fontSize", "20px").unwrap();
        store.save("1", &saved);

        let consumer = ThemeConsumer::mount("1", "#F8A5A5", &store, &bus);
        assert_eq!(consumer.primary_color(), "#445566");
        assert_eq!(consumer.theme(), saved);
        assert!(consumer.is_mounted());
    }

    #[test]
    fn test_mount_without_saved_theme_uses_fallback() {
        let consumer =
            ThemeConsumer::mount("1", "#F8A5A5", &ThemeStore::in_memory(), &ThemeBus::new());
        assert_eq!(consumer.primary_color(), "#F8A5A5");
    }

    #[test]
    fn test_follows_updates_for_its_site_only() {
        let store = ThemeStore::in_memory();
        let bus = ThemeBus::new();
        let consumer = ThemeConsumer::mount("1", "#F8A5A5", &store, &bus);

        bus.publish(&update("2", "#000000"));
        assert_eq!(consumer.primary_color(), "#F8A5A5");

        bus.publish(&update("1", "#123456"));
        assert_eq!(consumer.primary_color(), "#123456");
        assert_eq!(consumer.update_count(), 1);
    }

    #[test]
    fn test_unmount_stops_updates() {
        let store = ThemeStore::in_memory();
        let bus = ThemeBus::new();
        let mut consumer = ThemeConsumer::mount("1", "#F8A5A5", &store, &bus);

        consumer.unmount();
        assert!(!consumer.is_mounted());
        assert_eq!(bus.subscriber_count(), 0);

        bus.publish(&update("1", "#123456"));
        assert_eq!(consumer.primary_color(), "#F8A5A5");
    }

    #[test]
    fn test_view_unmounted_by_earlier_listener_is_not_updated() {
        let store = ThemeStore::in_memory();
        let bus = ThemeBus::new();
        let view: Rc<RefCell<Option<ThemeConsumer>>> = Rc::new(RefCell::new(None));

        let _closer = {
            let view = view.clone();
            bus.subscribe(move |_| {
                if let Some(view) = view.borrow_mut().as_mut() {
                    view.unmount();
                }
            })
        };
        *view.borrow_mut() = Some(ThemeConsumer::mount("1", "#F8A5A5", &store, &bus));

        bus.publish(&update("1", "#123456"));

        let view = view.borrow();
        let view = view.as_ref().unwrap();
        assert!(!view.is_mounted());
        assert_eq!(view.primary_color(), "#F8A5A5");
        assert_eq!(view.update_count(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = ThemeBus::new();
        {
            let _consumer = ThemeConsumer::mount("1", "#F8A5A5", &ThemeStore::in_memory(), &bus);
            assert_eq!(bus.subscriber_count(), 1);
        }
        assert_eq!(bus.subscriber_count(), 0);
    }
}
