//! In-process theme change notifications
//!
//! A [`ThemeBus`] is shared (by cloning) between the theme panel and every
//! view that renders with a site's theme. Publishing is synchronous: every
//! live subscriber has run by the time `publish` returns. Subscriptions are
//! guards; dropping one unsubscribes, and a listener whose subscription is
//! gone is never called again, even mid-publish.

use super::config::ThemeConfig;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Payload fired after a successful theme save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeUpdated {
    pub site_id: String,
    pub theme: ThemeConfig,
}

type Listener = Rc<dyn Fn(&ThemeUpdated)>;

struct Entry {
    id: u64,
    active: Rc<Cell<bool>>,
    listener: Listener,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<Entry>,
}

impl BusInner {
    /// Forget entries deactivated while the bus was borrowed
    fn prune(&mut self) {
        self.listeners.retain(|entry| entry.active.get());
    }
}

/// Publish/subscribe channel for [`ThemeUpdated`] events
#[derive(Clone, Default)]
pub struct ThemeBus {
    inner: Rc<RefCell<BusInner>>,
}

impl fmt::Debug for ThemeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl ThemeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every site
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ThemeUpdated) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.prune();
        let id = inner.next_id;
        inner.next_id += 1;
        let active = Rc::new(Cell::new(true));
        inner.listeners.push(Entry {
            id,
            active: active.clone(),
            listener: Rc::new(listener),
        });
        Subscription {
            id,
            active,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Register a listener that only sees updates for `site_id`
    pub fn subscribe_site<F>(&self, site_id: impl Into<String>, listener: F) -> Subscription
    where
        F: Fn(&ThemeUpdated) + 'static,
    {
        let site_id = site_id.into();
        self.subscribe(move |event| {
            if event.site_id == site_id {
                listener(event);
            }
        })
    }

    /// Deliver `event` to every live subscriber, in subscription order
    pub fn publish(&self, event: &ThemeUpdated) {
        // Snapshot so listeners may subscribe or unsubscribe while running
        let listeners: Vec<(Rc<Cell<bool>>, Listener)> = {
            let mut inner = self.inner.borrow_mut();
            inner.prune();
            inner
                .listeners
                .iter()
                .map(|entry| (entry.active.clone(), entry.listener.clone()))
                .collect()
        };

        debug!(
            "Broadcasting theme update for site '{}' to {} subscriber(s)",
            event.site_id,
            listeners.len()
        );
        for (active, listener) in listeners {
            // An earlier listener may have dropped this subscription
            if active.get() {
                listener(event);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|entry| entry.active.get())
            .count()
    }
}

/// Live registration on a [`ThemeBus`]; unsubscribes when dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    active: Rc<Cell<bool>>,
    bus: Weak<RefCell<BusInner>>,
}

impl Subscription {
    /// Unsubscribe now rather than at drop
    pub fn cancel(self) {}
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.set(false);
        if let Some(inner) = self.bus.upgrade() {
            // While the bus is borrowed the inactive entry is pruned later
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.listeners.retain(|entry| entry.id != self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn event(site_id: &str) -> ThemeUpdated {
        ThemeUpdated {
            site_id: site_id.to_string(),
            theme: ThemeConfig::default(),
        }
    }

    #[test]
    fn test_publish_reaches_every_subscriber_once() {
        let bus = ThemeBus::new();
        let hits = Rc::new(Cell::new(0));

        let a = {
            let hits = hits.clone();
            bus.subscribe(move |_| hits.set(hits.get() + 1))
        };
        let b = {
            let hits = hits.clone();
            bus.subscribe(move |_| hits.set(hits.get() + 1))
        };

        bus.publish(&event("1"));
        assert_eq!(hits.get(), 2);
        assert_eq!(bus.subscriber_count(), 2);
        drop((a, b));
    }

    #[test]
    fn test_dropped_subscription_receives_nothing() {
        let bus = ThemeBus::new();
        let hits = Rc::new(Cell::new(0));

        let sub = {
            let hits = hits.clone();
            bus.subscribe(move |_| hits.set(hits.get() + 1))
        };
        drop(sub);

        bus.publish(&event("1"));
        assert_eq!(hits.get(), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_dropped_mid_publish_is_skipped() {
        let bus = ThemeBus::new();
        let hits = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let _first = {
            let victim = victim.clone();
            bus.subscribe(move |_| {
                victim.borrow_mut().take();
            })
        };
        let second = {
            let hits = hits.clone();
            bus.subscribe(move |_| hits.set(hits.get() + 1))
        };
        *victim.borrow_mut() = Some(second);

        bus.publish(&event("1"));
        assert_eq!(hits.get(), 0);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_drop_while_bus_is_borrowed_is_pruned() {
        let bus = ThemeBus::new();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = hits.clone();
            bus.subscribe(move |_| hits.set(hits.get() + 1))
        };

        {
            let _held = bus.inner.borrow();
            drop(sub);
        }
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.inner.borrow().listeners.len(), 1);

        bus.publish(&event("1"));
        assert_eq!(hits.get(), 0);
        assert!(bus.inner.borrow().listeners.is_empty());
    }

    #[test]
    fn test_site_filter() {
        let bus = ThemeBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _sub = {
            let seen = seen.clone();
            bus.subscribe_site("42", move |e| seen.borrow_mut().push(e.site_id.clone()))
        };

        bus.publish(&event("7"));
        bus.publish(&event("42"));
        assert_eq!(*seen.borrow(), vec!["42".to_string()]);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus = ThemeBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        sub.cancel();
    }

    #[test]
    fn test_listener_may_subscribe_during_publish() {
        let bus = ThemeBus::new();
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let _sub = {
            let bus = bus.clone();
            let late = late.clone();
            bus.clone().subscribe(move |_| {
                late.borrow_mut().push(bus.subscribe(|_| {}));
            })
        };

        bus.publish(&event("1"));
        assert_eq!(bus.subscriber_count(), 2);
    }
}
