//! Site theme persistence and propagation
//!
//! - [`config`]: the theme model and field metadata
//! - [`merge`]: structural merge of stored JSON over defaults
//! - [`store`]: per-site persistence over a key-value store
//! - [`broadcast`]: change notifications between views
//! - [`style`]: per-site CSS derivation
//! - [`panel`]: the editing state machine
//! - [`consumer`]: read-only views following a site's theme

pub mod broadcast;
pub mod config;
pub mod consumer;
pub mod merge;
pub mod panel;
pub mod store;
pub mod style;

pub use broadcast::{Subscription, ThemeBus, ThemeUpdated};
pub use config::{
    BackgroundPattern, FieldKind, FieldSpec, FontFamily, ShadowLevel, Spacing, ThemeConfig,
    ThemeSection, DEFAULT_PRIMARY_COLOR,
};
pub use consumer::ThemeConsumer;
pub use panel::{PanelState, SaveOutcome, ThemePanel};
pub use store::{theme_key, FileStore, KeyValueStore, MemoryStore, ThemeStore, UnavailableStore};
pub use style::{render_css, StyleRegistry};
