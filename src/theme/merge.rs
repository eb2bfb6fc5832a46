//! Structural merge of stored theme JSON over defaults
//!
//! Stored themes may come from an older or newer build, or may have been
//! edited by hand. Merging walks the *defaults* shape: keys the defaults do
//! not know are dropped, keys the stored document lacks keep their default,
//! and a stored value only wins when it has the same JSON kind as the
//! default it replaces. Each section is then decoded on its own so one bad
//! section cannot discard the others.

use super::config::ThemeConfig;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Overlay `stored` onto `defaults`, keeping the shape of `defaults`
pub fn merge_json(defaults: &Value, stored: &Value) -> Value {
    match (defaults, stored) {
        (Value::Object(default_map), Value::Object(stored_map)) => {
            let mut merged = Map::with_capacity(default_map.len());
            for (key, default_value) in default_map {
                let value = match stored_map.get(key) {
                    Some(stored_value) => merge_json(default_value, stored_value),
                    None => default_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        (Value::Object(_), _) => defaults.clone(),
        (default_leaf, stored_leaf) if same_kind(default_leaf, stored_leaf) => stored_leaf.clone(),
        _ => defaults.clone(),
    }
}

fn same_kind(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::String(_), Value::String(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::Bool(_), Value::Bool(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Null, Value::Null)
    )
}

/// Build a complete theme from a stored document and fallback defaults
///
/// `defaults` should already carry the site's baseline primary color so a
/// stored document without one inherits it.
pub fn merge_theme(defaults: &ThemeConfig, stored: &Value) -> ThemeConfig {
    let default_value = match serde_json::to_value(defaults) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to encode default theme for merging: {}", e);
            return defaults.clone();
        }
    };

    let merged = merge_json(&default_value, stored);

    ThemeConfig {
        color_palette: decode_section(&merged, "colorPalette", &defaults.color_palette),
        text: decode_section(&merged, "text", &defaults.text),
        buttons: decode_section(&merged, "buttons", &defaults.buttons),
        background: decode_section(&merged, "background", &defaults.background),
        header: decode_section(&merged, "header", &defaults.header),
        footer: decode_section(&merged, "footer", &defaults.footer),
        utilities: decode_section(&merged, "utilities", &defaults.utilities),
    }
}

fn decode_section<T>(merged: &Value, key: &str, fallback: &T) -> T
where
    T: DeserializeOwned + Clone,
{
    let Some(section) = merged.get(key) else {
        return fallback.clone();
    };
    match serde_json::from_value(section.clone()) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("Stored theme section '{}' is invalid ({}), using defaults", key, e);
            fallback.clone()
        }
    }
}
