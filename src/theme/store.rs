//! Durable per-site theme persistence
//!
//! One JSON document per site lives under the key `site-theme-<siteId>` in a
//! [`KeyValueStore`]. Reads never fail from the caller's point of view: a
//! missing entry, a corrupt entry and an unavailable store all produce the
//! default theme seeded with the caller's fallback primary color.

use super::config::ThemeConfig;
use super::merge::merge_theme;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, warn};

/// Prefix of every theme entry key
pub const THEME_KEY_PREFIX: &str = "site-theme-";

/// Storage key for a site's theme
pub fn theme_key(site_id: &str) -> String {
    format!("{}{}", THEME_KEY_PREFIX, site_id)
}

/// String key-value storage, in the spirit of browser local storage
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Short description for logs and status lines
    fn describe(&self) -> String;
}

// =================================================================
// STORE BACKENDS
// =================================================================

/// Process-local store; contents vanish with the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Directory-backed store: one `<key>.json` file per entry
///
/// Writes go through a temporary file in the same directory and are renamed
/// into place, so a crash never leaves a half-written entry behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        Ok(Some(contents))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create store directory {:?}", self.dir))?;

        let path = self.path_for(key);
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path)
            .map_err(|e| anyhow!("Failed to persist {:?}: {}", path, e.error))?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("files in {}", self.dir.display())
    }
}

/// Keep `[A-Za-z0-9_-]`, escape every other byte as `%XX`
fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => out.push(byte as char),
            // dots included, so a key can never form `..` or a hidden file
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// A store that is never available, like storage outside a browser
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Err(anyhow!("storage is unavailable"))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("storage is unavailable"))
    }

    fn describe(&self) -> String {
        "unavailable".to_string()
    }
}

// =================================================================
// THEME STORE
// =================================================================

/// Theme persistence on top of a shared [`KeyValueStore`]
#[derive(Clone)]
pub struct ThemeStore {
    backend: Rc<dyn KeyValueStore>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("backend", &self.backend.describe())
            .finish()
    }
}

impl ThemeStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()))
    }

    pub fn backend(&self) -> &Rc<dyn KeyValueStore> {
        &self.backend
    }

    /// Load a site's theme, merged over defaults seeded with `fallback_primary`
    pub fn load(&self, site_id: &str, fallback_primary: &str) -> ThemeConfig {
        let defaults = ThemeConfig::with_primary(fallback_primary);
        match self.read_document(site_id) {
            Some(stored) => merge_theme(&defaults, &stored),
            None => defaults,
        }
    }

    /// Persist a site's theme, logging and swallowing any storage failure
    pub fn save(&self, site_id: &str, config: &ThemeConfig) {
        if let Err(e) = self.try_save(site_id, config) {
            warn!("Failed to save theme for site '{}': {:#}", site_id, e);
        }
    }

    /// Persist a site's theme and report whether the write succeeded
    pub fn try_save(&self, site_id: &str, config: &ThemeConfig) -> Result<()> {
        let key = theme_key(site_id);
        let json = serde_json::to_string(config)?;
        self.backend.set_item(&key, &json)?;
        debug!("Saved theme for site '{}' under '{}'", site_id, key);
        Ok(())
    }

    /// Only the stored primary color, or `fallback` when there is none
    pub fn load_primary_color_only(&self, site_id: &str, fallback: &str) -> String {
        self.read_document(site_id)
            .as_ref()
            .and_then(|doc| doc.get("colorPalette"))
            .and_then(|palette| palette.get("primary"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Whether a site has any stored entry, corrupt or not
    pub fn has_entry(&self, site_id: &str) -> bool {
        matches!(self.backend.get_item(&theme_key(site_id)), Ok(Some(_)))
    }

    /// The parsed stored document, if present and well-formed JSON
    fn read_document(&self, site_id: &str) -> Option<Value> {
        let key = theme_key(site_id);
        let raw = match self.backend.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!("Theme storage unavailable for '{}': {:#}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring corrupt theme entry '{}': {}", key, e);
                None
            }
        }
    }
}
