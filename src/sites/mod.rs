//! Site directory
//!
//! The tenant's sites and their baseline accent colors. A built-in list is
//! embedded in the binary; `~/.config/sitetheme/sites.json` replaces it when
//! present.

pub mod dashboard;

use crate::utils::colors::is_valid_hex_color;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub use dashboard::{DashboardCard, DashboardView, SortKey};

/// Built-in site list
pub const DEFAULT_SITES_JSON: &str = include_str!("default_sites.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default = "default_status")]
    pub status: String,
    /// Baseline accent color used until a theme is saved
    pub color: String,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub members: u32,
    #[serde(default)]
    pub description: String,
}

fn default_status() -> String {
    "active".to_string()
}

impl Site {
    pub fn slug(&self) -> String {
        crate::utils::generate_slug(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDirectory {
    sites: Vec<Site>,
}

impl SiteDirectory {
    /// Parse and validate a JSON array of sites
    pub fn from_json(json: &str) -> Result<Self> {
        let sites: Vec<Site> = serde_json::from_str(json)?;
        for (index, site) in sites.iter().enumerate() {
            if site.id.trim().is_empty() {
                bail!("Site #{} has an empty id", index + 1);
            }
            if !is_valid_hex_color(&site.color) {
                bail!("Site '{}' has an invalid color '{}'", site.id, site.color);
            }
            if sites[..index].iter().any(|other| other.id == site.id) {
                bail!("Duplicate site id '{}'", site.id);
            }
        }
        Ok(Self { sites })
    }

    /// The list compiled into the binary
    pub fn embedded() -> Self {
        match Self::from_json(DEFAULT_SITES_JSON) {
            Ok(directory) => directory,
            Err(e) => {
                warn!("Embedded site list is invalid: {}", e);
                Self { sites: Vec::new() }
            }
        }
    }

    /// User override file if it exists and parses, else the embedded list
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::embedded();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(directory) => {
                    debug!("Loaded {} sites from {:?}", directory.sites.len(), path);
                    directory
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}", path, e);
                    Self::embedded()
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                Self::embedded()
            }
        }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn get(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.id == id)
    }

    pub fn baseline_color(&self, id: &str) -> Option<&str> {
        self.get(id).map(|site| site.color.as_str())
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
