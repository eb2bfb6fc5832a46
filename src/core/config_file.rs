//! User configuration file handling
//!
//! Manages settings from ~/.config/sitetheme/settings.json

use crate::sites::DEFAULT_SITES_JSON;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// User configuration from ~/.config/sitetheme/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Site opened when --site is not given
    #[serde(default)]
    pub default_site: Option<String>,
    /// Theme storage directory (defaults to ~/.config/sitetheme/themes)
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    /// Log filter directive such as "info" or "sitetheme=debug"
    #[serde(default)]
    pub log_level: Option<String>,
}

impl ConfigFile {
    /// Get the path to the sitetheme config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("sitetheme")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the user site list
    pub fn sites_path() -> PathBuf {
        Self::config_dir().join("sites.json")
    }

    /// Default theme storage directory
    pub fn themes_dir() -> PathBuf {
        Self::config_dir().join("themes")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse settings.json: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read settings.json: {}", e);
                None
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Initialize the complete user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/sitetheme directory structure
    /// 2. A settings.json file with default values
    /// 3. A sites.json copy of the built-in site list
    /// 4. The themes/ and logs/ directories
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        Self::initialize_in(&Self::config_dir())
    }

    /// Create the configuration layout under `config_dir`, keeping existing files
    pub fn initialize_in(config_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let themes_dir = config_dir.join("themes");
        fs::create_dir_all(&themes_dir)?;
        println!("Created themes directory: {:?}", themes_dir);

        let settings_path = config_dir.join("settings.json");
        if !settings_path.exists() {
            let example = ConfigFile {
                default_site: Some("1".to_string()),
                storage_dir: Some(themes_dir.clone()),
                log_level: Some("info".to_string()),
            };
            example.save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        let sites_path = config_dir.join("sites.json");
        if !sites_path.exists() {
            fs::write(&sites_path, DEFAULT_SITES_JSON)?;
            println!("Created site list: {:?}", sites_path);
        } else {
            println!("Site list already exists: {:?}", sites_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - Add or rename sites in: {:?}", sites_path);
        println!("  - Find saved site themes in: {:?}", themes_dir);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}
