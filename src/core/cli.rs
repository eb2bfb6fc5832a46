//! Command line interface for sitetheme
//!
//! Handles parsing command line arguments and provides validation for user
//! inputs. Site, baseline and storage settings resolve in the order
//! CLI > settings.json > built-in default.

use crate::core::config_file::ConfigFile;
use crate::sites::{SiteDirectory, SortKey};
use crate::theme::{FieldSpec, ThemeSection, DEFAULT_PRIMARY_COLOR};
use crate::utils::{is_valid_hex_color, SortDirection};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Site id used when neither the CLI, the config file nor the site list names one
pub const FALLBACK_SITE_ID: &str = "1";

/// sitetheme CLI arguments
///
/// Examples:
///   sitetheme                                   # Theme panel for the default site
///   sitetheme --site 3                          # Theme panel for site 3
///   sitetheme -s 3 show                         # Print the merged theme as JSON
///   sitetheme -s 3 set colorPalette.accent '#ABCDEF'
///   sitetheme -s 3 css --out site-3.css         # Write the derived style block
///   sitetheme sites --search team --sort pages --desc
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "sitetheme",
    version,
    about = "Per-site theme editor for a multi-tenant site builder",
    long_about = "sitetheme edits, persists and previews the visual theme of each site in a multi-tenant site builder. Themes are stored per site, merged over defaults on load, and every save is broadcast to the views rendering that site."
)]
pub struct CliArgs {
    /// Site to edit or inspect
    #[clap(
        long = "site",
        short = 's',
        global = true,
        help = "Site id to edit or inspect",
        long_help = "Site id to edit or inspect. Defaults to default_site from settings.json, then to the first site in the site list."
    )]
    pub site: Option<String>,

    /// Baseline accent color for sites without a saved theme
    #[clap(
        long = "baseline",
        short = 'b',
        global = true,
        help = "Baseline primary color (#RGB or #RRGGBB)",
        long_help = "Primary color used when the site has no saved theme, and restored by reset. Defaults to the site's color from the site list, then to #3161D1."
    )]
    pub baseline: Option<String>,

    /// Directory holding one JSON file per site theme
    #[clap(
        long = "store",
        global = true,
        help = "Theme storage directory",
        long_help = "Directory holding one JSON file per site theme. Defaults to storage_dir from settings.json, then to ~/.config/sitetheme/themes."
    )]
    pub store: Option<PathBuf>,

    /// Initialize user configuration directory
    ///
    /// This creates the ~/.config/sitetheme directory with:
    /// - settings.json: default site, storage directory, log level
    /// - sites.json: an editable copy of the built-in site list
    /// - themes/ and logs/
    #[clap(
        long = "new-config",
        help = "Initialize user config directory",
        long_help = "Initialize the ~/.config/sitetheme directory with settings.json, an editable sites.json and the themes/ and logs/ directories."
    )]
    pub new_config: bool,

    /// Disable the Terminal User Interface
    #[clap(
        long = "no-tui",
        help = "Disable Terminal User Interface mode",
        long_help = "Without a subcommand sitetheme opens the interactive theme panel. With this flag it prints the site's merged theme instead."
    )]
    pub no_tui: bool,

    /// Verbose logging
    #[clap(
        long = "verbose",
        short = 'v',
        global = true,
        help = "Enable debug logging"
    )]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the site's merged theme as JSON
    Show,
    /// Print the site's primary color
    Color,
    /// Set one field and save, e.g. `set buttons.borderRadius 8px`
    Set {
        /// Field path as <section>.<field>
        field: String,
        value: String,
    },
    /// Restore the defaults for the site and save
    Reset,
    /// Print the site's style block, or write it to a file
    Css {
        #[clap(long = "out", short = 'o')]
        out: Option<PathBuf>,
    },
    /// List sites with their current colors
    Sites {
        /// Case-insensitive match on name, department and description
        #[clap(long = "search")]
        search: Option<String>,
        #[clap(long = "sort", default_value = "name", value_parser = parse_sort_key)]
        sort: SortKey,
        /// Sort descending
        #[clap(long = "desc")]
        desc: bool,
    },
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::parse(s).ok_or_else(|| format!("expected one of: name, pages, members (got '{s}')"))
}

/// Split `section.field` into the section and its field metadata
pub fn parse_field_path(path: &str) -> Result<(ThemeSection, &'static FieldSpec), String> {
    let Some((section_name, field_name)) = path.split_once('.') else {
        return Err(format!(
            "Field must be written as <section>.<field>, got '{path}'"
        ));
    };

    let section = ThemeSection::parse(section_name).ok_or_else(|| {
        format!(
            "Unknown section: '{section_name}'\nAvailable sections: {}",
            ThemeSection::all_names().join(", ")
        )
    })?;

    let field = section.field(field_name).ok_or_else(|| {
        let available: Vec<&str> = section.fields().iter().map(|field| field.key).collect();
        format!(
            "Unknown field '{field_name}' in {}\nAvailable fields: {}",
            section.key(),
            available.join(", ")
        )
    })?;

    Ok((section, field))
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    pub fn validate(&self) -> Result<(), String> {
        if let Some(site) = &self.site {
            if site.trim().is_empty() {
                return Err("Site id must not be empty".to_string());
            }
        }

        if let Some(baseline) = &self.baseline {
            if !is_valid_hex_color(baseline) {
                return Err(format!(
                    "Invalid baseline color: '{baseline}'\nUse #RGB or #RRGGBB, e.g. #3161D1"
                ));
            }
        }

        if let Some(store) = &self.store {
            if store.exists() && !store.is_dir() {
                return Err(format!(
                    "Theme store is not a directory: {}",
                    store.display()
                ));
            }
        }

        if let Some(Command::Set { field, value }) = &self.command {
            let (section, spec) = parse_field_path(field)?;
            spec.kind
                .validate(value)
                .map_err(|e| format!("Invalid value for {}.{}: {e}", section.key(), spec.key))?;
        }

        Ok(())
    }

    /// Get the site id from CLI args, config file, or default
    ///
    /// Priority order:
    /// 1. CLI argument (--site)
    /// 2. Config file setting (default_site)
    /// 3. First site in the site list
    pub fn resolve_site(&self, config: &ConfigFile, directory: &SiteDirectory) -> String {
        if let Some(site) = &self.site {
            debug!("Using site from CLI: {}", site);
            return site.clone();
        }

        if let Some(site) = &config.default_site {
            debug!("Using site from config file: {}", site);
            return site.clone();
        }

        let site = directory
            .sites()
            .first()
            .map(|site| site.id.clone())
            .unwrap_or_else(|| FALLBACK_SITE_ID.to_string());
        debug!("Using default site: {}", site);
        site
    }

    /// Baseline primary color: --baseline, the site's listed color, or the global default
    pub fn resolve_baseline(&self, site_id: &str, directory: &SiteDirectory) -> String {
        if let Some(baseline) = &self.baseline {
            return baseline.clone();
        }
        directory
            .baseline_color(site_id)
            .unwrap_or(DEFAULT_PRIMARY_COLOR)
            .to_string()
    }

    /// Storage directory: --store, storage_dir from settings.json, or ~/.config/sitetheme/themes
    pub fn resolve_store_dir(&self, config: &ConfigFile) -> PathBuf {
        self.store
            .clone()
            .or_else(|| config.storage_dir.clone())
            .unwrap_or_else(ConfigFile::themes_dir)
    }

    /// Log filter directive: -v, log_level from settings.json, or info
    pub fn log_level(&self, config: &ConfigFile) -> String {
        if self.verbose {
            return "debug".to_string();
        }
        config
            .log_level
            .clone()
            .unwrap_or_else(|| "info".to_string())
    }

    pub fn sort_direction(desc: bool) -> SortDirection {
        if desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("sitetheme").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parses_global_flags_after_subcommand() {
        let args = parse(&["show", "--site", "3", "-v"]);
        assert_eq!(args.site.as_deref(), Some("3"));
        assert!(args.verbose);
        assert_eq!(args.command, Some(Command::Show));
    }

    #[test]
    fn test_parses_sites_listing() {
        let args = parse(&["sites", "--search", "team", "--sort", "pages", "--desc"]);
        assert_eq!(
            args.command,
            Some(Command::Sites {
                search: Some("team".to_string()),
                sort: SortKey::Pages,
                desc: true,
            })
        );
        assert!(CliArgs::try_parse_from(["sitetheme", "sites", "--sort", "size"]).is_err());
    }

    #[test]
    fn test_validate_baseline_and_field() {
        assert!(parse(&["--baseline", "#112233"]).validate().is_ok());
        assert!(parse(&["--baseline", "112233"]).validate().is_err());
        assert!(parse(&["set", "colorPalette.accent", "#ABCDEF"]).validate().is_ok());
        assert!(parse(&["set", "colorPalette.accent", "blue"]).validate().is_err());
        assert!(parse(&["set", "colorPalette.nope", "#ABCDEF"]).validate().is_err());
        assert!(parse(&["set", "accent", "#ABCDEF"]).validate().is_err());
        assert!(parse(&["--site", " "]).validate().is_err());
    }

    #[test]
    fn test_parse_field_path() {
        let (section, field) = parse_field_path("background.pattern").unwrap();
        assert_eq!(section, ThemeSection::Background);
        assert_eq!(field.key, "pattern");
        assert!(parse_field_path("colors.primary").is_err());
    }

    #[test]
    fn test_resolution_priority() {
        let directory = SiteDirectory::embedded();
        let config = ConfigFile {
            default_site: Some("4".to_string()),
            storage_dir: Some(PathBuf::from("/tmp/themes")),
            log_level: Some("warn".to_string()),
        };

        let args = parse(&[]);
        assert_eq!(args.resolve_site(&config, &directory), "4");
        assert_eq!(args.resolve_site(&ConfigFile::default(), &directory), "1");
        assert_eq!(args.resolve_store_dir(&config), PathBuf::from("/tmp/themes"));
        assert_eq!(args.log_level(&config), "warn");
        assert_eq!(args.resolve_baseline("4", &directory), "#8B9FE6");
        assert_eq!(args.resolve_baseline("unknown", &directory), DEFAULT_PRIMARY_COLOR);

        let args = parse(&["-s", "2", "-b", "#000", "--store", "/srv/themes", "-v"]);
        assert_eq!(args.resolve_site(&config, &directory), "2");
        assert_eq!(args.resolve_baseline("2", &directory), "#000");
        assert_eq!(args.resolve_store_dir(&config), PathBuf::from("/srv/themes"));
        assert_eq!(args.log_level(&config), "debug");
    }
}
