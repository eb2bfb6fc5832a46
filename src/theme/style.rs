//! Runtime CSS derived from a site theme
//!
//! Each site gets exactly one style element, identified by
//! `site-theme-style-<siteId>`, holding CSS custom properties and a few
//! global overrides scoped under `[data-site-theme="<siteId>"]`. Applying a
//! theme replaces that site's element; it never appends a second one, and
//! one site's rules never touch another site's scope.

use super::config::{is_safe_css_value, BackgroundPattern, ShadowLevel, Spacing, ThemeConfig};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Prefix of every style element id
pub const STYLE_ID_PREFIX: &str = "site-theme-style-";

/// Deterministic style element id for a site
///
/// Bytes outside `[A-Za-z0-9-]` become `_XX`, which keeps the mapping
/// one-to-one across site ids.
pub fn style_element_id(site_id: &str) -> String {
    let mut id = String::from(STYLE_ID_PREFIX);
    for byte in site_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            id.push(byte as char);
        } else {
            let _ = write!(id, "_{:02X}", byte);
        }
    }
    id
}

/// Selector scoping a site's rules
pub fn scope_selector(site_id: &str) -> String {
    format!("[data-site-theme=\"{}\"]", escape_css_string(site_id))
}

fn escape_css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\{:x} ", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

fn shadow_value(level: ShadowLevel) -> &'static str {
    match level {
        ShadowLevel::None => "none",
        ShadowLevel::Light => "0 1px 2px rgba(0, 0, 0, 0.05)",
        ShadowLevel::Medium => "0 4px 6px rgba(0, 0, 0, 0.1)",
        ShadowLevel::Strong => "0 10px 15px rgba(0, 0, 0, 0.2)",
    }
}

fn spacing_value(spacing: Spacing) -> &'static str {
    match spacing {
        Spacing::Compact => "0.75rem",
        Spacing::Normal => "1rem",
        Spacing::Spacious => "1.5rem",
    }
}

fn pattern_value(pattern: BackgroundPattern) -> &'static str {
    match pattern {
        BackgroundPattern::None => "none",
        BackgroundPattern::Dots => {
            "radial-gradient(rgba(0, 0, 0, 0.08) 1px, transparent 1px)"
        }
        BackgroundPattern::Grid => {
            "linear-gradient(rgba(0, 0, 0, 0.05) 1px, transparent 1px), linear-gradient(90deg, rgba(0, 0, 0, 0.05) 1px, transparent 1px)"
        }
        BackgroundPattern::Stripes => {
            "repeating-linear-gradient(45deg, rgba(0, 0, 0, 0.04) 0, rgba(0, 0, 0, 0.04) 10px, transparent 10px, transparent 20px)"
        }
    }
}

/// CSS custom properties for a theme, in declaration order
pub fn custom_properties(theme: &ThemeConfig) -> Vec<(&'static str, String)> {
    let c = &theme.color_palette;
    vec![
        ("--color-primary", c.primary.clone()),
        ("--color-secondary", c.secondary.clone()),
        ("--color-accent", c.accent.clone()),
        ("--color-background", c.background.clone()),
        ("--color-surface", c.surface.clone()),
        ("--color-text", c.text.clone()),
        ("--color-text-secondary", c.text_secondary.clone()),
        ("--font-family", format!("\"{}\", sans-serif", theme.text.font_family)),
        ("--font-size", theme.text.font_size.clone()),
        ("--line-height", theme.text.line_height.clone()),
        ("--font-weight", theme.text.font_weight.clone()),
        ("--button-border-radius", theme.buttons.border_radius.clone()),
        ("--button-padding", theme.buttons.padding.clone()),
        ("--button-font-size", theme.buttons.font_size.clone()),
        ("--button-font-weight", theme.buttons.font_weight.clone()),
        ("--background-color", theme.background.main_color.clone()),
        ("--background-opacity", theme.background.opacity.clone()),
        ("--header-bg", theme.header.background_color.clone()),
        ("--header-text", theme.header.text_color.clone()),
        ("--header-height", theme.header.height.clone()),
        ("--header-border", theme.header.border.clone()),
        ("--footer-bg", theme.footer.background_color.clone()),
        ("--footer-text", theme.footer.text_color.clone()),
        ("--footer-height", theme.footer.height.clone()),
        ("--footer-border", theme.footer.border.clone()),
        ("--border-width", theme.utilities.borders.clone()),
        ("--shadow", shadow_value(theme.utilities.shadows).to_string()),
        ("--spacing-unit", spacing_value(theme.utilities.spacing).to_string()),
    ]
}

/// Full style block for one site
pub fn render_css(site_id: &str, theme: &ThemeConfig) -> String {
    let scope = scope_selector(site_id);
    let mut css = String::new();

    let _ = writeln!(css, "/* {} */", style_element_id(site_id));
    let _ = writeln!(css, "{} {{", scope);
    for (name, value) in custom_properties(theme) {
        if !is_safe_css_value(&value) {
            warn!("Skipping {} for site {}: unsafe value {:?}", name, site_id, value);
            continue;
        }
        let _ = writeln!(css, "  {}: {};", name, value);
    }
    let _ = writeln!(css, "  background-color: var(--background-color);");
    let _ = writeln!(css, "  background-image: {};", pattern_value(theme.background.pattern));
    if theme.background.pattern != BackgroundPattern::None {
        let _ = writeln!(css, "  background-size: 20px 20px;");
    }
    let _ = writeln!(css, "  color: var(--color-text);");
    let _ = writeln!(css, "  font-family: var(--font-family);");
    let _ = writeln!(css, "  font-size: var(--font-size);");
    let _ = writeln!(css, "  line-height: var(--line-height);");
    let _ = writeln!(css, "}}");

    let _ = writeln!(
        css,
        "{scope} .btn-primary {{ background-color: var(--color-primary); border-radius: var(--button-border-radius); padding: var(--button-padding); font-size: var(--button-font-size); font-weight: var(--button-font-weight); box-shadow: var(--shadow); }}"
    );
    let _ = writeln!(
        css,
        "{scope} header {{ background-color: var(--header-bg); color: var(--header-text); height: var(--header-height); border-bottom: var(--header-border); }}"
    );
    let _ = writeln!(
        css,
        "{scope} footer {{ background-color: var(--footer-bg); color: var(--footer-text); height: var(--footer-height); border-top: var(--footer-border); }}"
    );
    let _ = writeln!(css, "{scope} a {{ color: var(--color-primary); }}");
    let _ = writeln!(
        css,
        "{scope} .card {{ background-color: var(--color-surface); border-width: var(--border-width); box-shadow: var(--shadow); padding: var(--spacing-unit); }}"
    );

    css
}

/// One injected style element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleElement {
    pub id: String,
    pub site_id: String,
    pub css: String,
}

/// The set of injected per-site style elements
///
/// Stands in for the document's `<head>`: at most one element per site.
#[derive(Debug, Default, Clone)]
pub struct StyleRegistry {
    elements: BTreeMap<String, StyleElement>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive and install a site's style element, replacing any previous one
    pub fn apply(&mut self, site_id: &str, theme: &ThemeConfig) -> &StyleElement {
        let id = style_element_id(site_id);
        let css = render_css(site_id, theme);
        debug!("Applying style element '{}' ({} bytes)", id, css.len());

        let element = StyleElement {
            id: id.clone(),
            site_id: site_id.to_string(),
            css,
        };
        self.elements.insert(id.clone(), element);
        &self.elements[&id]
    }

    pub fn get(&self, site_id: &str) -> Option<&StyleElement> {
        self.elements.get(&style_element_id(site_id))
    }

    pub fn css_for(&self, site_id: &str) -> Option<&str> {
        self.get(site_id).map(|e| e.css.as_str())
    }

    /// Number of elements belonging to `site_id`
    pub fn count_for(&self, site_id: &str) -> usize {
        self.elements
            .values()
            .filter(|element| element.site_id == site_id)
            .count()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Write every element to `<dir>/<element id>.css`, returning the paths
    pub fn export(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
        let mut written = Vec::with_capacity(self.elements.len());
        for element in self.elements.values() {
            let path = dir.join(format!("{}.css", element.id));
            fs::write(&path, &element.css)
                .with_context(|| format!("Failed to write {:?}", path))?;
            written.push(path);
        }
        Ok(written)
    }
}
