//! Site theme configuration model
//!
//! A [`ThemeConfig`] is the complete set of visual parameters for one site.
//! It is persisted as camelCase JSON, grouped into sections that mirror the
//! theme panel: color palette, text, buttons, background, header, footer and
//! utilities. Every field has a default; only `colorPalette.primary` depends
//! on the site (its baseline color).

use crate::utils::colors::is_valid_hex_color;
use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Baseline accent used when a caller has no site-specific color
pub const DEFAULT_PRIMARY_COLOR: &str = "#3161D1";

/// Declares a closed set of string-encoded options.
///
/// Generates serde renames, `as_str`, `parse`, `ALL`, `NAMES` and `Display`.
macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Case-insensitive lookup by serialized name
            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum! {
    /// Font families offered by the text section
    FontFamily {
        Inter => "Inter",
        Roboto => "Roboto",
        OpenSans => "Open Sans",
        Poppins => "Poppins",
        Lato => "Lato",
    }
}

choice_enum! {
    /// Decorative page background pattern
    BackgroundPattern {
        None => "none",
        Dots => "dots",
        Grid => "grid",
        Stripes => "stripes",
    }
}

choice_enum! {
    /// Box-shadow intensity preset
    ShadowLevel {
        None => "none",
        Light => "light",
        Medium => "medium",
        Strong => "strong",
    }
}

choice_enum! {
    /// Layout density preset
    Spacing {
        Compact => "compact",
        Normal => "normal",
        Spacious => "spacious",
    }
}

impl Default for FontFamily {
    fn default() -> Self {
        FontFamily::Inter
    }
}

impl Default for BackgroundPattern {
    fn default() -> Self {
        BackgroundPattern::None
    }
}

impl Default for ShadowLevel {
    fn default() -> Self {
        ShadowLevel::Medium
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing::Normal
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_secondary: String,
}

impl ColorPalette {
    pub fn with_primary(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: "#5774A8".to_string(),
            accent: "#10B981".to_string(),
            background: "#F5F6FA".to_string(),
            surface: "#FFFFFF".to_string(),
            text: "#1F2937".to_string(),
            text_secondary: "#6B7280".to_string(),
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::with_primary(DEFAULT_PRIMARY_COLOR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: FontFamily,
    pub font_size: String,
    pub line_height: String,
    pub font_weight: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            font_size: "16px".to_string(),
            line_height: "1.5".to_string(),
            font_weight: "400".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyle {
    pub border_radius: String,
    pub padding: String,
    pub font_size: String,
    pub font_weight: String,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            border_radius: "6px".to_string(),
            padding: "8px 16px".to_string(),
            font_size: "14px".to_string(),
            font_weight: "500".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundStyle {
    pub main_color: String,
    pub pattern: BackgroundPattern,
    /// Float in 0..=1, kept as the string the user entered
    pub opacity: String,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            main_color: "#F5F6FA".to_string(),
            pattern: BackgroundPattern::default(),
            opacity: "1".to_string(),
        }
    }
}

/// Shared shape of the header and footer sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarStyle {
    pub background_color: String,
    pub text_color: String,
    pub height: String,
    /// CSS border shorthand, e.g. `1px solid #E5E7EB`
    pub border: String,
}

impl BarStyle {
    pub fn header_default() -> Self {
        Self {
            background_color: "#FFFFFF".to_string(),
            text_color: "#1F2937".to_string(),
            height: "64px".to_string(),
            border: "1px solid #E5E7EB".to_string(),
        }
    }

    pub fn footer_default() -> Self {
        Self {
            background_color: "#F9FAFB".to_string(),
            text_color: "#6B7280".to_string(),
            height: "80px".to_string(),
            border: "1px solid #E5E7EB".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utilities {
    pub shadows: ShadowLevel,
    pub borders: String,
    pub spacing: Spacing,
}

impl Default for Utilities {
    fn default() -> Self {
        Self {
            shadows: ShadowLevel::default(),
            borders: "1px".to_string(),
            spacing: Spacing::default(),
        }
    }
}

/// Complete theme for one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub color_palette: ColorPalette,
    pub text: TextStyle,
    pub buttons: ButtonStyle,
    pub background: BackgroundStyle,
    pub header: BarStyle,
    pub footer: BarStyle,
    pub utilities: Utilities,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::with_primary(DEFAULT_PRIMARY_COLOR)
    }
}

impl ThemeConfig {
    /// Default theme seeded with a site's baseline accent color
    pub fn with_primary(primary: impl Into<String>) -> Self {
        Self {
            color_palette: ColorPalette::with_primary(primary),
            text: TextStyle::default(),
            buttons: ButtonStyle::default(),
            background: BackgroundStyle::default(),
            header: BarStyle::header_default(),
            footer: BarStyle::footer_default(),
            utilities: Utilities::default(),
        }
    }

    /// Current value of one field, rendered as it is serialized
    pub fn get(&self, section: ThemeSection, key: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        value
            .get(section.key())?
            .get(key)?
            .as_str()
            .map(str::to_string)
    }

    /// Validate and assign one field
    ///
    /// The config is untouched when the key is unknown or the value does not
    /// fit the field.
    pub fn set(&mut self, section: ThemeSection, key: &str, value: &str) -> Result<()> {
        let spec = section.field(key).ok_or_else(|| {
            anyhow!(
                "Unknown field '{}' in section '{}'. Available fields: {}",
                key,
                section.key(),
                section
                    .fields()
                    .iter()
                    .map(|f| f.key)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;

        let value = value.trim();
        spec.kind.validate(value).map_err(|reason| {
            anyhow!("Invalid value '{}' for {}.{}: {}", value, section.key(), key, reason)
        })?;

        match self.field_mut(section, key) {
            Some(FieldMut::Text(slot)) => *slot = value.to_string(),
            Some(FieldMut::FontFamily(slot)) => *slot = parse_choice(FontFamily::parse(value), value)?,
            Some(FieldMut::Pattern(slot)) => {
                *slot = parse_choice(BackgroundPattern::parse(value), value)?
            }
            Some(FieldMut::Shadows(slot)) => *slot = parse_choice(ShadowLevel::parse(value), value)?,
            Some(FieldMut::Spacing(slot)) => *slot = parse_choice(Spacing::parse(value), value)?,
            None => bail!("Field {}.{} is not editable", section.key(), key),
        }
        Ok(())
    }

    fn field_mut(&mut self, section: ThemeSection, key: &str) -> Option<FieldMut<'_>> {
        use ThemeSection as S;
        let slot = match (section, key) {
            (S::ColorPalette, "primary") => FieldMut::Text(&mut self.color_palette.primary),
            (S::ColorPalette, "secondary") => FieldMut::Text(&mut self.color_palette.secondary),
            (S::ColorPalette, "accent") => FieldMut::Text(&mut self.color_palette.accent),
            (S::ColorPalette, "background") => FieldMut::Text(&mut self.color_palette.background),
            (S::ColorPalette, "surface") => FieldMut::Text(&mut self.color_palette.surface),
            (S::ColorPalette, "text") => FieldMut::Text(&mut self.color_palette.text),
            (S::ColorPalette, "textSecondary") => {
                FieldMut::Text(&mut self.color_palette.text_secondary)
            }

            (S::Text, "fontFamily") => FieldMut::FontFamily(&mut self.text.font_family),
            (S::Text, "fontSize") => FieldMut::Text(&mut self.text.font_size),
            (S::Text, "lineHeight") => FieldMut::Text(&mut self.text.line_height),
            (S::Text, "fontWeight") => FieldMut::Text(&mut self.text.font_weight),

            (S::Buttons, "borderRadius") => FieldMut::Text(&mut self.buttons.border_radius),
            (S::Buttons, "padding") => FieldMut::Text(&mut self.buttons.padding),
            (S::Buttons, "fontSize") => FieldMut::Text(&mut self.buttons.font_size),
            (S::Buttons, "fontWeight") => FieldMut::Text(&mut self.buttons.font_weight),

            (S::Background, "mainColor") => FieldMut::Text(&mut self.background.main_color),
            (S::Background, "pattern") => FieldMut::Pattern(&mut self.background.pattern),
            (S::Background, "opacity") => FieldMut::Text(&mut self.background.opacity),

            (S::Header, key) => bar_field_mut(&mut self.header, key)?,
            (S::Footer, key) => bar_field_mut(&mut self.footer, key)?,

            (S::Utilities, "shadows") => FieldMut::Shadows(&mut self.utilities.shadows),
            (S::Utilities, "borders") => FieldMut::Text(&mut self.utilities.borders),
            (S::Utilities, "spacing") => FieldMut::Spacing(&mut self.utilities.spacing),

            _ => return None,
        };
        Some(slot)
    }
}

fn bar_field_mut<'a>(bar: &'a mut BarStyle, key: &str) -> Option<FieldMut<'a>> {
    let slot = match key {
        "backgroundColor" => &mut bar.background_color,
        "textColor" => &mut bar.text_color,
        "height" => &mut bar.height,
        "border" => &mut bar.border,
        _ => return None,
    };
    Some(FieldMut::Text(slot))
}

fn parse_choice<T>(parsed: Option<T>, raw: &str) -> Result<T> {
    parsed.ok_or_else(|| anyhow!("Unknown option '{}'", raw))
}

enum FieldMut<'a> {
    Text(&'a mut String),
    FontFamily(&'a mut FontFamily),
    Pattern(&'a mut BackgroundPattern),
    Shadows(&'a mut ShadowLevel),
    Spacing(&'a mut Spacing),
}

// =================================================================
// SECTIONS AND FIELD METADATA
// =================================================================

/// Field groups of the theme panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeSection {
    #[default]
    ColorPalette,
    Text,
    Buttons,
    Background,
    Header,
    Footer,
    Utilities,
}

impl ThemeSection {
    pub const ALL: [ThemeSection; 7] = [
        ThemeSection::ColorPalette,
        ThemeSection::Text,
        ThemeSection::Buttons,
        ThemeSection::Background,
        ThemeSection::Header,
        ThemeSection::Footer,
        ThemeSection::Utilities,
    ];

    /// JSON key of the section
    pub fn key(self) -> &'static str {
        match self {
            ThemeSection::ColorPalette => "colorPalette",
            ThemeSection::Text => "text",
            ThemeSection::Buttons => "buttons",
            ThemeSection::Background => "background",
            ThemeSection::Header => "header",
            ThemeSection::Footer => "footer",
            ThemeSection::Utilities => "utilities",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeSection::ColorPalette => "Color Palette",
            ThemeSection::Text => "Text",
            ThemeSection::Buttons => "Buttons",
            ThemeSection::Background => "Background",
            ThemeSection::Header => "Header",
            ThemeSection::Footer => "Footer",
            ThemeSection::Utilities => "Utilities",
        }
    }

    /// Accepts the JSON key or the label, ignoring case and separators
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = squash(s);
        Self::ALL
            .into_iter()
            .find(|section| squash(section.key()) == wanted || squash(section.label()) == wanted)
    }

    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.key()).collect()
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            ThemeSection::ColorPalette => COLOR_PALETTE_FIELDS,
            ThemeSection::Text => TEXT_FIELDS,
            ThemeSection::Buttons => BUTTON_FIELDS,
            ThemeSection::Background => BACKGROUND_FIELDS,
            ThemeSection::Header => HEADER_FIELDS,
            ThemeSection::Footer => FOOTER_FIELDS,
            ThemeSection::Utilities => UTILITY_FIELDS,
        }
    }

    pub fn field(self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.key == key)
    }
}

impl fmt::Display for ThemeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Whether `value` can sit inside a single CSS declaration
///
/// Anything that could end the declaration or its rule block is refused.
pub fn is_safe_css_value(value: &str) -> bool {
    !value.contains("/*")
        && !value.contains("*/")
        && !value
            .chars()
            .any(|c| matches!(c, '{' | '}' | ';' | '<' | '>' | '\\') || c.is_control())
}

/// What a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `#RGB` or `#RRGGBB`
    Color,
    /// Exactly one of the listed options
    Choice(&'static [&'static str]),
    /// Any non-empty CSS value; the list holds the suggested presets
    Preset(&'static [&'static str]),
    /// Float between 0 and 1
    Opacity,
}

impl FieldKind {
    pub fn validate(self, value: &str) -> std::result::Result<(), String> {
        match self {
            FieldKind::Color if is_valid_hex_color(value) => Ok(()),
            FieldKind::Color => Err("expected a hex color like #3161D1".to_string()),
            FieldKind::Choice(options) => {
                if options.iter().any(|o| o.eq_ignore_ascii_case(value)) {
                    Ok(())
                } else {
                    Err(format!("expected one of: {}", options.join(", ")))
                }
            }
            FieldKind::Preset(_) if value.is_empty() => Err("value must not be empty".to_string()),
            FieldKind::Preset(_) if !is_safe_css_value(value) => {
                Err("value must be a single CSS value without braces or semicolons".to_string())
            }
            FieldKind::Preset(_) => Ok(()),
            FieldKind::Opacity => match value.parse::<f32>() {
                Ok(v) if (0.0..=1.0).contains(&v) => Ok(()),
                _ => Err("expected a number between 0 and 1".to_string()),
            },
        }
    }

    /// Options to cycle through in the editor, if any
    pub fn options(self) -> &'static [&'static str] {
        match self {
            FieldKind::Choice(options) | FieldKind::Preset(options) => options,
            FieldKind::Color | FieldKind::Opacity => &[],
        }
    }
}

/// Static description of one editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { key, label, kind }
}

const FONT_SIZES: &[&str] = &["14px", "16px", "18px", "20px"];
const LINE_HEIGHTS: &[&str] = &["1.3", "1.5", "1.6", "1.8"];
const FONT_WEIGHTS: &[&str] = &["300", "400", "500", "600", "700"];
const BUTTON_RADII: &[&str] = &["0px", "4px", "6px", "8px", "12px", "50px"];
const BUTTON_PADDINGS: &[&str] = &["6px 12px", "8px 16px", "12px 24px", "16px 32px"];
const BUTTON_FONT_SIZES: &[&str] = &["12px", "14px", "16px", "18px"];
const BAR_HEIGHTS: &[&str] = &["48px", "64px", "80px", "96px"];
const BAR_BORDERS: &[&str] = &["none", "1px solid #E5E7EB", "2px solid #E5E7EB", "1px solid #D1D5DB"];
const BORDER_WIDTHS: &[&str] = &["0px", "1px", "2px", "3px"];

const COLOR_PALETTE_FIELDS: &[FieldSpec] = &[
    field("primary", "Primary", FieldKind::Color),
    field("secondary", "Secondary", FieldKind::Color),
    field("accent", "Accent", FieldKind::Color),
    field("background", "Background", FieldKind::Color),
    field("surface", "Surface", FieldKind::Color),
    field("text", "Text", FieldKind::Color),
    field("textSecondary", "Text Secondary", FieldKind::Color),
];

const TEXT_FIELDS: &[FieldSpec] = &[
    field("fontFamily", "Font Family", FieldKind::Choice(FontFamily::NAMES)),
    field("fontSize", "Font Size", FieldKind::Preset(FONT_SIZES)),
    field("lineHeight", "Line Height", FieldKind::Preset(LINE_HEIGHTS)),
    field("fontWeight", "Font Weight", FieldKind::Preset(FONT_WEIGHTS)),
];

const BUTTON_FIELDS: &[FieldSpec] = &[
    field("borderRadius", "Border Radius", FieldKind::Preset(BUTTON_RADII)),
    field("padding", "Padding", FieldKind::Preset(BUTTON_PADDINGS)),
    field("fontSize", "Font Size", FieldKind::Preset(BUTTON_FONT_SIZES)),
    field("fontWeight", "Font Weight", FieldKind::Preset(FONT_WEIGHTS)),
];

const BACKGROUND_FIELDS: &[FieldSpec] = &[
    field("mainColor", "Background Color", FieldKind::Color),
    field("pattern", "Pattern", FieldKind::Choice(BackgroundPattern::NAMES)),
    field("opacity", "Opacity", FieldKind::Opacity),
];

const HEADER_FIELDS: &[FieldSpec] = &[
    field("backgroundColor", "Background Color", FieldKind::Color),
    field("textColor", "Text Color", FieldKind::Color),
    field("height", "Height", FieldKind::Preset(BAR_HEIGHTS)),
    field("border", "Bottom Border", FieldKind::Preset(BAR_BORDERS)),
];

const FOOTER_FIELDS: &[FieldSpec] = &[
    field("backgroundColor", "Background Color", FieldKind::Color),
    field("textColor", "Text Color", FieldKind::Color),
    field("height", "Height", FieldKind::Preset(BAR_HEIGHTS)),
    field("border", "Top Border", FieldKind::Preset(BAR_BORDERS)),
];

const UTILITY_FIELDS: &[FieldSpec] = &[
    field("shadows", "Shadow Intensity", FieldKind::Choice(ShadowLevel::NAMES)),
    field("borders", "Border Width", FieldKind::Preset(BORDER_WIDTHS)),
    field("spacing", "Spacing", FieldKind::Choice(Spacing::NAMES)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_baseline() {
        let theme = ThemeConfig::with_primary("#112233");
        assert_eq!(theme.color_palette.primary, "#112233");
        assert_eq!(theme.color_palette.secondary, "#5774A8");
        assert_eq!(theme.text.font_family, FontFamily::Inter);
        assert_eq!(theme.header.height, "64px");
        assert_eq!(theme.footer.height, "80px");
        assert_eq!(theme.utilities.shadows, ShadowLevel::Medium);
        assert_eq!(ThemeConfig::default().color_palette.primary, DEFAULT_PRIMARY_COLOR);
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let value = serde_json::to_value(ThemeConfig::default()).unwrap();
        assert_eq!(value["colorPalette"]["textSecondary"], "#6B7280");
        assert_eq!(value["text"]["fontFamily"], "Inter");
        assert_eq!(value["background"]["pattern"], "none");
        assert_eq!(value["header"]["border"], "1px solid #E5E7EB");
        assert_eq!(value["utilities"]["spacing"], "normal");
    }

    #[test]
    fn test_enum_names_round_trip_through_serde() {
        let theme: TextStyle = serde_json::from_value(serde_json::json!({
            "fontFamily": "Open Sans",
            "fontSize": "18px",
            "lineHeight": "1.6",
            "fontWeight": "600"
        }))
        .unwrap();
        assert_eq!(theme.font_family, FontFamily::OpenSans);
        assert_eq!(FontFamily::parse("open sans"), Some(FontFamily::OpenSans));
        assert_eq!(BackgroundPattern::parse("zigzag"), None);
    }

    #[test]
    fn test_set_updates_exactly_one_field() {
        let mut theme = ThemeConfig::default();
        let before = theme.clone();

        theme
            .set(ThemeSection::ColorPalette, "accent", "#ABCDEF")
            .unwrap();
        assert_eq!(theme.color_palette.accent, "#ABCDEF");

        let mut expected = before;
        expected.color_palette.accent = "#ABCDEF".to_string();
        assert_eq!(theme, expected);
    }

    #[test]
    fn test_set_handles_enum_and_bar_fields() {
        let mut theme = ThemeConfig::default();
        theme.set(ThemeSection::Text, "fontFamily", "Poppins").unwrap();
        theme.set(ThemeSection::Background, "pattern", "grid").unwrap();
        theme.set(ThemeSection::Footer, "border", "none").unwrap();
        theme.set(ThemeSection::Utilities, "spacing", "Spacious").unwrap();

        assert_eq!(theme.text.font_family, FontFamily::Poppins);
        assert_eq!(theme.background.pattern, BackgroundPattern::Grid);
        assert_eq!(theme.footer.border, "none");
        assert_eq!(theme.header.border, "1px solid #E5E7EB");
        assert_eq!(theme.utilities.spacing, Spacing::Spacious);
    }

    #[test]
    fn test_set_rejects_bad_input_without_mutating() {
        let mut theme = ThemeConfig::default();
        let before = theme.clone();

        assert!(theme.set(ThemeSection::ColorPalette, "primary", "FFFFFF").is_err());
        assert!(theme.set(ThemeSection::ColorPalette, "nope", "#FFF").is_err());
        assert!(theme.set(ThemeSection::Background, "pattern", "zigzag").is_err());
        assert!(theme.set(ThemeSection::Background, "opacity", "1.5").is_err());
        assert!(theme.set(ThemeSection::Buttons, "padding", "   ").is_err());

        assert_eq!(theme, before);
    }

    #[test]
    fn test_preset_values_cannot_leave_their_declaration() {
        let mut theme = ThemeConfig::default();
        let before = theme.clone();

        for value in [
            "8px } [data-site-theme=\"2\"] .btn-primary { background-color: red",
            "8px; color: red",
            "8px </style>",
            "8px /* comment",
            "8px \\",
            "8px\u{7}",
        ] {
            assert!(theme.set(ThemeSection::Buttons, "padding", value).is_err(), "{value}");
        }
        assert_eq!(theme, before);

        theme.set(ThemeSection::Buttons, "padding", "10px 20px").unwrap();
        assert_eq!(theme.buttons.padding, "10px 20px");
        assert!(is_safe_css_value("1px solid #E5E7EB"));
        assert!(is_safe_css_value("\"Inter\", sans-serif"));
    }

    #[test]
    fn test_get_reads_serialized_values() {
        let theme = ThemeConfig::with_primary("#112233");
        assert_eq!(
            theme.get(ThemeSection::ColorPalette, "primary").as_deref(),
            Some("#112233")
        );
        assert_eq!(theme.get(ThemeSection::Text, "fontFamily").as_deref(), Some("Inter"));
        assert_eq!(theme.get(ThemeSection::Header, "missing"), None);
    }

    #[test]
    fn test_every_declared_field_is_editable() {
        for section in ThemeSection::ALL {
            for spec in section.fields() {
                let mut theme = ThemeConfig::default();
                let current = theme
                    .get(section, spec.key)
                    .unwrap_or_else(|| panic!("{}.{} missing", section, spec.key));
                theme
                    .set(section, spec.key, &current)
                    .unwrap_or_else(|e| panic!("{}.{}: {}", section, spec.key, e));
            }
        }
    }

    #[test]
    fn test_section_parsing_and_cycling() {
        assert_eq!(ThemeSection::parse("colorPalette"), Some(ThemeSection::ColorPalette));
        assert_eq!(ThemeSection::parse("Color Palette"), Some(ThemeSection::ColorPalette));
        assert_eq!(ThemeSection::parse("color-palette"), Some(ThemeSection::ColorPalette));
        assert_eq!(ThemeSection::parse("sidebar"), None);
        assert_eq!(ThemeSection::Utilities.next(), ThemeSection::ColorPalette);
        assert_eq!(ThemeSection::ColorPalette.previous(), ThemeSection::Utilities);
    }
}
