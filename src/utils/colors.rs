//! Hex color helpers
//!
//! Theme colors are stored as CSS hex strings (`#RGB` or `#RRGGBB`). These
//! helpers validate and decode them without pulling in a color crate.

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB` form
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Relative luminance in 0.0..=1.0 (WCAG definition)
    pub fn luminance(self) -> f32 {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// Whether dark text reads better than light text on this color
    pub fn prefers_dark_text(self) -> bool {
        self.luminance() > 0.179
    }
}

/// Returns true for `#RGB` and `#RRGGBB` strings (the leading `#` is required)
pub fn is_valid_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse a hex color, with or without the leading `#`
///
/// Three-digit shorthand is expanded (`#abc` becomes `#aabbcc`).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

/// Normalize a valid hex color to uppercase `#RRGGBB`
pub fn normalize_hex(color: &str) -> Option<String> {
    if !is_valid_hex_color(color) {
        return None;
    }
    hex_to_rgb(color).map(Rgb::to_hex)
}
