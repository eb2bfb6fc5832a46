//! Shared helpers: hex colors and listing text utilities

pub mod colors;
pub mod text;

pub use colors::{hex_to_rgb, is_valid_hex_color, normalize_hex, Rgb};
pub use text::{filter_by_search, generate_slug, sort_by_field, truncate_text, SortDirection};
