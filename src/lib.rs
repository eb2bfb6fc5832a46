//! sitetheme
pub mod core;
pub mod logging;
pub mod sites;
#[cfg(test)]
mod tests;
pub mod theme;
#[cfg(feature = "tui")]
pub mod tui;
pub mod utils;
