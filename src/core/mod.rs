//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Session setup (store, bus, style registry)
//! - Settings and CLI handling
//! - Headless command runner

pub mod app;
pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;

pub use app::{create_session, Session};
pub use cli::{CliArgs, Command};
pub use config_file::ConfigFile;
pub use runner::{run_app, run_command};
