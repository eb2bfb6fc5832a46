//! Per-site theme editor for a multi-tenant site builder.
//!
//! Edits are previewed live, saved per site, and pushed to every view that
//! renders the site.

use anyhow::Result;
use sitetheme::core;

/// Run the application with the given CLI arguments.
fn run_app(cli_args: core::cli::CliArgs) -> Result<()> {
    core::runner::run_app(cli_args)
}

fn main() {
    core::platform::init_panic_handling();
    let cli_args = core::platform::get_cli_args();
    match run_app(cli_args) {
        Ok(()) => {}
        Err(error) => core::platform::handle_error(error),
    }
}
