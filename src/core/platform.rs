//! Process-level setup and error reporting

use crate::core::cli::CliArgs;
use clap::Parser;

/// Report panics through the log as well as stderr.
pub fn init_panic_handling() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("{}", info);
        default_hook(info);
    }));
}

/// Print the error to stderr and exit with code 1.
pub fn handle_error(error: anyhow::Error) {
    eprintln!();
    eprintln!("Error running sitetheme:");
    eprintln!("{error:#}");
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse and validate command line arguments, exiting on invalid input.
pub fn get_cli_args() -> CliArgs {
    let cli_args = CliArgs::parse();
    if let Err(message) = cli_args.validate() {
        handle_error(anyhow::anyhow!(message));
    }
    cli_args
}
