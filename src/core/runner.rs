//! Application runner logic
//!
//! Handles the different ways to run sitetheme: config initialization, the
//! headless subcommands and the interactive TUI.

use crate::core::app::{create_session, Session};
use crate::core::cli::{parse_field_path, CliArgs, Command};
use crate::core::config_file::ConfigFile;
use crate::logging::{self, LogDestination};
use crate::sites::SortKey;
use crate::theme::{render_css, SaveOutcome};
use crate::utils::truncate_text;
use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Create and run the application with the given CLI arguments.
/// Handles special CLI flags and delegates to appropriate runners.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    let config = ConfigFile::load().unwrap_or_default();
    let level = cli_args.log_level(&config);
    let interactive = cli_args.command.is_none() && !cli_args.no_tui && cfg!(feature = "tui");

    // The TUI owns the terminal, so its logs go to a file
    let destination = if interactive {
        LogDestination::File(ConfigFile::logs_dir())
    } else {
        LogDestination::Stderr
    };
    let _log_guard = logging::init(&level, &destination)?;

    let session = create_session(&cli_args, &config);
    let mut stdout = std::io::stdout();

    match cli_args.command {
        Some(command) => run_command(&session, &command, &mut stdout),
        None if !interactive => run_command(&session, &Command::Show, &mut stdout),
        None => {
            #[cfg(feature = "tui")]
            {
                crate::tui::run_app_with_tui(session)
            }
            #[cfg(not(feature = "tui"))]
            {
                bail!("TUI feature not compiled. Use --no-tui or a subcommand.")
            }
        }
    }
}

/// Run one headless subcommand against the session, printing to `out`
pub fn run_command(session: &Session, command: &Command, out: &mut impl Write) -> Result<()> {
    let site_id = session.site_id.as_str();

    match command {
        Command::Show => {
            let theme = session.store.load(site_id, &session.baseline);
            writeln!(out, "{}", serde_json::to_string_pretty(&theme)?)?;
        }
        Command::Color => {
            let color = session
                .store
                .load_primary_color_only(site_id, &session.baseline);
            writeln!(out, "{}", color)?;
        }
        Command::Set { field, value } => {
            let (section, spec) = parse_field_path(field).map_err(|e| anyhow!(e))?;
            let mut panel = session.panel();
            panel.open();
            panel.edit(section, spec.key, value)?;
            finish_save(session, panel.save())?;
            writeln!(out, "Saved {}.{} = {} for site '{}'", section, spec.key, value, site_id)?;
        }
        Command::Reset => {
            let mut panel = session.panel();
            panel.open();
            panel.reset();
            finish_save(session, panel.save())?;
            writeln!(out, "Reset theme for site '{}' to defaults", site_id)?;
        }
        Command::Css { out: None } => {
            let theme = session.store.load(site_id, &session.baseline);
            write!(out, "{}", render_css(site_id, &theme))?;
        }
        Command::Css { out: Some(path) } => {
            write_css(session, path, out)?;
        }
        Command::Sites { search, sort, desc } => {
            list_sites(session, search.as_deref().unwrap_or(""), *sort, *desc, out)?;
        }
    }
    Ok(())
}

fn finish_save(session: &Session, outcome: SaveOutcome) -> Result<()> {
    match outcome {
        SaveOutcome::Saved => Ok(()),
        SaveOutcome::StorageFailed => bail!(
            "Could not write the theme for site '{}' to {}",
            session.site_id,
            session.store.backend().describe()
        ),
        SaveOutcome::NotOpen => bail!("Theme panel for site '{}' is not open", session.site_id),
    }
}

/// Write the site's style block to a file, or export every element into a directory
fn write_css(session: &Session, path: &Path, out: &mut impl Write) -> Result<()> {
    let mut panel = session.panel();
    panel.open();
    panel.close();

    if path.is_dir() {
        for written in session.styles.borrow().export(path)? {
            writeln!(out, "Wrote {}", written.display())?;
        }
        return Ok(());
    }

    let styles = session.styles.borrow();
    let css = styles
        .css_for(&session.site_id)
        .ok_or_else(|| anyhow!("No style element for site '{}'", session.site_id))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, css).with_context(|| format!("Failed to write {:?}", path))?;
    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}

fn list_sites(
    session: &Session,
    search: &str,
    sort: SortKey,
    desc: bool,
    out: &mut impl Write,
) -> Result<()> {
    let direction = CliArgs::sort_direction(desc);
    let dashboard = session.dashboard();
    let cards = dashboard.listing(search, sort, direction);

    writeln!(
        out,
        "{:<4} {:<24} {:<12} {:<8} {:>5} {:>7}  {}",
        "ID", "NAME", "DEPARTMENT", "COLOR", "PAGES", "MEMBERS", "SLUG"
    )?;
    for card in &cards {
        writeln!(
            out,
            "{:<4} {:<24} {:<12} {:<8} {:>5} {:>7}  {}",
            card.site.id,
            truncate_text(&card.site.name, 21),
            truncate_text(&card.site.department, 9),
            card.color,
            card.site.pages,
            card.site.members,
            card.site.slug()
        )?;
    }
    if cards.is_empty() {
        writeln!(out, "No sites match '{}'", search)?;
    }
    Ok(())
}
