//! CLI entry point for mode-tables
//!
//! Provides a command-line interface for checking mode files for
//! overrides, showing built tables, and exporting them as JSON.

use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use mode_tables::config::load_mode_specs;
use mode_tables::core::{build, ModeTables, Override, OverrideDetector};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "mode-tables")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a mode file for shadowed triggers and re-entry transfers
    Check {
        /// Path to mode file
        #[arg(short, long, default_value = "~/.config/mode-tables/modes.conf")]
        file: PathBuf,
    },

    /// Show dispatch tables and the re-entry index
    Show {
        /// Path to mode file
        #[arg(short, long, default_value = "~/.config/mode-tables/modes.conf")]
        file: PathBuf,

        /// Only show this mode
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Export built tables as JSON
    Export {
        /// Path to mode file
        #[arg(short, long, default_value = "~/.config/mode-tables/modes.conf")]
        file: PathBuf,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Check { file } => check_overrides(&file)?,
        Commands::Show { file, mode } => show_tables(&file, mode.as_deref())?,
        Commands::Export { file, pretty } => export_tables(&file, pretty)?,
    }

    Ok(())
}

/// Install a stderr subscriber
///
/// Filter priority: `MODE_TABLES_LOG` > `RUST_LOG` > `-v` count.
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = match std::env::var("MODE_TABLES_LOG").or_else(|_| std::env::var("RUST_LOG")) {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }),
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}

/// Check a mode file for last-write-wins overrides
fn check_overrides(path: &PathBuf) -> anyhow::Result<()> {
    println!("{} Parsing modes: {}", "→".cyan(), path.display());

    let modes = load_mode_specs(path)?;

    // Fail on structural errors before reporting overrides
    let tables = build(&modes)?;

    println!(
        "{} Built {} mode{}\n",
        "✓".green(),
        tables.len(),
        if tables.len() == 1 { "" } else { "s" }
    );

    let overrides = OverrideDetector::from_specs(&modes).find_overrides();
    let shadowed = overrides.iter().filter(|o| o.is_shadowing()).count();

    if overrides.is_empty() {
        println!("{} {}", "✓".green().bold(), "No overrides detected!".bold());
        return Ok(());
    }

    for (i, found) in overrides.iter().enumerate() {
        match found {
            Override::TriggerShadowed { mode, trigger, actions } => {
                println!(
                    "{} {} in {}",
                    format!("Shadowed {}", i + 1).yellow().bold(),
                    trigger.cyan(),
                    mode.magenta()
                );
                print_chain(actions.iter().map(|a| a.to_string()));
            }
            Override::ReentryTransferred { action, modes } => {
                println!(
                    "{} {}",
                    format!("Re-entry {}", i + 1).blue().bold(),
                    action.to_string().cyan()
                );
                print_chain(modes.iter().cloned());
            }
        }
        println!();
    }

    if shadowed > 0 {
        println!("{}", "⚠ Shadowed triggers never reach their earlier actions!".yellow());
        std::process::exit(1);
    }

    Ok(())
}

/// Print an override chain, marking the winner
fn print_chain(items: impl ExactSizeIterator<Item = String>) {
    let last = items.len().saturating_sub(1);

    for (idx, item) in items.enumerate() {
        if idx == last {
            println!("  {} {} {}", format!("{}.", idx + 1).dimmed(), item.green(), "(wins)".dimmed());
        } else {
            println!("  {} {}", format!("{}.", idx + 1).dimmed(), item);
        }
    }
}

/// Show built tables
fn show_tables(path: &PathBuf, only: Option<&str>) -> anyhow::Result<()> {
    let tables = load_tables(path)?;

    if let Some(mode) = only {
        if tables.table(mode).is_none() {
            anyhow::bail!("No mode named '{}'", mode);
        }
    }

    println!("{}", format!("Modes from: {}\n", path.display()).bold());

    for table in tables.tables() {
        if only.is_some_and(|mode| mode != table.mode_name()) {
            continue;
        }

        println!("{}", table.mode_name().magenta().bold());

        for (trigger, action) in table.bindings() {
            let marker = match tables.reentry_mode(action) {
                Some(owner) if owner == table.mode_name() => "↺".green(),
                Some(_) => "→".blue(),
                None => "✗".dimmed(),
            };
            println!("  {} {} {}", trigger.cyan().bold(), marker, action);
        }
        println!();
    }

    println!("{}", "Re-entry".bold());
    for (action, mode) in tables.reentry().iter() {
        if only.is_some_and(|only| only != mode) {
            continue;
        }
        println!("  {} → {}", action.to_string().green(), mode.magenta());
    }

    println!(
        "\n{} Total: {} modes, {} re-entering actions",
        "✓".green(),
        tables.len(),
        tables.reentry().len()
    );

    Ok(())
}

/// Print built tables as JSON
fn export_tables(path: &PathBuf, pretty: bool) -> anyhow::Result<()> {
    let tables = load_tables(path)?;

    let json = if pretty {
        serde_json::to_string_pretty(&tables)?
    } else {
        serde_json::to_string(&tables)?
    };

    println!("{}", json);

    Ok(())
}

fn load_tables(path: &PathBuf) -> anyhow::Result<ModeTables> {
    let modes = load_mode_specs(path)?;
    Ok(build(&modes)?)
}
