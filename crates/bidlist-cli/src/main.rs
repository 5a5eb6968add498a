//! bidlist CLI
//!
//! Command-line interface for bidlist - bid tracking over delimited
//! monthly sales exports.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bidlist_core::Config;

mod commands;
mod output;
mod shell;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "bidlist")]
#[command(about = "bidlist - bid tracking for delimited sales exports")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu shell
    Shell {
        /// CSV file to load from (defaults to the configured csv_path)
        file: Option<PathBuf>,
    },
    /// Load a CSV file and print every bid
    #[command(alias = "ls")]
    List {
        /// CSV file (defaults to the configured csv_path)
        file: Option<PathBuf>,
    },
    /// Load a CSV file and look up one bid by id
    Find {
        /// Bid id to search for
        id: String,
        /// CSV file (defaults to the configured csv_path)
        file: Option<PathBuf>,
    },
    /// Load a CSV file, remove one bid, and report the result
    #[command(alias = "rm")]
    Remove {
        /// Bid id to remove
        id: String,
        /// CSV file (defaults to the configured csv_path)
        file: Option<PathBuf>,
    },
    /// Re-serialize a CSV file to stdout or another file
    Export {
        /// CSV file (defaults to the configured csv_path)
        file: Option<PathBuf>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (csv_path, delimiter)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work even when the config file is broken elsewhere
    if let Some(Commands::Config { command }) = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, &output)
            }
            Some(ConfigCommands::Show) | None => commands::config::show(&output),
        };
    }

    let config = Config::load().context("Failed to load configuration")?;

    match cli.command {
        // Shell is the default, like the original menu program
        None => shell::run(None, &config),
        Some(Commands::Shell { file }) => shell::run(file, &config),
        Some(Commands::List { file }) => commands::bids::list(file, &config, &output),
        Some(Commands::Find { id, file }) => commands::bids::find(&id, file, &config, &output),
        Some(Commands::Remove { id, file }) => {
            commands::bids::remove(&id, file, &config, &output)
        }
        Some(Commands::Export { file, out }) => {
            commands::bids::export(file, out, &config, &output)
        }
        Some(Commands::Config { .. }) => unreachable!(), // Handled above
    }
}
