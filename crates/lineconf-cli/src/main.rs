//! lineconf CLI
//!
//! Command-line access to .lconf configuration files.

mod cli;
mod commands;
mod error;
mod logging;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use lineconf_fs::{ConfStore, StoreConfig};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(?cli, "parsed arguments");

    let store = ConfStore::with_config(
        StoreConfig::default().with_lock_timeout(Duration::from_millis(cli.lock_timeout_ms)),
    );

    match cli.command {
        Some(cmd) => execute_command(&store, cmd),
        None => {
            println!("{} .lconf configuration tool", "lineconf".green().bold());
            println!();
            println!("Run {} for available commands.", "lineconf --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(store: &ConfStore, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Get {
            file,
            key,
            target,
            json,
        } => commands::run_get(store, &file, &key, target, json),
        Commands::List { file, json } => commands::run_list(store, &file, json),
        Commands::Check { file } => commands::run_check(store, &file),
        Commands::Set {
            file,
            key,
            values,
            list,
        } => commands::run_set(store, &file, &key, values, list),
    }
}
