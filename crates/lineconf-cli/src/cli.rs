//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lineconf_format::TargetType;

/// lineconf - Read and append entries in .lconf configuration files
#[derive(Parser, Debug)]
#[command(name = "lineconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// How long a write waits for the file lock, in milliseconds
    #[arg(
        long,
        global = true,
        env = "LINECONF_LOCK_TIMEOUT_MS",
        default_value_t = 5000
    )]
    pub lock_timeout_ms: u64,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the value of a key
    ///
    /// Examples:
    ///   lineconf get app.lconf title
    ///   lineconf get app.lconf lines --as int
    Get {
        /// Configuration file
        file: PathBuf,

        /// Key to read
        key: String,

        /// Convert the value (str, int, float, bool, date, datetime, list)
        #[arg(long = "as")]
        target: Option<TargetType>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List all entries
    List {
        /// Configuration file
        file: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Parse a file and report problems
    Check {
        /// Configuration file
        file: PathBuf,
    },

    /// Append a new entry
    ///
    /// Existing keys are never overwritten; the file is left unchanged when
    /// the key is already present.
    ///
    /// Examples:
    ///   lineconf set app.lconf title Example
    ///   lineconf set app.lconf tags a b c --list
    Set {
        /// Configuration file (created when missing)
        file: PathBuf,

        /// Key to append
        key: String,

        /// Value, or list items with --list
        values: Vec<String>,

        /// Store the values as a list
        #[arg(long)]
        list: bool,
    },
}
