//! Append a new entry

use std::path::Path;

use colored::Colorize;
use lineconf_format::{Document, Value};
use lineconf_fs::{ConfPath, ConfStore};

use crate::error::{CliError, Result};

/// Build the value from command-line arguments.
fn build_value(mut values: Vec<String>, list: bool) -> Result<Value> {
    if list {
        return Ok(Value::List(values));
    }
    match values.len() {
        1 => Ok(Value::Scalar(values.remove(0))),
        0 => Err(CliError::user("missing value (use --list for an empty list)")),
        n => Err(CliError::user(format!(
            "expected one value, got {n} (use --list to store a list)"
        ))),
    }
}

/// Run the set command
pub fn run_set(
    store: &ConfStore,
    file: &Path,
    key: &str,
    values: Vec<String>,
    list: bool,
) -> Result<()> {
    let path = ConfPath::new(file)?;

    let mut pending = Document::new();
    pending.insert(key, build_value(values, list)?);

    let report = store.write(&path, &pending)?;
    if report.is_unchanged() {
        println!(
            "{} {} already present in {}, not changed",
            "SKIP".yellow().bold(),
            key.trim().cyan(),
            path
        );
    } else {
        println!(
            "{} Added {} to {}",
            "OK".green().bold(),
            key.trim().cyan(),
            path
        );
    }

    Ok(())
}
