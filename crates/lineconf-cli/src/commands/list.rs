//! List all entries of a file

use std::path::Path;

use colored::Colorize;
use lineconf_format::Value;
use lineconf_fs::{ConfPath, ConfStore};

use crate::error::Result;

/// Run the list command
pub fn run_list(store: &ConfStore, file: &Path, json: bool) -> Result<()> {
    let path = ConfPath::new(file)?;
    let doc = store.load(&path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    if doc.is_empty() {
        println!("{}", "(no entries)".dimmed());
        return Ok(());
    }

    for (key, value) in doc.iter() {
        let shown = match value {
            Value::Scalar(s) => s.replace('\n', "\n  "),
            Value::List(items) => format!("[{}]", items.join(", ")),
        };
        println!("{} {}", format!("{key}:").cyan(), shown);
    }

    Ok(())
}
