//! Validate a file

use std::path::Path;

use colored::Colorize;
use lineconf_fs::{ConfPath, ConfStore};

use crate::error::Result;

/// Run the check command
pub fn run_check(store: &ConfStore, file: &Path) -> Result<()> {
    let path = ConfPath::new(file)?;
    let doc = store.load(&path)?;

    println!(
        "{} {} ({} entries)",
        "OK".green().bold(),
        path.to_string().yellow(),
        doc.len()
    );
    Ok(())
}
