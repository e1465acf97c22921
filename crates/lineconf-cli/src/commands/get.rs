//! Read a single key

use std::path::Path;

use lineconf_format::{TargetType, Value};
use lineconf_fs::{ConfPath, ConfStore};

use crate::error::Result;

/// Run the get command
///
/// Without a target type the raw value is printed; list items go one per
/// line.
pub fn run_get(
    store: &ConfStore,
    file: &Path,
    key: &str,
    target: Option<TargetType>,
    json: bool,
) -> Result<()> {
    let path = ConfPath::new(file)?;

    if let Some(target) = target {
        let value = store.get_as(&path, key, target)?;
        if json {
            println!("{}", serde_json::to_string(&value)?);
        } else {
            println!("{value}");
        }
        return Ok(());
    }

    let doc = store.load(&path)?;
    let value = doc
        .get(key)
        .ok_or_else(|| lineconf_format::Error::key_not_found(key))?;

    if json {
        println!("{}", serde_json::to_string(value)?);
        return Ok(());
    }

    match value {
        Value::Scalar(s) => println!("{s}"),
        Value::List(items) => {
            for item in items {
                println!("{item}");
            }
        }
    }
    Ok(())
}
