//! Merge writer
//!
//! Writing never rewrites, reorders or deletes an existing line. Pending
//! entries are appended only when no existing line already belongs to
//! their key; values of keys that are already present are left untouched.
//!
//! Every entry is checked before anything is produced: an entry the parser
//! would read back as something else is refused with
//! [`Error::Unwritable`].

use crate::document::Document;
use crate::error::{Error, Result};
use crate::parser::is_skippable;
use crate::value::Value;

/// Keys touched by a [`merge`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Keys appended as new lines
    pub appended: Vec<String>,
    /// Keys already present in the existing lines
    pub skipped: Vec<String>,
}

impl MergeReport {
    /// Whether the merge produced any new lines
    pub fn is_unchanged(&self) -> bool {
        self.appended.is_empty()
    }
}

/// Whether an existing line belongs to `key`.
fn line_belongs_to(line: &str, key: &str) -> bool {
    line.strip_prefix(key)
        .is_some_and(|rest| rest.starts_with(':'))
}

/// Whether a scalar must be written in the quoted form to read back unchanged.
fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.contains('\n')
        || value.contains(',')
        || value.starts_with('"')
        || value.trim() != value
}

fn check_key(key: &str) -> Result<()> {
    let problem = if key.is_empty() {
        "empty key"
    } else if key.contains([':', '\n', '\r']) {
        "key contains ':' or a line break"
    } else if key.starts_with(['#', '-']) {
        "key starts with '#' or '-'"
    } else if key.trim() != key {
        "key has surrounding whitespace"
    } else {
        return Ok(());
    };
    Err(Error::unwritable(key, problem))
}

/// Lines of a quoted scalar: `key: "first`, the inner lines as they are,
/// and `last"`.
fn quoted_lines(key: &str, value: &str) -> Result<Vec<String>> {
    let mut parts = value.split('\n').enumerate().peekable();
    let mut lines = Vec::new();

    while let Some((idx, part)) = parts.next() {
        let is_last = parts.peek().is_none();
        let line = match (idx, is_last) {
            (0, true) => format!("{key}: \"{part}\""),
            (0, false) => format!("{key}: \"{part}"),
            (_, true) => format!("{part}\""),
            (_, false) => part.to_string(),
        };

        if !is_last && part.ends_with('"') {
            return Err(Error::unwritable(
                key,
                format!("line {} of the value ends with '\"'", idx + 1),
            ));
        }
        if idx == 0 && !is_last && part.trim_end() != part {
            return Err(Error::unwritable(
                key,
                "first line of the value ends with whitespace",
            ));
        }
        if idx > 0 && is_skippable(&line) {
            return Err(Error::unwritable(
                key,
                format!("line {} of the value is blank or starts with '#'", idx + 1),
            ));
        }

        lines.push(line);
    }

    Ok(lines)
}

fn list_line(key: &str, items: &[String]) -> Result<String> {
    for item in items {
        if item.contains([',', '\n', '\r']) {
            return Err(Error::unwritable(
                key,
                format!("list item {item:?} contains ',' or a line break"),
            ));
        }
        if item.trim() != item {
            return Err(Error::unwritable(
                key,
                format!("list item {item:?} has surrounding whitespace"),
            ));
        }
    }
    if items.first().is_some_and(|first| first.starts_with('"')) {
        return Err(Error::unwritable(key, "first list item starts with '\"'"));
    }

    let joined = items.join(", ");
    // The parser drops one trailing empty item, so a lone item or a final
    // empty item gets an extra comma
    Ok(match items {
        [] => format!("{key}:"),
        [.., last] if items.len() == 1 || last.is_empty() => format!("{key}: {joined},"),
        _ => format!("{key}: {joined}"),
    })
}

/// Physical lines of one entry, or the reason it cannot be written.
fn entry_lines(key: &str, value: &Value) -> Result<Vec<String>> {
    check_key(key)?;
    match value {
        Value::Scalar(s) if s.contains('\r') => {
            Err(Error::unwritable(key, "value contains a carriage return"))
        }
        Value::Scalar(s) if needs_quotes(s) => quoted_lines(key, s),
        Value::Scalar(s) => Ok(vec![format!("{key}: {s}")]),
        Value::List(items) => Ok(vec![list_line(key, items)?]),
    }
}

/// Format a single entry as it is appended to a file.
///
/// A scalar containing newlines is emitted in the quoted multi-line form,
/// so the returned string may span several lines.
///
/// # Errors
///
/// Returns [`Error::Unwritable`] when the key or value would not read back
/// unchanged.
pub fn format_entry(key: &str, value: &Value) -> Result<String> {
    Ok(entry_lines(key, value)?.join("\n"))
}

/// Merge `pending` into `existing` lines.
///
/// Every existing line is returned verbatim and in order, followed by one
/// formatted entry per pending key that no existing line starts with
/// `"<key>:"`. Multi-line values expand into several output lines.
///
/// # Errors
///
/// Returns [`Error::Unwritable`] for the first pending entry that would not
/// read back unchanged, including entries whose key is already present. No
/// lines are produced in that case.
pub fn merge<S: AsRef<str>>(
    existing: &[S],
    pending: &Document,
) -> Result<(Vec<String>, MergeReport)> {
    let mut lines: Vec<String> = existing.iter().map(|l| l.as_ref().to_string()).collect();
    let mut report = MergeReport::default();

    for (key, value) in pending.iter() {
        let entry = entry_lines(key, value)?;

        if existing
            .iter()
            .any(|line| line_belongs_to(line.as_ref(), key))
        {
            tracing::debug!(key, "key already present, skipping");
            report.skipped.push(key.to_string());
            continue;
        }

        lines.extend(entry);
        report.appended.push(key.to_string());
    }

    Ok((lines, report))
}

/// Render a whole document from scratch.
pub fn render(doc: &Document) -> Result<Vec<String>> {
    let (lines, _) = merge::<&str>(&[], doc)?;
    Ok(lines)
}
