//! Line classifier and parser
//!
//! A single forward pass over the input lines drives an explicit state
//! machine with three modes:
//!
//! - [`Mode::Normal`]: each line must be a `key: value` entry.
//! - [`Mode::InMultiline`]: a quoted value is open; lines accumulate until
//!   one ends with `"`.
//! - [`Mode::InList`]: a key had an empty value; the list is read either
//!   from one following comma-separated line or from `- item` lines.
//!
//! Leaving list mode on a line that does not continue the list re-classifies
//! that same line in `Normal` mode.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::value::Value;

/// How a pending list is being accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListStyle {
    /// No continuation line seen yet
    Pending,
    /// Legacy `- item` lines
    Dash,
}

#[derive(Debug)]
enum Mode {
    Normal,
    InMultiline {
        key: String,
        buffer: String,
    },
    InList {
        key: String,
        items: Vec<String>,
        style: ListStyle,
    },
}

/// Outcome of feeding a line to the current mode
enum Step {
    Consumed,
    Reclassify,
}

/// Transient state for one parse pass
struct Parser {
    doc: Document,
    mode: Mode,
}

impl Parser {
    fn new() -> Self {
        Self {
            doc: Document::new(),
            mode: Mode::Normal,
        }
    }

    /// Feed one physical line (`number` is 1-based).
    fn feed(&mut self, number: usize, line: &str) -> Result<()> {
        // Checked before mode dispatch, so this also applies inside quoted blocks.
        if is_skippable(line) {
            return Ok(());
        }

        loop {
            match self.step(number, line)? {
                Step::Consumed => return Ok(()),
                Step::Reclassify => continue,
            }
        }
    }

    fn step(&mut self, number: usize, line: &str) -> Result<Step> {
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Normal => {
                self.start_entry(number, line)?;
                Ok(Step::Consumed)
            }
            Mode::InMultiline { key, mut buffer } => {
                buffer.push('\n');
                match line.strip_suffix('"') {
                    Some(last) => {
                        buffer.push_str(last);
                        self.doc.insert(key, Value::Scalar(buffer));
                    }
                    None => {
                        buffer.push_str(line);
                        self.mode = Mode::InMultiline { key, buffer };
                    }
                }
                Ok(Step::Consumed)
            }
            Mode::InList {
                key,
                mut items,
                style,
            } => {
                let trimmed = line.trim();
                if let Some(item) = trimmed.strip_prefix('-') {
                    items.push(item.trim().to_string());
                    self.mode = Mode::InList {
                        key,
                        items,
                        style: ListStyle::Dash,
                    };
                    Ok(Step::Consumed)
                } else if style == ListStyle::Pending && !line.contains(':') {
                    self.doc.insert(key, Value::List(split_items(trimmed)));
                    Ok(Step::Consumed)
                } else {
                    self.doc.insert(key, Value::List(items));
                    Ok(Step::Reclassify)
                }
            }
        }
    }

    fn start_entry(&mut self, number: usize, line: &str) -> Result<()> {
        let Some((raw_key, raw_value)) = line.split_once(':') else {
            return Err(Error::format(number, line, "missing ':' separator"));
        };

        let key = raw_key.trim();
        if key.is_empty() {
            return Err(Error::format(number, line, "empty key"));
        }
        let value = raw_value.trim();

        if let Some(rest) = value.strip_prefix('"') {
            match rest.strip_suffix('"') {
                Some(body) => {
                    self.doc.insert(key, Value::Scalar(body.to_string()));
                }
                None => {
                    self.mode = Mode::InMultiline {
                        key: key.to_string(),
                        buffer: rest.to_string(),
                    };
                }
            }
        } else if value.is_empty() {
            self.mode = Mode::InList {
                key: key.to_string(),
                items: Vec::new(),
                style: ListStyle::Pending,
            };
        } else if value.contains(',') {
            self.doc.insert(key, Value::List(split_items(value)));
        } else {
            self.doc.insert(key, Value::Scalar(value.to_string()));
        }

        Ok(())
    }

    fn finish(mut self) -> Document {
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Normal => {}
            Mode::InList { key, items, .. } => {
                self.doc.insert(key, Value::List(items));
            }
            Mode::InMultiline { key, buffer } => {
                tracing::warn!(key = %key, "quoted value never closed, keeping text up to end of input");
                self.doc.insert(key, Value::Scalar(buffer));
            }
        }
        self.doc
    }
}

/// Blank lines and `#` comments are never stored.
pub(crate) fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Split a comma-separated list, trimming each item.
///
/// A trailing comma marks a one-item list (`a,`) and does not produce an
/// empty final item.
fn split_items(source: &str) -> Vec<String> {
    let mut items: Vec<String> = source
        .split(',')
        .map(|item| item.trim().to_string())
        .collect();
    if items.len() > 1 && items.last().is_some_and(String::is_empty) {
        items.pop();
    }
    items
}

/// Parse an ordered sequence of lines into a [`Document`].
///
/// # Errors
///
/// Returns [`Error::Format`] when a line outside any open quoted block or
/// list has no `:` separator or an empty key.
pub fn parse<I, S>(lines: I) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = Parser::new();
    for (idx, line) in lines.into_iter().enumerate() {
        parser.feed(idx + 1, line.as_ref())?;
    }
    Ok(parser.finish())
}

/// Parse a complete source text.
pub fn parse_str(source: &str) -> Result<Document> {
    parse(source.lines())
}
