//! Line-oriented configuration parsing and merge writing for lineconf
//!
//! Provides the line-driven parser that turns raw text into a [`Document`],
//! the merge writer that appends new entries without touching existing
//! lines, and typed accessors over the parsed values.

pub mod document;
pub mod error;
pub mod parser;
pub mod typed;
pub mod value;
pub mod writer;

pub use document::Document;
pub use error::{Error, Result};
pub use parser::{parse, parse_str};
pub use typed::{TargetType, TypedValue};
pub use value::Value;
pub use writer::{MergeReport, format_entry, merge, render};
