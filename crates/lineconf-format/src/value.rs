//! Stored entry values

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Date layout used when a date is written back to a file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time layout used when a date-time is written back to a file
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The value half of an entry.
///
/// The parser never interprets values: numbers, booleans and dates are all
/// kept as raw strings until a typed accessor asks for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A single logical string, possibly spanning several physical lines
    Scalar(String),
    /// An ordered sequence of items
    List(Vec<String>),
}

impl Value {
    /// Get the scalar string, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Get the items, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Human-readable rendering used in error messages and CLI output.
    pub fn display(&self) -> String {
        match self {
            Self::Scalar(s) => s.clone(),
            Self::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Scalar(n.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Scalar(n.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Scalar(b.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Self::Scalar(date.format(DATE_FORMAT).to_string())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::Scalar(datetime.format(DATETIME_FORMAT).to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}
