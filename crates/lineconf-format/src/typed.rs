//! Typed accessors over parsed documents
//!
//! Values are stored as raw strings; each accessor parses and validates the
//! stored string on demand and reports a [`Error::TypeConversion`] naming
//! the key, the raw value and the requested target when it cannot.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::value::{DATE_FORMAT, DATETIME_FORMAT, Value};

/// Date-time layouts accepted besides RFC 3339
const DATETIME_LAYOUTS: &[&str] = &[DATETIME_FORMAT, "%Y-%m-%dT%H:%M:%S"];

/// The closed set of conversion targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Str,
    Int,
    Float,
    Bool,
    Date,
    DateTime,
    List,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Bool => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::List => "list",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "str" | "string" => Ok(Self::Str),
            "int" | "integer" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "bool" | "boolean" => Ok(Self::Bool),
            "date" => Ok(Self::Date),
            "datetime" => Ok(Self::DateTime),
            "list" => Ok(Self::List),
            other => Err(format!("unknown target type: {other}")),
        }
    }
}

/// A successfully converted value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    List(Vec<String>),
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Self::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            Self::List(items) => f.write_str(&items.join("\n")),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .or_else(|| parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

impl Document {
    fn value_of(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| Error::key_not_found(key))
    }

    /// Fetch a scalar and run `convert` on it.
    fn convert<T>(
        &self,
        key: &str,
        target: TargetType,
        convert: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T> {
        let value = self.value_of(key)?;
        value
            .as_scalar()
            .and_then(|raw| convert(raw.trim()))
            .ok_or_else(|| Error::conversion(key, value.display(), target.as_str()))
    }

    pub fn get_str(&self, key: &str) -> Result<&str> {
        let value = self.value_of(key)?;
        value
            .as_scalar()
            .ok_or_else(|| Error::conversion(key, value.display(), TargetType::Str.as_str()))
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.convert(key, TargetType::Int, |raw| raw.parse().ok())
    }

    pub fn get_float(&self, key: &str) -> Result<f64> {
        self.convert(key, TargetType::Float, |raw| raw.parse().ok())
    }

    /// Accepts `true/false`, `yes/no`, `on/off` and `1/0`, case-insensitively.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.convert(key, TargetType::Bool, parse_bool)
    }

    /// Reads a `YYYY-MM-DD` date.
    pub fn get_date(&self, key: &str) -> Result<NaiveDate> {
        self.convert(key, TargetType::Date, parse_date)
    }

    /// Reads an RFC 3339 timestamp (normalised to UTC), a
    /// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` date-time, or a bare
    /// date at midnight.
    pub fn get_datetime(&self, key: &str) -> Result<NaiveDateTime> {
        self.convert(key, TargetType::DateTime, parse_datetime)
    }

    /// Reads a list. A scalar reads as a one-item list.
    pub fn get_list(&self, key: &str) -> Result<Vec<String>> {
        match self.value_of(key)? {
            Value::List(items) => Ok(items.clone()),
            Value::Scalar(s) => Ok(vec![s.clone()]),
        }
    }

    /// Read a key as the given target type.
    pub fn get_as(&self, key: &str, target: TargetType) -> Result<TypedValue> {
        Ok(match target {
            TargetType::Str => TypedValue::Str(self.get_str(key)?.to_string()),
            TargetType::Int => TypedValue::Int(self.get_int(key)?),
            TargetType::Float => TypedValue::Float(self.get_float(key)?),
            TargetType::Bool => TypedValue::Bool(self.get_bool(key)?),
            TargetType::Date => TypedValue::Date(self.get_date(key)?),
            TargetType::DateTime => TypedValue::DateTime(self.get_datetime(key)?),
            TargetType::List => TypedValue::List(self.get_list(key)?),
        })
    }
}
