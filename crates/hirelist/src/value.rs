//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is the borrowed view of a single record field that
//! predicates, comparators and the search matcher work with. It is produced
//! by [`Seekable::field_value`](crate::Seekable::field_value).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::record::FieldValue;

/// Runtime value for comparison, borrowed from the source record.
///
/// # Example
///
/// ```
/// use hirelist::{Value, Number};
///
/// struct Job {
///     title: String,
///     openings: u8,
/// }
///
/// fn accessor<'a>(job: &'a Job, field: &str) -> Value<'a> {
///     match field {
///         "title" => Value::String(&job.title),
///         "openings" => Value::Number(Number::U64(job.openings as u64)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Array field, e.g. a list of skills.
    List(&'a [FieldValue]),
    /// Nested object field.
    Object(&'a BTreeMap<String, FieldValue>),
    /// Field not present, null, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `List` value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the list elements, if present.
    pub fn as_list(&self) -> Option<&'a [FieldValue]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Interprets the value as a point in time.
    ///
    /// Timestamps are returned as-is and strings are parsed with
    /// [`Timestamp::parse`]. Anything else yields `None`.
    pub fn to_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            Value::String(s) => Timestamp::parse(s),
            _ => None,
        }
    }

    /// Iterates over the text elements of a list value.
    ///
    /// Non-text elements are skipped; a non-list value yields nothing.
    pub fn text_items(&self) -> impl Iterator<Item = &'a str> {
        self.as_list()
            .unwrap_or(&[])
            .iter()
            .filter_map(FieldValue::as_text)
    }
}

/// Numeric value supporting all common numeric types.
///
/// Comparisons between different numeric variants convert to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` for a floating point NaN.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f32> for Number {
    fn from(n: f32) -> Self {
        Number::F64(n as f64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// Record dates usually arrive as strings (`"2024-03-01"`); use
/// [`Timestamp::parse`] to turn them into something comparable.
///
/// ```
/// use hirelist::Timestamp;
///
/// assert_eq!(Timestamp::parse("1970-01-02"), Some(Timestamp(86_400_000)));
/// assert!(Timestamp(1000) < Timestamp(2000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Parses a date string.
    ///
    /// Accepts RFC 3339 (`2024-03-01T09:30:00Z`), naive date-times
    /// (`2024-03-01T09:30:00`, `2024-03-01 09:30:00`, read as UTC) and plain
    /// dates (`2024-03-01`, midnight UTC). Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Timestamp> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(Timestamp(dt.timestamp_millis()));
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                return Some(Timestamp(naive.and_utc().timestamp_millis()));
            }
        }

        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Timestamp(naive.and_utc().timestamp_millis()))
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}
