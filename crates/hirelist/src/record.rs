//! The schema-less record type.
//!
//! Dashboard data (jobs, applications, offers, interviews, team members)
//! arrives as plain JSON objects with ad hoc fields. [`Record`] keeps that
//! shape: an immutable [`RecordId`] plus a map of named [`FieldValue`]s.
//!
//! ```
//! use hirelist::{Record, Seekable, Value};
//!
//! let job: Record = serde_json::from_str(
//!     r#"{"id": 7, "title": "Platform Engineer", "team": {"name": "Infra"}}"#,
//! ).unwrap();
//!
//! assert_eq!(job.id.as_str(), "7");
//! assert_eq!(job.field_value("team.name"), Value::String("Infra"));
//! assert_eq!(job.field_value("salary"), Value::None);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::traits::Seekable;
use crate::value::{Number, Value};

/// Unique, immutable identity of a record.
///
/// Sample data uses both numeric and string ids; both deserialize into the
/// same textual form so selections can be keyed uniformly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId(id.to_string())
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        RecordId(id.to_string())
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => RecordId::from(n),
            RawId::Text(s) => RecordId(s),
        }
    }
}

/// Owned value of a record field.
///
/// Deserializes from any JSON value. Variant order matters: integers are
/// tried before floats so `120000` stays exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    /// JSON `null`.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Text, including dates in string form.
    Text(String),
    /// Array of values, typically strings (skills, tags).
    List(Vec<FieldValue>),
    /// Nested object.
    Object(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Returns the text, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrows this field as a runtime [`Value`].
    pub fn to_value(&self) -> Value<'_> {
        match self {
            FieldValue::Null => Value::None,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Integer(n) => Value::Number(Number::I64(*n)),
            FieldValue::Float(n) => Value::Number(Number::F64(*n)),
            FieldValue::Text(s) => Value::String(s),
            FieldValue::List(items) => Value::List(items),
            FieldValue::Object(map) => Value::Object(map),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Integer(n as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Integer(n as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Float(n)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Object(map)
    }
}

/// A single dashboard entity: identity plus arbitrary named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identity, never changed after creation.
    pub id: RecordId,
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Record {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Looks up a field by name or dotted path.
    ///
    /// An exact top-level key wins; otherwise `a.b.c` walks nested objects.
    /// Any missing segment, or a non-object along the way, yields `None`.
    pub fn get(&self, path: &str) -> Option<&FieldValue> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                FieldValue::Object(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Returns all top-level fields.
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }
}

impl Seekable for Record {
    fn record_id(&self) -> RecordId {
        self.id.clone()
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        if field == "id" {
            return Value::String(self.id.as_str());
        }
        self.get(field).map_or(Value::None, FieldValue::to_value)
    }
}
