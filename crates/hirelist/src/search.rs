//! Free-text search across configured fields.

use crate::traits::Seekable;
use crate::value::Value;

/// A normalized search query plus the fields it looks at.
///
/// The query is trimmed and lower-cased once on construction.
///
/// ```
/// use hirelist::{Record, SearchSpec, matches};
///
/// let job = Record::new(1u32)
///     .with("title", "Senior React Developer")
///     .with("skills", vec!["TypeScript", "GraphQL"]);
///
/// assert!(matches(&job, &SearchSpec::new("  react ", ["title", "skills"])));
/// assert!(matches(&job, &SearchSpec::new("graph", ["title", "skills"])));
/// assert!(!matches(&job, &SearchSpec::new("graph", ["title"])));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSpec {
    query: String,
    fields: Vec<String>,
}

impl SearchSpec {
    /// Creates a search over `fields`.
    pub fn new<I, S>(query: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchSpec {
            query: normalize(query),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Replaces the query, keeping the fields.
    pub fn set_query(&mut self, query: &str) {
        self.query = normalize(query);
    }

    /// Returns a copy with a different query.
    pub fn with_query(&self, query: &str) -> Self {
        SearchSpec {
            query: normalize(query),
            fields: self.fields.clone(),
        }
    }

    /// The normalized query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The searched fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns `true` if the query is non-empty.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

fn text_contains(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(query)
}

fn value_contains(value: &Value<'_>, query: &str) -> bool {
    match value {
        Value::String(s) => text_contains(s, query),
        Value::List(_) => value.text_items().any(|item| text_contains(item, query)),
        _ => false,
    }
}

/// Returns `true` if the record matches the search.
///
/// An inactive (blank) query matches everything. Otherwise the query must be
/// a substring of a configured string field or of an element of a
/// configured list field, ignoring case. Absent fields never match.
pub fn matches<T: Seekable + ?Sized>(record: &T, search: &SearchSpec) -> bool {
    if !search.is_active() {
        return true;
    }
    search
        .fields
        .iter()
        .any(|field| value_contains(&record.field_value(field), &search.query))
}
