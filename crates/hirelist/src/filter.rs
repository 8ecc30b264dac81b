//! Filter configuration and evaluation.
//!
//! A [`FilterSpec`] maps filter keys to [`Filter`]s. All active entries are
//! combined with logical AND; inactive ones (the `"all"` sentinel, empty
//! values, open or malformed ranges) are dropped before evaluation.

use std::collections::BTreeMap;

use crate::predicate::{Matcher, ALL};
use crate::traits::Seekable;

/// A matcher bound to the field it reads.
#[derive(Debug, Clone)]
pub struct Filter {
    /// Field name or dotted path.
    pub field: String,
    /// Predicate applied to the field.
    pub matcher: Matcher,
}

impl Filter {
    /// Creates a new filter.
    pub fn new(field: impl Into<String>, matcher: Matcher) -> Self {
        Filter {
            field: field.into(),
            matcher,
        }
    }

    /// Evaluates this filter against a record.
    pub fn matches<T: Seekable + ?Sized>(&self, record: &T) -> bool {
        self.matcher.matches(&record.field_value(&self.field))
    }

    /// Returns `true` if this filter constrains anything.
    pub fn is_active(&self) -> bool {
        self.matcher.is_active()
    }
}

/// The active filter configuration of a list.
///
/// Entries are kept in key order so evaluation is deterministic.
///
/// # Example
///
/// ```
/// use hirelist::{FilterSpec, Matcher, Record, evaluate};
///
/// let job = Record::new(1u32)
///     .with("status", "Active")
///     .with("salaryMax", 120_000);
///
/// let filters = FilterSpec::new()
///     .equals("status", "Active")
///     .with("salaryMax", Matcher::at_least(100_000))
///     .equals("department", "all");
///
/// assert!(evaluate(&job, &filters));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    entries: BTreeMap<String, Filter>,
}

impl FilterSpec {
    /// Creates an empty spec. Every record passes an empty spec.
    pub fn new() -> Self {
        FilterSpec::default()
    }

    /// Adds a filter keyed and applied on `field`, builder style.
    pub fn with(mut self, field: &str, matcher: Matcher) -> Self {
        self.set(field, Filter::new(field, matcher));
        self
    }

    /// Adds a case-sensitive equality filter, builder style.
    pub fn equals(self, field: &str, value: &str) -> Self {
        self.with(field, Matcher::equals(value))
    }

    /// Inserts or replaces the filter stored under `key`.
    pub fn set(&mut self, key: impl Into<String>, filter: Filter) {
        self.entries.insert(key.into(), filter);
    }

    /// Applies a dropdown choice.
    ///
    /// Choosing `"all"` (or nothing) removes the key; any other value sets
    /// an equality filter on the field of the same name.
    pub fn set_choice(&mut self, key: &str, value: &str) {
        if value.trim().is_empty() || value.trim().eq_ignore_ascii_case(ALL) {
            self.entries.remove(key);
        } else {
            self.set(key, Filter::new(key, Matcher::equals(value)));
        }
    }

    /// Removes the filter stored under `key`, returning it.
    pub fn remove(&mut self, key: &str) -> Option<Filter> {
        self.entries.remove(key)
    }

    /// Removes all filters.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the filter stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Filter> {
        self.entries.get(key)
    }

    /// Iterates over all entries, active or not.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Iterates over the entries that constrain anything.
    pub fn active(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.iter().filter(|(_, f)| f.is_active())
    }

    /// Number of stored entries, active or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if at least one entry constrains anything.
    pub fn has_active(&self) -> bool {
        self.active().next().is_some()
    }

    /// Returns a copy of this spec without the entry under `key`.
    pub fn without(&self, key: &str) -> FilterSpec {
        let mut spec = self.clone();
        spec.entries.remove(key);
        spec
    }

    /// Renders the active filters for a "filtered by ..." line.
    ///
    /// Returns `None` when nothing is active.
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = self
            .active()
            .map(|(_, f)| format!("{} {}", f.field, f.matcher))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Compiles the active entries into a predicate.
    ///
    /// Inactive entries are resolved once here rather than per record.
    pub fn compile(&self) -> CompiledFilter<'_> {
        CompiledFilter {
            filters: self.active().map(|(_, f)| f).collect(),
        }
    }

    /// Returns `true` if both specs would select the same records.
    ///
    /// Compares active entries only, so toggling a dropdown between
    /// unset and `"all"` is not a change.
    pub fn same_constraints(&self, other: &FilterSpec) -> bool {
        let ours: Vec<(&str, String, String)> = self
            .active()
            .map(|(k, f)| (k, f.field.clone(), format!("{:?}", f.matcher)))
            .collect();
        let theirs: Vec<(&str, String, String)> = other
            .active()
            .map(|(k, f)| (k, f.field.clone(), format!("{:?}", f.matcher)))
            .collect();
        ours == theirs
    }
}

/// The active filters of a [`FilterSpec`], ready to evaluate.
#[derive(Debug, Clone)]
pub struct CompiledFilter<'s> {
    filters: Vec<&'s Filter>,
}

impl CompiledFilter<'_> {
    /// Returns `true` if every active filter matches the record.
    pub fn matches<T: Seekable + ?Sized>(&self, record: &T) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Number of active filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if nothing is constrained.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Returns `true` if the record passes every active filter of the spec.
pub fn evaluate<T: Seekable + ?Sized>(record: &T, spec: &FilterSpec) -> bool {
    spec.compile().matches(record)
}
