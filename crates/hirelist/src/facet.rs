//! Facet option counts for filter dropdowns.
//!
//! A facet lists the distinct text values of a field together with how many
//! records carry each one, e.g. `Active (12)`, `Draft (3)`.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::filter::FilterSpec;
use crate::search::{self, SearchSpec};
use crate::traits::Seekable;
use crate::value::Value;

/// One facet option and the number of records carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    /// The field value.
    pub value: String,
    /// Records with that value.
    pub count: usize,
}

/// Counts distinct text values of `field` across `collection`.
///
/// List fields contribute each distinct element once per record. Records
/// without a text value for the field are not counted. Results are ordered
/// by descending count, then by value.
pub fn facet_counts<T: Seekable>(collection: &[T], field: &str) -> Vec<FacetCount> {
    tally(collection.iter(), field)
}

/// Facet counts under the current search and every filter except the one
/// stored under `key`.
///
/// This is what a dropdown for `key` should offer: choosing another option
/// replaces its own filter, so that filter must not narrow its own counts.
/// The counted field is the one the filter under `key` reads, or `key`
/// itself when no such filter exists.
pub fn facet_counts_with<T: Seekable>(
    collection: &[T],
    search: &SearchSpec,
    filters: &FilterSpec,
    key: &str,
) -> Vec<FacetCount> {
    let field = filters.get(key).map_or(key, |f| f.field.as_str());
    let others = filters.without(key);
    let compiled = others.compile();
    let matched = collection
        .iter()
        .filter(|record| search::matches(*record, search) && compiled.matches(*record));
    tally(matched, field)
}

fn tally<'a, T, I>(records: I, field: &str) -> Vec<FacetCount>
where
    T: Seekable + 'a,
    I: Iterator<Item = &'a T>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let value = record.field_value(field);
        let distinct: BTreeSet<&str> = match &value {
            Value::String(s) => BTreeSet::from([*s]),
            Value::List(_) => value.text_items().collect(),
            _ => BTreeSet::new(),
        };
        for item in distinct {
            *counts.entry(item.to_string()).or_default() += 1;
        }
    }

    let mut facets: Vec<FacetCount> = counts
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect();
    facets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    facets
}
