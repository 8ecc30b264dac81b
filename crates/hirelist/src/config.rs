//! Declarative list configuration.
//!
//! Each dashboard list (jobs, applications, offers, ...) declares its page
//! size, searchable fields, default sort and facets. Configs load from JSON
//! or YAML:
//!
//! ```yaml
//! jobs:
//!   pageSize: 20
//!   searchFields: [title, department, skills]
//!   defaultSort: { field: postedDate, kind: dateDesc }
//!   selectAll: page
//!   facets: [status, department]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HirelistError, Result};
use crate::filter::FilterSpec;
use crate::pipeline::{PageSpec, ViewQuery, DEFAULT_PAGE_SIZE};
use crate::search::SearchSpec;
use crate::selection::SelectAllScope;
use crate::sort::{ComparatorRegistry, Dir, SortSpec};
use crate::state::ListState;

/// Default sort of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    /// Field name or dotted path.
    pub field: String,
    /// Kind name (`date`, `number`, ...) or combined key (`dateDesc`).
    pub kind: String,
    /// Explicit direction; when absent it is read from `kind`. When both
    /// are given this wins over any suffix on `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Dir>,
}

impl SortConfig {
    /// Builds the sort spec.
    pub fn to_spec(&self) -> SortSpec {
        let spec = SortSpec::from_key(&self.field, &self.kind);
        match self.direction {
            Some(direction) => SortSpec { direction, ..spec },
            None => spec,
        }
    }
}

/// Configuration of one list surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    /// Rows per page.
    pub page_size: usize,
    /// Fields the search box looks at.
    pub search_fields: Vec<String>,
    /// Sort applied before the user picks one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortConfig>,
    /// What the header "select all" checkbox acts on.
    pub select_all: SelectAllScope,
    /// Fields offered as filter dropdowns with counts.
    pub facets: Vec<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            page_size: DEFAULT_PAGE_SIZE,
            search_fields: Vec::new(),
            default_sort: None,
            select_all: SelectAllScope::default(),
            facets: Vec::new(),
        }
    }
}

impl ViewConfig {
    /// Parses a single view config from JSON.
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parses a single view config from YAML.
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Checks that the default sort resolves with `registry`.
    pub fn validate(&self, registry: &ComparatorRegistry) -> Result<()> {
        if let Some(sort) = &self.default_sort {
            let spec = sort.to_spec();
            if !registry.knows(&spec.kind) {
                return Err(HirelistError::UnknownComparator(spec.kind.to_string()));
            }
        }
        Ok(())
    }

    /// The query a list starts from: no search text, no filters, default
    /// sort, first page.
    pub fn initial_query(&self) -> ViewQuery {
        ViewQuery {
            search: SearchSpec::new("", &self.search_fields),
            filters: FilterSpec::new(),
            sort: self.default_sort.as_ref().map(SortConfig::to_spec),
            page: PageSpec::first(self.page_size),
        }
    }

    /// A fresh [`ListState`] for this list.
    pub fn list_state(&self) -> ListState {
        ListState::with_scope(self.initial_query(), self.select_all)
    }
}

/// Parses a map of named view configs from YAML.
pub fn views_from_yaml(input: &str) -> Result<BTreeMap<String, ViewConfig>> {
    Ok(serde_yaml::from_str(input)?)
}

/// Parses a map of named view configs from JSON.
pub fn views_from_json(input: &str) -> Result<BTreeMap<String, ViewConfig>> {
    Ok(serde_json::from_str(input)?)
}
