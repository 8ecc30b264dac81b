//! Caller-side list state.
//!
//! [`ListState`] owns what a single list surface keeps between
//! interactions: the [`ViewQuery`] and the [`SelectionTracker`]. Its setters
//! apply the page-reset contract and [`refresh`](ListState::refresh) runs the
//! pipeline and reconciles the selection.

use crate::filter::{Filter, FilterSpec};
use crate::pipeline::{requires_page_reset, PageSpec, PageView, Pipeline, ViewQuery};
use crate::selection::{SelectAllScope, SelectionTracker};
use crate::sort::SortSpec;
use crate::traits::Seekable;

/// Query and selection state of one list.
///
/// ```
/// use hirelist::{ListState, PageSpec, Pipeline, Record, ViewQuery};
///
/// let jobs: Vec<Record> = (1..=30u32)
///     .map(|i| Record::new(i).with("status", if i % 2 == 0 { "Active" } else { "Draft" }))
///     .collect();
///
/// let mut state = ListState::new(ViewQuery::default());
/// state.set_page(3);
/// state.set_choice("status", "Active");
/// assert_eq!(state.query().page.index, 1);
///
/// let view = state.refresh(&Pipeline::new(), &jobs);
/// assert_eq!(view.total_matched, 15);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListState {
    query: ViewQuery,
    selection: SelectionTracker,
}

impl ListState {
    /// Creates a state with a page-scoped selection.
    pub fn new(query: ViewQuery) -> Self {
        ListState {
            query,
            selection: SelectionTracker::new(),
        }
    }

    /// Creates a state with the given "select all" scope.
    pub fn with_scope(query: ViewQuery, scope: SelectAllScope) -> Self {
        ListState {
            query,
            selection: SelectionTracker::with_scope(scope),
        }
    }

    /// The current query.
    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Mutable access to the selection, for toggles and bulk actions.
    pub fn selection_mut(&mut self) -> &mut SelectionTracker {
        &mut self.selection
    }

    /// Applies an edit to the query, resetting the page when the edit
    /// changes the search or the filters. Returns `true` on reset.
    pub fn update(&mut self, edit: impl FnOnce(&mut ViewQuery)) -> bool {
        let mut next = self.query.clone();
        edit(&mut next);
        let reset = requires_page_reset(&self.query, &next);
        if reset {
            next.page.index = 1;
        }
        self.query = next;
        reset
    }

    /// Sets the search text.
    pub fn set_search(&mut self, query: &str) -> bool {
        self.update(|q| q.search.set_query(query))
    }

    /// Stores a filter under `key`.
    pub fn set_filter(&mut self, key: &str, filter: Filter) -> bool {
        self.update(|q| q.filters.set(key, filter))
    }

    /// Applies a dropdown choice; `"all"` removes the filter.
    pub fn set_choice(&mut self, key: &str, value: &str) -> bool {
        self.update(|q| q.filters.set_choice(key, value))
    }

    /// Removes the filter under `key`.
    pub fn remove_filter(&mut self, key: &str) -> bool {
        self.update(|q| {
            q.filters.remove(key);
        })
    }

    /// Replaces all filters.
    pub fn set_filters(&mut self, filters: FilterSpec) -> bool {
        self.update(|q| q.filters = filters)
    }

    /// Changes the sort order. Never resets the page.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.query.sort = sort;
    }

    /// Moves to a page. The index is clamped on the next refresh.
    pub fn set_page(&mut self, index: usize) {
        self.query.page.index = index;
    }

    /// Changes the page size, keeping the page index.
    pub fn set_page_size(&mut self, size: usize) {
        self.query.page = PageSpec::new(self.query.page.index, size);
    }

    /// Runs the pipeline, stores the clamped page index and drops
    /// selections that no longer match.
    pub fn refresh<'a, T: Seekable>(
        &mut self,
        pipeline: &Pipeline,
        collection: &'a [T],
    ) -> PageView<'a, T> {
        let view = pipeline.run_query(collection, &self.query);
        self.query.page.index = view.current_page;
        self.selection.reconcile(&view.matched_ids());
        view
    }
}
