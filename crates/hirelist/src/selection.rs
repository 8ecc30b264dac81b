//! Bulk-selection bookkeeping.
//!
//! [`SelectionTracker`] is the only mutable state in the crate. It holds the
//! ids checked for bulk actions and survives re-renders; after every search
//! or filter change it is reconciled against the matched ids so it never
//! refers to records that are no longer listed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::pipeline::PageView;
use crate::record::RecordId;
use crate::traits::Seekable;

/// What the header "select all" checkbox acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectAllScope {
    /// Only the rows on the current page.
    #[default]
    Page,
    /// Every matched row across all pages.
    Matched,
}

/// Display state of a "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    /// None of the ids are selected (or there are no ids).
    Unchecked,
    /// Some but not all of the ids are selected.
    Partial,
    /// Every id is selected.
    Checked,
}

/// The set of selected record ids.
///
/// ```
/// use hirelist::{RecordId, SelectionTracker};
///
/// let page: Vec<RecordId> = vec!["a".into(), "b".into()];
/// let mut selection = SelectionTracker::new();
///
/// selection.select_all_visible(&page);
/// assert_eq!(selection.count(), 2);
///
/// // Second click on a fully selected page deselects it.
/// selection.select_all_visible(&page);
/// assert_eq!(selection.count(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: BTreeSet<RecordId>,
    scope: SelectAllScope,
}

impl SelectionTracker {
    /// Creates an empty, page-scoped tracker.
    pub fn new() -> Self {
        SelectionTracker::default()
    }

    /// Creates an empty tracker with the given "select all" scope.
    pub fn with_scope(scope: SelectAllScope) -> Self {
        SelectionTracker {
            selected: BTreeSet::new(),
            scope,
        }
    }

    /// The "select all" scope.
    pub fn scope(&self) -> SelectAllScope {
        self.scope
    }

    /// Flips membership of `id`.
    pub fn toggle(&mut self, id: &RecordId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    /// Two-state toggle over the current page.
    ///
    /// Selects every id in `visible` unless all of them already are, in
    /// which case exactly those ids are deselected. Selections on other
    /// pages are left alone. An empty page is a no-op.
    pub fn select_all_visible(&mut self, visible: &[RecordId]) {
        if visible.is_empty() {
            return;
        }
        if self.all_selected(visible) {
            for id in visible {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(visible.iter().cloned());
        }
    }

    /// Applies the two-state toggle to the ids chosen by the tracker's
    /// scope: the visible page, or every matched record.
    pub fn select_all<T: Seekable + ?Sized>(&mut self, view: &PageView<'_, T>) {
        let ids = self.scope_ids(view);
        self.select_all_visible(&ids);
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drops every selected id not present in `matched`.
    ///
    /// Returns how many ids were dropped.
    pub fn reconcile(&mut self, matched: &[RecordId]) -> usize {
        let keep: BTreeSet<&RecordId> = matched.iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| keep.contains(id));
        let dropped = before - self.selected.len();
        if dropped > 0 {
            tracing::debug!(
                target: "hirelist::selection",
                dropped,
                remaining = self.selected.len(),
                "dropped selections outside the matched set"
            );
        }
        dropped
    }

    /// Number of selected ids.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns `true` if `id` is selected.
    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.selected.iter().cloned().collect()
    }

    /// Returns `true` if `ids` is non-empty and every id is selected.
    pub fn all_selected(&self, ids: &[RecordId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    /// Checkbox state for a header over `ids`.
    pub fn header_state(&self, ids: &[RecordId]) -> CheckState {
        let selected = ids.iter().filter(|id| self.selected.contains(*id)).count();
        if selected == 0 {
            CheckState::Unchecked
        } else if selected == ids.len() {
            CheckState::Checked
        } else {
            CheckState::Partial
        }
    }

    /// Checkbox state of the "select all" header for this view, following
    /// the tracker's scope.
    pub fn view_header_state<T: Seekable + ?Sized>(&self, view: &PageView<'_, T>) -> CheckState {
        self.header_state(&self.scope_ids(view))
    }

    fn scope_ids<T: Seekable + ?Sized>(&self, view: &PageView<'_, T>) -> Vec<RecordId> {
        match self.scope {
            SelectAllScope::Page => view.visible_ids(),
            SelectAllScope::Matched => view.matched_ids(),
        }
    }
}
