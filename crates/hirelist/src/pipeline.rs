//! The search, filter, sort, paginate pipeline.
//!
//! [`Pipeline::run`] is stateless: the same inputs always produce the same
//! [`PageView`]. The collection is only borrowed; the view holds references
//! into it.
//!
//! Stages, in fixed order:
//!
//! ```text
//! matched  = collection where search matches AND every active filter passes
//! ordered  = stable_sort(matched, comparator(sort))
//! pages    = max(1, ceil(len(ordered) / page_size))
//! current  = clamp(page_index, 1, pages)
//! visible  = ordered[(current - 1) * page_size .. current * page_size]
//! ```
//!
//! Changing the search or the filters should send the caller back to page
//! one; [`requires_page_reset`] states that contract as a pure function and
//! [`ListState`](crate::ListState) applies it.

use std::ops::Range;

use serde::Serialize;

use crate::filter::FilterSpec;
use crate::record::RecordId;
use crate::search::{self, SearchSpec};
use crate::sort::{ComparatorRegistry, SortSpec};
use crate::traits::Seekable;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which page to show, and how big pages are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// 1-based page index; clamped to the available pages on every run.
    pub index: usize,
    /// Rows per page; 0 is treated as 1.
    pub size: usize,
}

impl PageSpec {
    /// Creates a page spec.
    pub fn new(index: usize, size: usize) -> Self {
        PageSpec { index, size }
    }

    /// First page of the given size.
    pub fn first(size: usize) -> Self {
        PageSpec { index: 1, size }
    }

    /// Page size with the zero case normalized away.
    pub fn effective_size(&self) -> usize {
        self.size.max(1)
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec::first(DEFAULT_PAGE_SIZE)
    }
}

/// The four query axes of a list, bundled.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    /// Free-text search.
    pub search: SearchSpec,
    /// Active filters.
    pub filters: FilterSpec,
    /// Sort order; `None` keeps collection order.
    pub sort: Option<SortSpec>,
    /// Requested page.
    pub page: PageSpec,
}

/// Returns `true` if moving from `prev` to `next` must reset the page index.
///
/// Search and filter changes reset; sort and page changes don't. Filter
/// entries that don't constrain anything (`"all"`) are ignored.
pub fn requires_page_reset(prev: &ViewQuery, next: &ViewQuery) -> bool {
    prev.search != next.search || !prev.filters.same_constraints(&next.filters)
}

/// Serializable counts describing a page, for pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// Records that survived search and filters.
    pub total_matched: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,
    /// The page actually shown, 1-based.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// 1-based number of the first visible row, 0 when empty.
    pub first_item: usize,
    /// 1-based number of the last visible row, 0 when empty.
    pub last_item: usize,
}

/// One page of matched, ordered records.
#[derive(Debug, Clone)]
pub struct PageView<'a, T: ?Sized> {
    ordered: Vec<&'a T>,
    window: Range<usize>,
    /// Records that survived search and filters.
    pub total_matched: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,
    /// The page actually shown, 1-based.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl<'a, T: ?Sized> PageView<'a, T> {
    fn paginate(ordered: Vec<&'a T>, page: PageSpec) -> Self {
        let page_size = page.effective_size();
        let total_matched = ordered.len();
        let total_pages = total_matched.div_ceil(page_size).max(1);
        let current_page = page.index.clamp(1, total_pages);
        let start = ((current_page - 1) * page_size).min(total_matched);
        let end = start.saturating_add(page_size).min(total_matched);

        PageView {
            ordered,
            window: start..end,
            total_matched,
            total_pages,
            current_page,
            page_size,
        }
    }

    /// The records on the current page.
    pub fn visible(&self) -> &[&'a T] {
        &self.ordered[self.window.clone()]
    }

    /// All matched records in sorted order, across every page.
    pub fn matched(&self) -> &[&'a T] {
        &self.ordered
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Returns `true` if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 1-based number of the first visible row, 0 when empty.
    pub fn first_item_number(&self) -> usize {
        if self.window.is_empty() {
            0
        } else {
            self.window.start + 1
        }
    }

    /// 1-based number of the last visible row, 0 when empty.
    pub fn last_item_number(&self) -> usize {
        if self.window.is_empty() {
            0
        } else {
            self.window.end
        }
    }

    /// Page buttons to show: at most `window` consecutive page numbers,
    /// kept around the current page.
    pub fn page_numbers(&self, window: usize) -> Vec<usize> {
        let window = window.clamp(1, self.total_pages);
        let mut first = self.current_page.saturating_sub(window / 2).max(1);
        let last = (first + window - 1).min(self.total_pages);
        first = (last + 1).saturating_sub(window).max(1);
        (first..=last).collect()
    }

    /// Counts for a pagination control.
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            total_matched: self.total_matched,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
            first_item: self.first_item_number(),
            last_item: self.last_item_number(),
        }
    }
}

impl<T: Seekable + ?Sized> PageView<'_, T> {
    /// Ids of every matched record, in sorted order.
    pub fn matched_ids(&self) -> Vec<RecordId> {
        self.ordered.iter().map(|r| r.record_id()).collect()
    }

    /// Ids of the records on the current page.
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.visible().iter().map(|r| r.record_id()).collect()
    }
}

/// Runs list queries with a given comparator registry.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    registry: ComparatorRegistry,
}

impl Pipeline {
    /// Creates a pipeline with the built-in comparators.
    pub fn new() -> Self {
        Pipeline::default()
    }

    /// Creates a pipeline resolving sort kinds through `registry`.
    pub fn with_registry(registry: ComparatorRegistry) -> Self {
        Pipeline { registry }
    }

    /// The registry used for sorting.
    pub fn registry(&self) -> &ComparatorRegistry {
        &self.registry
    }

    /// Runs search, filter, sort and pagination over `collection`.
    pub fn run<'a, T: Seekable>(
        &self,
        collection: &'a [T],
        search: &SearchSpec,
        filters: &FilterSpec,
        sort: Option<&SortSpec>,
        page: PageSpec,
    ) -> PageView<'a, T> {
        if page.size == 0 {
            tracing::warn!(target: "hirelist::pipeline", "page size 0 requested, using 1");
        }
        for (key, filter) in filters.iter() {
            if filter.matcher.is_malformed() {
                tracing::warn!(
                    target: "hirelist::pipeline",
                    key,
                    filter = %filter.matcher,
                    "malformed filter ignored"
                );
            }
        }

        let compiled = filters.compile();
        let mut ordered: Vec<&'a T> = collection
            .iter()
            .filter(|record| search::matches(*record, search) && compiled.matches(*record))
            .collect();

        if let Some(sort) = sort {
            self.registry.sort(&mut ordered, sort);
        }

        let view = PageView::paginate(ordered, page);
        tracing::debug!(
            target: "hirelist::pipeline",
            collection = collection.len(),
            active_filters = compiled.len(),
            search = search.is_active(),
            matched = view.total_matched,
            pages = view.total_pages,
            page = view.current_page,
            "list pipeline run"
        );
        view
    }

    /// Runs a bundled [`ViewQuery`].
    pub fn run_query<'a, T: Seekable>(
        &self,
        collection: &'a [T],
        query: &ViewQuery,
    ) -> PageView<'a, T> {
        self.run(
            collection,
            &query.search,
            &query.filters,
            query.sort.as_ref(),
            query.page,
        )
    }
}

/// Runs the pipeline with the built-in comparators.
///
/// ```
/// use hirelist::{run, FilterSpec, PageSpec, Record, SearchSpec, SortSpec};
///
/// let jobs = vec![
///     Record::new(1u32).with("status", "Active").with("salaryMax", 90_000),
///     Record::new(2u32).with("status", "Closed").with("salaryMax", 200_000),
///     Record::new(3u32).with("status", "Active").with("salaryMax", 130_000),
/// ];
///
/// let view = run(
///     &jobs,
///     &SearchSpec::default(),
///     &FilterSpec::new().equals("status", "Active"),
///     Some(&SortSpec::number_desc("salaryMax")),
///     PageSpec::first(10),
/// );
///
/// assert_eq!(view.total_matched, 2);
/// assert_eq!(view.visible()[0].id.as_str(), "3");
/// ```
pub fn run<'a, T: Seekable>(
    collection: &'a [T],
    search: &SearchSpec,
    filters: &FilterSpec,
    sort: Option<&SortSpec>,
    page: PageSpec,
) -> PageView<'a, T> {
    Pipeline::new().run(collection, search, filters, sort, page)
}
