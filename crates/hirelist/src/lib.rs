//! Hirelist - faceted list views for in-memory record collections.
//!
//! Hirelist turns a collection of records plus the user's current view
//! settings into the page of rows to render. Every dashboard list (jobs,
//! candidates, applications, offers) goes through the same pipeline:
//!
//! ```text
//! collection ─▶ search ─▶ filters ─▶ sort ─▶ paginate ─▶ PageView
//!                                                          │
//!                         SelectionTracker ◀── reconcile ──┘
//! ```
//!
//! - **Search**: case-insensitive substring over configured fields
//! - **Filters**: keyed predicates (equality, ranges, sets, dates), all ANDed
//! - **Sort**: stable, by date, text, number, score or a registered comparator
//! - **Pagination**: 1-based pages, clamped into range
//! - **Selection**: checked ids for bulk actions, pruned after each run
//!
//! # Quick Start
//!
//! ```rust
//! use hirelist::{FilterSpec, Matcher, PageSpec, Pipeline, Record, SearchSpec, SortSpec};
//!
//! let candidates = vec![
//!     Record::new("c1").with("name", "Ada Lovelace").with("score", 92),
//!     Record::new("c2").with("name", "Alan Turing").with("score", 88),
//!     Record::new("c3").with("name", "Grace Hopper").with("score", 95),
//! ];
//!
//! let search = SearchSpec::new("a", ["name"]);
//! let filters = FilterSpec::new().with("score", Matcher::at_least(90));
//! let sort = SortSpec::score_desc("score");
//!
//! let view = Pipeline::new().run(
//!     &candidates,
//!     &search,
//!     &filters,
//!     Some(&sort),
//!     PageSpec::first(10),
//! );
//! let ids: Vec<&str> = view.visible().iter().map(|r| r.id.as_str()).collect();
//! assert_eq!(ids, ["c3", "c1"]);
//! ```
//!
//! # Records
//!
//! Any type implementing [`Seekable`] can be listed. [`Record`] is the
//! ready-made implementation: an id plus a JSON-shaped map of fields,
//! addressable with dotted paths such as `"candidate.name"`.
//!
//! # Filter Semantics
//!
//! | Matcher | Matches when |
//! |---------|--------------|
//! | `Equals` | text or number equals the operand (`"all"` disables it) |
//! | `Contains` | text contains the needle, ignoring case |
//! | `Range` | number lies in the inclusive bounds |
//! | `ContainsAny` | a list element partially matches any candidate |
//! | `OneOf` | text equals one of the options |
//! | `Bool` | boolean equals the flag |
//! | `DateRange` | date lies in the inclusive bounds |
//! | `Pattern` | text matches the regex |
//!
//! Inactive filters (`"all"`, empty text, open or inverted ranges) match
//! every record.

mod config;
mod error;
mod facet;
mod filter;
mod pipeline;
mod predicate;
mod record;
mod search;
mod selection;
mod sort;
mod state;
mod traits;
mod value;

pub use config::{views_from_json, views_from_yaml, SortConfig, ViewConfig};
pub use error::{HirelistError, Result};
pub use facet::{facet_counts, facet_counts_with, FacetCount};
pub use filter::{evaluate, CompiledFilter, Filter, FilterSpec};
pub use pipeline::{
    requires_page_reset, run, PageSpec, PageSummary, PageView, Pipeline, ViewQuery,
    DEFAULT_PAGE_SIZE,
};
pub use predicate::{
    boolean_equals, contains_any, contains_substring, date_range, equals, numeric_range, one_of,
    Matcher, Operand, ALL,
};
pub use record::{FieldValue, Record, RecordId};
pub use search::{matches, SearchSpec};
pub use selection::{CheckState, SelectAllScope, SelectionTracker};
pub use sort::{
    get_comparator, Comparator, ComparatorKind, ComparatorRegistry, Dir, SortSpec, ValueComparator,
};
pub use state::ListState;
pub use traits::Seekable;
pub use value::{Number, Timestamp, Value};
