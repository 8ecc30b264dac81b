//! Sort specifications and the comparator registry.
//!
//! A [`SortSpec`] names a field, a direction and a [`ComparatorKind`]. The
//! [`ComparatorRegistry`] turns it into a record comparator. Built-in kinds
//! cover dates, strings, numbers and derived scores; callers may register
//! extra named kinds. Sorting itself is always stable.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

use crate::error::{HirelistError, Result};
use crate::traits::Seekable;
use crate::value::{Number, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How two field values are compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComparatorKind {
    /// Timestamps or parseable date strings; invalid dates sort last.
    Date,
    /// Collated text; missing text sorts last.
    String,
    /// Numbers; NaN and non-numbers sort last.
    Number,
    /// Derived score such as a match rating; missing counts as 0.
    Score,
    /// A comparator registered by name on a [`ComparatorRegistry`].
    Named(String),
}

impl ComparatorKind {
    /// Parses a kind name leniently: unknown names become [`Named`].
    ///
    /// [`Named`]: ComparatorKind::Named
    pub fn parse(name: &str) -> ComparatorKind {
        match name.trim().to_ascii_lowercase().as_str() {
            "date" => ComparatorKind::Date,
            "string" | "text" => ComparatorKind::String,
            "number" | "numeric" => ComparatorKind::Number,
            "score" => ComparatorKind::Score,
            _ => ComparatorKind::Named(name.trim().to_string()),
        }
    }

    /// Returns the canonical name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ComparatorKind::Date => "date",
            ComparatorKind::String => "string",
            ComparatorKind::Number => "number",
            ComparatorKind::Score => "score",
            ComparatorKind::Named(name) => name,
        }
    }
}

impl FromStr for ComparatorKind {
    type Err = HirelistError;

    /// Strict parsing: only built-in kind names are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match ComparatorKind::parse(s) {
            ComparatorKind::Named(name) => Err(HirelistError::UnknownComparator(name)),
            kind => Ok(kind),
        }
    }
}

impl fmt::Display for ComparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which field to sort by, in which direction, and how to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field name or dotted path.
    pub field: String,
    /// Sort direction.
    pub direction: Dir,
    /// Comparison strategy.
    pub kind: ComparatorKind,
}

impl SortSpec {
    /// Creates a new sort spec.
    pub fn new(field: impl Into<String>, kind: ComparatorKind, direction: Dir) -> Self {
        SortSpec {
            field: field.into(),
            direction,
            kind,
        }
    }

    /// Newest first.
    pub fn date_desc(field: impl Into<String>) -> Self {
        SortSpec::new(field, ComparatorKind::Date, Dir::Desc)
    }

    /// Oldest first.
    pub fn date_asc(field: impl Into<String>) -> Self {
        SortSpec::new(field, ComparatorKind::Date, Dir::Asc)
    }

    /// A to Z.
    pub fn string_asc(field: impl Into<String>) -> Self {
        SortSpec::new(field, ComparatorKind::String, Dir::Asc)
    }

    /// Z to A.
    pub fn string_desc(field: impl Into<String>) -> Self {
        SortSpec::new(field, ComparatorKind::String, Dir::Desc)
    }

    /// Smallest first.
    pub fn number_asc(field: impl Into<String>) -> Self {
        SortSpec::new(field, ComparatorKind::Number, Dir::Asc)
    }

    /// Largest first.
    pub fn number_desc(field: impl Into<String>) -> Self {
        SortSpec::new(field, ComparatorKind::Number, Dir::Desc)
    }

    /// Highest score first.
    pub fn score_desc(field: impl Into<String>) -> Self {
        SortSpec::new(field, ComparatorKind::Score, Dir::Desc)
    }

    /// Builds a spec from a combined dropdown key such as `dateDesc`.
    ///
    /// The key is a kind name followed by `Asc` or `Desc` (case-insensitive);
    /// without a suffix the direction is ascending.
    pub fn from_key(field: impl Into<String>, key: &str) -> Self {
        let key = key.trim();
        let lower = key.to_ascii_lowercase();
        let (kind, direction) = if let Some(kind) = lower.strip_suffix("desc") {
            (&key[..kind.len()], Dir::Desc)
        } else if let Some(kind) = lower.strip_suffix("asc") {
            (&key[..kind.len()], Dir::Asc)
        } else {
            (key, Dir::Asc)
        };
        SortSpec::new(field, ComparatorKind::parse(kind), direction)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.field, self.kind, self.direction)
    }
}

/// A caller-supplied value comparator, always ascending.
pub type ValueComparator = Arc<dyn Fn(&Value<'_>, &Value<'_>) -> Ordering + Send + Sync>;

/// A comparator over two records, direction already applied.
pub type Comparator<'r, T> = Box<dyn Fn(&T, &T) -> Ordering + 'r>;

/// Named comparison strategies selectable at runtime.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use hirelist::{ComparatorKind, ComparatorRegistry, Dir, Record, SortSpec, Value};
///
/// fn rank(v: &Value<'_>) -> Option<usize> {
///     const STAGES: [&str; 3] = ["applied", "interview", "offer"];
///     v.as_str().and_then(|s| STAGES.iter().position(|x| *x == s))
/// }
///
/// let registry = ComparatorRegistry::new().register("stage", |a, b| rank(a).cmp(&rank(b)));
/// let spec = SortSpec::new("stage", ComparatorKind::parse("stage"), Dir::Desc);
/// let cmp = registry.comparator::<Record>(&spec);
///
/// let a = Record::new(1u32).with("stage", "offer");
/// let b = Record::new(2u32).with("stage", "applied");
/// assert_eq!(cmp(&a, &b), Ordering::Less);
/// ```
#[derive(Clone, Default)]
pub struct ComparatorRegistry {
    named: HashMap<String, ValueComparator>,
}

impl fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.named.keys().collect();
        names.sort();
        f.debug_struct("ComparatorRegistry")
            .field("named", &names)
            .finish()
    }
}

impl ComparatorRegistry {
    /// Creates a registry with only the built-in kinds.
    pub fn new() -> Self {
        ComparatorRegistry::default()
    }

    /// Registers a named comparator, builder style.
    ///
    /// The function compares in ascending order; direction is applied by
    /// the registry. Names are matched exactly.
    pub fn register<F>(mut self, name: impl Into<String>, compare: F) -> Self
    where
        F: Fn(&Value<'_>, &Value<'_>) -> Ordering + Send + Sync + 'static,
    {
        self.named.insert(name.into(), Arc::new(compare));
        self
    }

    /// Returns `true` if the kind can be resolved to a real comparator.
    pub fn knows(&self, kind: &ComparatorKind) -> bool {
        match kind {
            ComparatorKind::Named(name) => self.named.contains_key(name),
            _ => true,
        }
    }

    /// Resolves a spec into a record comparator.
    ///
    /// An unregistered named kind resolves to the identity comparator,
    /// which keeps input order, and logs a warning.
    pub fn comparator<'r, T: Seekable + ?Sized + 'r>(
        &'r self,
        spec: &'r SortSpec,
    ) -> Comparator<'r, T> {
        let field = spec.field.as_str();
        let dir = spec.direction;
        match &spec.kind {
            ComparatorKind::Date => Box::new(move |a: &T, b: &T| {
                nulls_last(
                    a.field_value(field).to_timestamp(),
                    b.field_value(field).to_timestamp(),
                    dir,
                    |x, y| x.cmp(y),
                )
            }),
            ComparatorKind::String => Box::new(move |a: &T, b: &T| {
                nulls_last(
                    a.field_value(field).as_str(),
                    b.field_value(field).as_str(),
                    dir,
                    collate,
                )
            }),
            ComparatorKind::Number => Box::new(move |a: &T, b: &T| {
                nulls_last(
                    sortable_number(&a.field_value(field)),
                    sortable_number(&b.field_value(field)),
                    dir,
                    compare_numbers,
                )
            }),
            ComparatorKind::Score => Box::new(move |a: &T, b: &T| {
                let x = score(&a.field_value(field));
                let y = score(&b.field_value(field));
                dir.apply(compare_numbers(&x, &y))
            }),
            ComparatorKind::Named(name) => match self.named.get(name) {
                Some(compare) => Box::new(move |a: &T, b: &T| {
                    let ordering = compare(&a.field_value(field), &b.field_value(field));
                    dir.apply(ordering)
                }),
                None => {
                    tracing::warn!(
                        target: "hirelist::sort",
                        kind = %name,
                        field,
                        "unknown comparator kind, keeping input order"
                    );
                    Box::new(|_: &T, _: &T| Ordering::Equal)
                }
            },
        }
    }

    /// Stable-sorts references in place according to the spec.
    pub fn sort<T: Seekable + ?Sized>(&self, items: &mut [&T], spec: &SortSpec) {
        let compare = self.comparator::<T>(spec);
        items.sort_by(|a, b| compare(*a, *b));
    }
}

/// Resolves a spec with the built-in kinds only.
pub fn get_comparator<'r, T: Seekable + ?Sized + 'r>(spec: &'r SortSpec) -> Comparator<'r, T> {
    static BUILT_IN: std::sync::OnceLock<ComparatorRegistry> = std::sync::OnceLock::new();
    BUILT_IN
        .get_or_init(ComparatorRegistry::new)
        .comparator(spec)
}

/// Orders present keys by `cmp` in direction `dir`; absent keys go last
/// regardless of direction.
fn nulls_last<K>(
    a: Option<K>,
    b: Option<K>,
    dir: Dir,
    cmp: impl Fn(&K, &K) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => dir.apply(cmp(&x, &y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Accent- and case-insensitive text ordering, raw text as tie-break.
fn collate(a: &&str, b: &&str) -> Ordering {
    let fold = |s: &str| deunicode(s).to_lowercase();
    fold(*a).cmp(&fold(*b)).then_with(|| a.cmp(b))
}

fn sortable_number(value: &Value<'_>) -> Option<Number> {
    value.as_number().filter(|n| !n.is_nan())
}

fn score(value: &Value<'_>) -> Number {
    sortable_number(value).unwrap_or(Number::I64(0))
}

fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    a.compare(*b).unwrap_or(Ordering::Equal)
}
