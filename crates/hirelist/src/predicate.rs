//! Field matchers.
//!
//! Each predicate is a pure function of a borrowed field [`Value`] and a
//! matcher argument. A value of the wrong type never matches; predicates
//! never panic on malformed records.
//!
//! [`Matcher`] bundles a predicate kind with its argument so it can be
//! stored in a [`FilterSpec`](crate::FilterSpec).

use std::cmp::Ordering;
use std::fmt;

use regex::Regex;

use crate::error::Result;
use crate::value::{Number, Timestamp, Value};

/// Filter value meaning "no constraint".
pub const ALL: &str = "all";

fn is_all(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(ALL)
}

/// Strict equality between a field and an operand.
///
/// Text comparison is case-sensitive unless `case_insensitive` is set.
/// Numbers compare across integer/float representations (`10 == 10.0`).
pub fn equals(value: &Value<'_>, expected: &Operand, case_insensitive: bool) -> bool {
    match (value, expected) {
        (Value::String(s), Operand::Text(t)) if case_insensitive => {
            s.to_lowercase() == t.to_lowercase()
        }
        (Value::String(s), Operand::Text(t)) => s == t,
        (Value::Number(n), Operand::Number(m)) => n.compare(*m) == Some(Ordering::Equal),
        (Value::Bool(b), Operand::Bool(c)) => b == c,
        _ => false,
    }
}

/// Case-insensitive substring test. An empty needle always matches.
pub fn contains_substring(haystack: &Value<'_>, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    match haystack {
        Value::String(s) => s.to_lowercase().contains(&needle.to_lowercase()),
        _ => false,
    }
}

/// Inclusive numeric range. A missing bound is open on that side.
///
/// Non-numeric values and NaN never match.
pub fn numeric_range(value: &Value<'_>, min: Option<Number>, max: Option<Number>) -> bool {
    let Some(n) = value.as_number() else {
        return false;
    };
    if n.is_nan() {
        return false;
    }
    let above_min = min.map_or(true, |lo| matches!(n.compare(lo), Some(o) if o.is_ge()));
    let below_max = max.map_or(true, |hi| matches!(n.compare(hi), Some(o) if o.is_le()));
    above_min && below_max
}

/// True if any candidate is a case-insensitive substring of any element of
/// a list field. Partial names match: `"react"` matches `"React Native"`.
pub fn contains_any(value: &Value<'_>, candidates: &[String]) -> bool {
    if !value.is_list() {
        return false;
    }
    let candidates: Vec<String> = candidates.iter().map(|c| c.to_lowercase()).collect();
    value.text_items().any(|item| {
        let item = item.to_lowercase();
        candidates.iter().any(|c| item.contains(c.as_str()))
    })
}

/// Strict boolean comparison.
pub fn boolean_equals(value: &Value<'_>, expected: bool) -> bool {
    value.as_bool() == Some(expected)
}

/// Set membership of a text field, case-insensitive.
pub fn one_of(value: &Value<'_>, options: &[String]) -> bool {
    match value {
        Value::String(s) => options.iter().any(|o| o.to_lowercase() == s.to_lowercase()),
        _ => false,
    }
}

/// Inclusive date range over timestamps or parseable date strings.
pub fn date_range(value: &Value<'_>, from: Option<Timestamp>, to: Option<Timestamp>) -> bool {
    let Some(ts) = value.to_timestamp() else {
        return false;
    };
    from.map_or(true, |f| ts >= f) && to.map_or(true, |t| ts <= t)
}

/// Owned comparison operand for [`Matcher::Equals`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Text(s) => f.write_str(s),
            Operand::Number(n) => match n {
                Number::I64(v) => write!(f, "{v}"),
                Number::U64(v) => write!(f, "{v}"),
                Number::F64(v) => write!(f, "{v}"),
            },
            Operand::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Number(Number::from(n))
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Number(Number::from(n))
    }
}

impl From<u32> for Operand {
    fn from(n: u32) -> Self {
        Operand::Number(Number::from(n))
    }
}

impl From<u64> for Operand {
    fn from(n: u64) -> Self {
        Operand::Number(Number::from(n))
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(Number::from(n))
    }
}

/// A matcher kind together with its argument.
///
/// # Example
///
/// ```
/// use hirelist::{Matcher, Value};
///
/// let matcher = Matcher::equals("Active");
/// assert!(matcher.matches(&Value::String("Active")));
/// assert!(!matcher.matches(&Value::String("active")));
///
/// // "all" is the dropdown sentinel for "no constraint".
/// assert!(!Matcher::equals("all").is_active());
/// ```
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Field equals the operand.
    Equals {
        /// Expected value.
        value: Operand,
        /// Compare text without regard to case.
        case_insensitive: bool,
    },
    /// Text field contains the needle, case-insensitive.
    Contains(String),
    /// Numeric field within inclusive bounds.
    Range {
        /// Lower bound, open when `None`.
        min: Option<Number>,
        /// Upper bound, open when `None`.
        max: Option<Number>,
    },
    /// List field has an element matching any candidate.
    ContainsAny(Vec<String>),
    /// Text field is one of the options.
    OneOf(Vec<String>),
    /// Boolean field equals the flag.
    Bool(bool),
    /// Date field within inclusive bounds.
    DateRange {
        /// Earliest accepted instant, open when `None`.
        from: Option<Timestamp>,
        /// Latest accepted instant, open when `None`.
        to: Option<Timestamp>,
    },
    /// Text field matches a regular expression.
    Pattern(Regex),
}

impl Matcher {
    /// Case-sensitive equality.
    pub fn equals(value: impl Into<Operand>) -> Self {
        Matcher::Equals {
            value: value.into(),
            case_insensitive: false,
        }
    }

    /// Case-insensitive equality.
    pub fn equals_ignore_case(value: impl Into<Operand>) -> Self {
        Matcher::Equals {
            value: value.into(),
            case_insensitive: true,
        }
    }

    /// Substring match.
    pub fn contains(needle: impl Into<String>) -> Self {
        Matcher::Contains(needle.into())
    }

    /// Inclusive numeric range.
    pub fn range(min: Option<Number>, max: Option<Number>) -> Self {
        Matcher::Range { min, max }
    }

    /// Numeric lower bound only.
    pub fn at_least(min: impl Into<Number>) -> Self {
        Matcher::Range {
            min: Some(min.into()),
            max: None,
        }
    }

    /// Numeric upper bound only.
    pub fn at_most(max: impl Into<Number>) -> Self {
        Matcher::Range {
            min: None,
            max: Some(max.into()),
        }
    }

    /// Partial match against any of the candidates.
    pub fn contains_any<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Matcher::ContainsAny(candidates.into_iter().map(Into::into).collect())
    }

    /// Membership in a set of options.
    pub fn one_of<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Matcher::OneOf(options.into_iter().map(Into::into).collect())
    }

    /// Boolean flag.
    pub fn is(flag: bool) -> Self {
        Matcher::Bool(flag)
    }

    /// Inclusive date range.
    pub fn date_range(from: Option<Timestamp>, to: Option<Timestamp>) -> Self {
        Matcher::DateRange { from, to }
    }

    /// Regular-expression match.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Matcher::Pattern(Regex::new(pattern)?))
    }

    /// Evaluates this matcher against a field value.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        match self {
            Matcher::Equals {
                value: expected,
                case_insensitive,
            } => equals(value, expected, *case_insensitive),
            Matcher::Contains(needle) => contains_substring(value, needle),
            Matcher::Range { min, max } => numeric_range(value, *min, *max),
            Matcher::ContainsAny(candidates) => contains_any(value, candidates),
            Matcher::OneOf(options) => one_of(value, options),
            Matcher::Bool(flag) => boolean_equals(value, *flag),
            Matcher::DateRange { from, to } => date_range(value, *from, *to),
            Matcher::Pattern(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
        }
    }

    /// Returns `false` when this matcher imposes no constraint.
    ///
    /// Covers the `"all"` sentinel, empty values, open ranges and malformed
    /// configuration (see [`is_malformed`](Matcher::is_malformed)). Inactive
    /// matchers are skipped, never evaluated.
    pub fn is_active(&self) -> bool {
        if self.is_malformed() {
            return false;
        }
        match self {
            Matcher::Equals {
                value: Operand::Text(t),
                ..
            } => !t.is_empty() && !is_all(t),
            Matcher::Equals { .. } | Matcher::Bool(_) => true,
            Matcher::Contains(needle) => !needle.is_empty(),
            Matcher::Range { min, max } => min.is_some() || max.is_some(),
            Matcher::ContainsAny(values) | Matcher::OneOf(values) => {
                values.iter().any(|v| !v.is_empty()) && !values.iter().any(|v| is_all(v))
            }
            Matcher::DateRange { from, to } => from.is_some() || to.is_some(),
            Matcher::Pattern(regex) => !regex.as_str().is_empty(),
        }
    }

    /// Returns `true` for configuration that cannot be honoured: inverted
    /// or NaN range bounds.
    pub fn is_malformed(&self) -> bool {
        match self {
            Matcher::Range { min, max } => {
                let nan = min.is_some_and(Number::is_nan) || max.is_some_and(Number::is_nan);
                let inverted = match (min, max) {
                    (Some(lo), Some(hi)) => lo.compare(*hi).is_some_and(|o| o.is_gt()),
                    _ => false,
                };
                nan || inverted
            }
            Matcher::DateRange {
                from: Some(from),
                to: Some(to),
            } => from > to,
            _ => false,
        }
    }

    /// Returns the short name of this matcher kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Matcher::Equals { .. } => "equals",
            Matcher::Contains(_) => "contains",
            Matcher::Range { .. } => "range",
            Matcher::ContainsAny(_) => "containsAny",
            Matcher::OneOf(_) => "oneOf",
            Matcher::Bool(_) => "is",
            Matcher::DateRange { .. } => "dateRange",
            Matcher::Pattern(_) => "pattern",
        }
    }
}

fn fmt_bound<T: fmt::Display>(bound: Option<T>) -> String {
    bound.map_or_else(|| "*".to_string(), |b| b.to_string())
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Equals { value, .. } => write!(f, "= {value}"),
            Matcher::Contains(needle) => write!(f, "contains '{needle}'"),
            Matcher::Range { min, max } => write!(
                f,
                "in {}..{}",
                fmt_bound(min.map(Operand::Number)),
                fmt_bound(max.map(Operand::Number))
            ),
            Matcher::ContainsAny(values) => write!(f, "has any [{}]", values.join(", ")),
            Matcher::OneOf(values) => write!(f, "in [{}]", values.join(", ")),
            Matcher::Bool(flag) => write!(f, "is {flag}"),
            Matcher::DateRange { from, to } => write!(
                f,
                "between {}..{}",
                fmt_bound(from.map(|t| t.as_millis())),
                fmt_bound(to.map(|t| t.as_millis()))
            ),
            Matcher::Pattern(regex) => write!(f, "matches /{}/", regex.as_str()),
        }
    }
}
