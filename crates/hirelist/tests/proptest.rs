//! Property-based tests for the list pipeline using proptest.

use std::collections::BTreeSet;

use hirelist::{
    evaluate, matches, run, FilterSpec, Matcher, Number, PageSpec, Record, RecordId, SearchSpec,
    Seekable, SelectionTracker, SortSpec,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

const STATUSES: [&str; 3] = ["Active", "Draft", "Closed"];
const SKILLS: [&str; 5] = ["React", "Rust", "SQL", "Figma", "Go"];

fn job_strategy() -> impl Strategy<Value = (String, usize, i64, Vec<usize>)> {
    (
        "[a-z ]{0,12}",
        0..STATUSES.len(),
        0i64..250_000,
        prop::collection::vec(0..SKILLS.len(), 0..3),
    )
}

// Ids are assigned by position so every record is distinct.
fn jobs_strategy(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(job_strategy(), 0..max).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (title, status, salary, skills))| {
                let skills: Vec<&str> = skills.into_iter().map(|s| SKILLS[s]).collect();
                Record::new(i as u64)
                    .with("title", title)
                    .with("status", STATUSES[status])
                    .with("salaryMax", salary)
                    .with("skills", skills)
            })
            .collect()
    })
}

fn filter_strategy() -> impl Strategy<Value = FilterSpec> {
    (
        prop::option::of(0..STATUSES.len()),
        prop::option::of(0i64..250_000),
    )
        .prop_map(|(status, min_salary)| {
            let mut spec = FilterSpec::new();
            if let Some(status) = status {
                spec = spec.equals("status", STATUSES[status]);
            }
            if let Some(min) = min_salary {
                spec = spec.with("salaryMax", Matcher::at_least(min));
            }
            spec
        })
}

fn sort_strategy() -> impl Strategy<Value = Option<SortSpec>> {
    prop_oneof![
        Just(None),
        Just(Some(SortSpec::number_desc("salaryMax"))),
        Just(Some(SortSpec::number_asc("salaryMax"))),
        Just(Some(SortSpec::string_asc("status"))),
        Just(Some(SortSpec::string_desc("title"))),
    ]
}

fn id_list(rows: &[&Record]) -> Vec<RecordId> {
    rows.iter().map(|r| r.id.clone()).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Two runs over identical inputs return identical pages.
    #[test]
    fn run_is_idempotent(
        jobs in jobs_strategy(40),
        query in "[a-z]{0,3}",
        filters in filter_strategy(),
        sort in sort_strategy(),
        index in 0usize..6,
        size in 0usize..8,
    ) {
        let search = SearchSpec::new(&query, ["title", "skills"]);
        let page = PageSpec::new(index, size);
        let a = run(&jobs, &search, &filters, sort.as_ref(), page);
        let b = run(&jobs, &search, &filters, sort.as_ref(), page);

        prop_assert_eq!(id_list(a.matched()), id_list(b.matched()));
        prop_assert_eq!(id_list(a.visible()), id_list(b.visible()));
        prop_assert_eq!(a.summary(), b.summary());
    }

    /// Adding a constraint never grows the matched set.
    #[test]
    fn extra_filter_only_narrows(
        jobs in jobs_strategy(40),
        filters in filter_strategy(),
        skill in 0..SKILLS.len(),
    ) {
        let wider: BTreeSet<RecordId> = jobs
            .iter()
            .filter(|job| evaluate(*job, &filters))
            .map(|job| job.id.clone())
            .collect();
        let narrower = filters.clone().with("skills", Matcher::contains_any([SKILLS[skill]]));

        for job in jobs.iter().filter(|job| evaluate(*job, &narrower)) {
            prop_assert!(wider.contains(&job.id));
        }
    }

    /// A blank query matches every record.
    #[test]
    fn blank_search_matches_everything(
        jobs in jobs_strategy(30),
        blank in "[ \t]{0,4}",
    ) {
        let search = SearchSpec::new(&blank, ["title", "skills"]);
        prop_assert!(jobs.iter().all(|job| matches(job, &search)));
    }

    /// Records with equal sort keys keep their matched order, also when
    /// search and filters have already narrowed the collection.
    #[test]
    fn sort_is_stable(
        jobs in jobs_strategy(40),
        query in "[a-z]{0,2}",
        filters in filter_strategy(),
        descending in any::<bool>(),
    ) {
        let search = SearchSpec::new(&query, ["title", "skills"]);
        let sort = if descending {
            SortSpec::string_desc("status")
        } else {
            SortSpec::string_asc("status")
        };
        let unsorted = run(&jobs, &search, &filters, None, PageSpec::first(100));
        let view = run(&jobs, &search, &filters, Some(&sort), PageSpec::first(100));
        prop_assert_eq!(view.total_matched, unsorted.total_matched);

        for job in view.matched() {
            prop_assert!(matches(*job, &search) && evaluate(*job, &filters));
        }

        // Ids follow input order, so within one status they must ascend.
        for pair in view.matched().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.get("status") == b.get("status") {
                let x: u64 = a.id.as_str().parse().unwrap();
                let y: u64 = b.id.as_str().parse().unwrap();
                prop_assert!(x < y);
            }
        }

        // Per status, the sorted run keeps the unsorted run's subsequence.
        for status in STATUSES {
            let in_status = |rows: &[&Record]| -> Vec<RecordId> {
                rows.iter()
                    .filter(|r| r.field_value("status").as_str() == Some(status))
                    .map(|r| r.id.clone())
                    .collect()
            };
            prop_assert_eq!(in_status(view.matched()), in_status(unsorted.matched()));
        }
    }

    /// Walking every page reproduces the ordered matches exactly once.
    #[test]
    fn pages_cover_ordered_matches(
        jobs in jobs_strategy(50),
        filters in filter_strategy(),
        sort in sort_strategy(),
        size in 1usize..9,
    ) {
        let search = SearchSpec::default();
        let first = run(&jobs, &search, &filters, sort.as_ref(), PageSpec::first(size));
        let ordered = id_list(first.matched());

        let mut walked = Vec::new();
        for index in 1..=first.total_pages {
            let view = run(&jobs, &search, &filters, sort.as_ref(), PageSpec::new(index, size));
            prop_assert_eq!(view.current_page, index);
            prop_assert!(view.visible().len() <= size);
            walked.extend(id_list(view.visible()));
        }

        prop_assert_eq!(walked, ordered);
    }

    /// The current page always lies within `1..=total_pages`.
    #[test]
    fn current_page_is_clamped(
        jobs in jobs_strategy(30),
        filters in filter_strategy(),
        index in 0usize..100,
        size in 0usize..10,
    ) {
        let view = run(&jobs, &SearchSpec::default(), &filters, None, PageSpec::new(index, size));
        prop_assert!(view.total_pages >= 1);
        prop_assert!((1..=view.total_pages).contains(&view.current_page));
        prop_assert_eq!(view.total_matched, view.matched().len());
    }

    /// Reconciled selections are a subset of the matched ids.
    #[test]
    fn reconcile_keeps_subset(
        jobs in jobs_strategy(30),
        picks in prop::collection::vec(0u64..40, 0..20),
        filters in filter_strategy(),
    ) {
        let mut selection = SelectionTracker::new();
        for pick in &picks {
            selection.toggle(&RecordId::from(*pick));
        }

        let view = run(&jobs, &SearchSpec::default(), &filters, None, PageSpec::first(10));
        let matched = view.matched_ids();
        selection.reconcile(&matched);

        for id in selection.selected_ids() {
            prop_assert!(matched.contains(&id));
        }
    }

    /// Inclusive numeric range agrees with plain comparisons.
    #[test]
    fn range_is_inclusive(
        value in -1_000i64..1_000,
        min in prop::option::of(-1_000i64..1_000),
        max in prop::option::of(-1_000i64..1_000),
    ) {
        let record = Record::new(1u32).with("n", value);
        let expected = min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m);
        let matcher = Matcher::range(min.map(Number::from), max.map(Number::from));

        // Inverted bounds make the filter inactive, so it passes everything.
        let inverted = matches!((min, max), (Some(lo), Some(hi)) if lo > hi);
        let spec = FilterSpec::new().with("n", matcher);
        prop_assert_eq!(evaluate(&record, &spec), expected || inverted);
    }
}
