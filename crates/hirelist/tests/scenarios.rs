//! End-to-end list scenarios over recruiting data.

use std::cmp::Ordering;

use hirelist::{
    facet_counts_with, requires_page_reset, run, ComparatorKind, ComparatorRegistry, Dir, Filter,
    FilterSpec, ListState, Matcher, Number, PageSpec, Pipeline, Record, RecordId, SearchSpec,
    Seekable, SelectAllScope, SelectionTracker, SortSpec, Timestamp, Value, ViewConfig, ViewQuery,
};

// ============================================================================
// Fixtures
// ============================================================================

fn jobs() -> Vec<Record> {
    vec![
        Record::new(1u32)
            .with("title", "Senior React Developer")
            .with("department", "Engineering")
            .with("status", "Active")
            .with("salaryMax", 140_000)
            .with("skills", vec!["TypeScript", "CSS"])
            .with("postedDate", "2024-03-01"),
        Record::new(2u32)
            .with("title", "Product Designer")
            .with("department", "Design")
            .with("status", "Draft")
            .with("salaryMax", 110_000)
            .with("skills", vec!["Figma"])
            .with("postedDate", "2024-02-12"),
        Record::new(3u32)
            .with("title", "Frontend Engineer")
            .with("department", "Engineering")
            .with("status", "Active")
            .with("salaryMax", 125_000)
            .with("skills", vec!["React", "Redux"])
            .with("postedDate", "2024-03-15"),
        Record::new(4u32)
            .with("title", "Data Analyst")
            .with("department", "Analytics")
            .with("status", "Closed")
            .with("salaryMax", 95_000)
            .with("skills", vec!["SQL", "Python"])
            .with("postedDate", "2023-11-20"),
        Record::new(5u32)
            .with("title", "Recruiting Coordinator")
            .with("department", "People")
            .with("status", "Active")
            .with("salaryMax", 80_000)
            .with("skills", vec!["Scheduling"])
            .with("postedDate", "not a date"),
    ]
}

fn ids<T: Seekable>(rows: &[&T]) -> Vec<String> {
    rows.iter().map(|r| r.record_id().to_string()).collect()
}

fn active_only() -> FilterSpec {
    FilterSpec::new().equals("status", "Active")
}

fn everything() -> (SearchSpec, FilterSpec) {
    (SearchSpec::default(), FilterSpec::new())
}

// ============================================================================
// Pipeline scenarios
// ============================================================================

#[test]
fn status_filter_counts_active_jobs() {
    let jobs = jobs();
    let search = SearchSpec::default();
    let view = run(&jobs, &search, &active_only(), None, PageSpec::first(10));

    assert_eq!(view.total_matched, 3);
    assert_eq!(ids(view.visible()), ["1", "3", "5"]);
}

#[test]
fn salary_desc_puts_highest_first() {
    let jobs = jobs();
    let view = run(
        &jobs,
        &SearchSpec::default(),
        &active_only(),
        Some(&SortSpec::number_desc("salaryMax")),
        PageSpec::first(10),
    );

    assert_eq!(ids(view.visible()), ["1", "3", "5"]);
    assert_eq!(
        view.visible()[0].field_value("salaryMax").as_number(),
        Some(Number::I64(140_000))
    );
}

#[test]
fn three_matches_over_two_pages() {
    let jobs = jobs();
    let (search, active) = (SearchSpec::default(), active_only());
    let first = run(&jobs, &search, &active, None, PageSpec::new(1, 2));
    let second = run(&jobs, &search, &active, None, PageSpec::new(2, 2));

    assert_eq!(first.total_pages, 2);
    assert_eq!(first.visible().len(), 2);
    assert_eq!(second.visible().len(), 1);
    assert!(first.has_next());
    assert!(!second.has_next());
    let shown = (second.first_item_number(), second.last_item_number());
    assert_eq!(shown, (3, 3));
}

#[test]
fn search_matches_title_or_skills() {
    let jobs = jobs();
    let search = SearchSpec::new("react", ["title", "skills"]);
    let filters = FilterSpec::new();
    let view = run(&jobs, &search, &filters, None, PageSpec::first(10));

    // Job 1 says React only in its title, job 3 only in its skills.
    assert_eq!(ids(view.visible()), ["1", "3"]);
}

#[test]
fn select_all_twice_clears_page() {
    let page: Vec<RecordId> = vec![RecordId::from(1u32), RecordId::from(2u32)];
    let mut selection = SelectionTracker::new();

    selection.select_all_visible(&page);
    assert_eq!(selection.count(), 2);
    selection.select_all_visible(&page);
    assert!(selection.is_empty());
}

#[test]
fn filter_change_resets_out_of_range_page() {
    let jobs = jobs();
    let pipeline = Pipeline::new();
    let mut state = ListState::new(ViewQuery {
        page: PageSpec::new(3, 2),
        ..ViewQuery::default()
    });

    let view = state.refresh(&pipeline, &jobs);
    assert_eq!(view.current_page, 3);

    let before = state.query().clone();
    state.set_choice("status", "Active");
    assert!(requires_page_reset(&before, state.query()));

    let view = state.refresh(&pipeline, &jobs);
    assert_eq!(view.total_pages, 2);
    assert_eq!(view.current_page, 1);
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn no_matches_yields_single_empty_page() {
    let jobs = jobs();
    let search = SearchSpec::new("astronaut", ["title"]);
    let filters = FilterSpec::new();
    let view = run(&jobs, &search, &filters, None, PageSpec::new(4, 10));

    assert!(view.is_empty());
    assert_eq!((view.total_pages, view.current_page), (1, 1));
    assert_eq!(view.first_item_number(), 0);
}

#[test]
fn invalid_dates_sort_last_both_ways() {
    let jobs = jobs();
    let (search, filters) = everything();
    for sort in [
        SortSpec::date_desc("postedDate"),
        SortSpec::date_asc("postedDate"),
    ] {
        let view = run(&jobs, &search, &filters, Some(&sort), PageSpec::first(10));
        assert_eq!(ids(view.visible()).last().map(String::as_str), Some("5"));
    }

    let newest = run(
        &jobs,
        &search,
        &filters,
        Some(&SortSpec::date_desc("postedDate")),
        PageSpec::first(10),
    );
    assert_eq!(ids(newest.visible()), ["3", "1", "2", "4", "5"]);
}

#[test]
fn unknown_comparator_keeps_matched_order() {
    let jobs = jobs();
    let (search, active) = (SearchSpec::default(), active_only());
    let sort = SortSpec::new("title", ComparatorKind::parse("seniority"), Dir::Asc);
    let view = run(&jobs, &search, &active, Some(&sort), PageSpec::first(10));

    assert_eq!(ids(view.visible()), ["1", "3", "5"]);
}

#[test]
fn registered_comparator_orders_by_status_weight() {
    fn weight(status: Option<&str>) -> u8 {
        match status {
            Some("Active") => 0,
            Some("Draft") => 1,
            Some("Closed") => 2,
            _ => 3,
        }
    }

    fn by_weight(a: &Value<'_>, b: &Value<'_>) -> Ordering {
        weight(a.as_str()).cmp(&weight(b.as_str()))
    }

    let registry = ComparatorRegistry::new().register("weighted", by_weight);
    let pipeline = Pipeline::with_registry(registry);
    let jobs = jobs();
    let (search, filters) = everything();
    let sort = SortSpec::new("status", ComparatorKind::parse("weighted"), Dir::Asc);

    let view = pipeline.run(&jobs, &search, &filters, Some(&sort), PageSpec::first(10));
    assert_eq!(ids(view.visible()), ["1", "3", "5", "2", "4"]);
}

#[test]
fn all_choice_and_malformed_range_are_inactive() {
    let jobs = jobs();
    let backwards = Matcher::range(Some(Number::from(200_000)), Some(Number::from(10_000)));
    let filters = FilterSpec::new()
        .equals("department", "all")
        .with("salaryMax", backwards);
    let search = SearchSpec::default();
    let view = run(&jobs, &search, &filters, None, PageSpec::first(10));

    assert_eq!(view.total_matched, 5);
}

#[test]
fn wrong_typed_fields_do_not_match() {
    let mut jobs = jobs();
    let mistyped = Record::new(6u32)
        .with("salaryMax", "lots")
        .with("skills", "React");
    jobs.push(mistyped);
    let search = SearchSpec::default();

    let rich = FilterSpec::new().with("salaryMax", Matcher::at_least(100_000));
    let view = run(&jobs, &search, &rich, None, PageSpec::first(10));
    assert_eq!(ids(view.visible()), ["1", "2", "3"]);

    let react = FilterSpec::new().with("skills", Matcher::contains_any(["react"]));
    let view = run(&jobs, &search, &react, None, PageSpec::first(10));
    assert_eq!(ids(view.visible()), ["3"]);
}

#[test]
fn source_collection_is_untouched() {
    let jobs = jobs();
    let snapshot = jobs.clone();
    let _ = run(
        &jobs,
        &SearchSpec::new("e", ["title"]),
        &active_only(),
        Some(&SortSpec::string_desc("title")),
        PageSpec::new(2, 1),
    );
    assert_eq!(jobs, snapshot);
}

// ============================================================================
// Selection across refreshes
// ============================================================================

#[test]
fn refresh_drops_selections_outside_matches() {
    let jobs = jobs();
    let pipeline = Pipeline::new();
    let mut state = ListState::new(ViewQuery::default());

    let view = state.refresh(&pipeline, &jobs);
    state.selection_mut().select_all(&view);
    assert_eq!(state.selection().count(), 5);

    let active = Filter::new("status", Matcher::equals("Active"));
    state.set_filter("status", active);
    state.refresh(&pipeline, &jobs);
    assert_eq!(
        state.selection().selected_ids(),
        vec![
            RecordId::from(1u32),
            RecordId::from(3u32),
            RecordId::from(5u32),
        ]
    );
}

#[test]
fn matched_scope_selects_across_pages() {
    let jobs = jobs();
    let query = ViewQuery {
        page: PageSpec::first(2),
        ..ViewQuery::default()
    };
    let mut state = ListState::with_scope(query, SelectAllScope::Matched);

    let view = Pipeline::new().run_query(&jobs, state.query());
    state.selection_mut().select_all(&view);
    assert_eq!(state.selection().count(), 5);
    assert_eq!(view.visible().len(), 2);
}

// ============================================================================
// Typed entities and configuration
// ============================================================================

struct Interview {
    id: u32,
    candidate: String,
    scheduled_at: i64,
    score: Option<f64>,
}

impl Interview {
    fn new(id: u32, candidate: &str, scheduled_at: i64, score: Option<f64>) -> Self {
        Self {
            id,
            candidate: candidate.to_string(),
            scheduled_at,
            score,
        }
    }
}

impl Seekable for Interview {
    fn record_id(&self) -> RecordId {
        RecordId::from(self.id)
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "candidate" => Value::String(&self.candidate),
            "scheduledAt" => Value::Timestamp(Timestamp::from_millis(self.scheduled_at)),
            "score" => match self.score {
                Some(score) => Value::Number(Number::F64(score)),
                None => Value::None,
            },
            _ => Value::None,
        }
    }
}

#[test]
fn typed_entities_use_the_same_pipeline() {
    let interviews = vec![
        Interview::new(1, "Ada", 3_000, Some(4.5)),
        Interview::new(2, "Alan", 1_000, None),
        Interview::new(3, "Grace", 2_000, Some(3.0)),
    ];

    let by_score = run(
        &interviews,
        &SearchSpec::default(),
        &FilterSpec::new(),
        Some(&SortSpec::score_desc("score")),
        PageSpec::first(10),
    );
    assert_eq!(ids(by_score.visible()), ["1", "3", "2"]);

    let upcoming = FilterSpec::new().with(
        "scheduledAt",
        Matcher::date_range(Some(Timestamp::from_millis(1_500)), None),
    );
    let view = run(
        &interviews,
        &SearchSpec::default(),
        &upcoming,
        Some(&SortSpec::date_asc("scheduledAt")),
        PageSpec::first(10),
    );
    assert_eq!(ids(view.visible()), ["3", "1"]);
}

#[test]
fn config_drives_initial_view() {
    let config = ViewConfig::from_yaml_str(
        r#"
pageSize: 2
searchFields: [title, skills]
defaultSort: { field: salaryMax, kind: numberDesc }
facets: [department]
"#,
    )
    .unwrap();

    let jobs = jobs();
    let mut state = config.list_state();
    state.set_search("e");
    let view = state.refresh(&Pipeline::new(), &jobs);

    assert_eq!(view.page_size, 2);
    assert_eq!(ids(view.visible()), ["1", "3"]);

    let query = state.query();
    let facets = facet_counts_with(&jobs, &query.search, &query.filters, "department");
    assert_eq!(facets[0].value, "Engineering");
    assert_eq!(facets[0].count, 2);
}
