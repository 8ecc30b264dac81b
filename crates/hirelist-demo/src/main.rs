//! hirelist-demo: run the list pipeline from the command line.
//!
//! Reads job postings (embedded samples or a JSON file), applies search,
//! filters, sort and pagination, and prints the visible page.
//!
//! ```text
//! hirelist-demo --search react --filter status=Active --sort salaryMax:numberDesc
//! hirelist-demo --filter salaryMax=120000.. --page-size 3 --page 2 --json
//! RUST_LOG=hirelist=debug hirelist-demo --facet department
//! ```

mod render;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use hirelist::{
    facet_counts_with, Filter, ListState, Matcher, Number, Pipeline, Record, SearchSpec, SortConfig,
    SortSpec, ViewConfig,
};
use tracing_subscriber::{filter::EnvFilter, fmt};

use crate::render::PageDocument;

const SAMPLE_JOBS: &str = include_str!("../data/jobs.json");

const DEFAULT_SEARCH_FIELDS: [&str; 3] = ["title", "department", "skills"];
const DEFAULT_COLUMNS: [&str; 4] = ["title", "department", "status", "salaryMax"];

#[derive(Parser, Debug)]
#[command(
    name = "hirelist-demo",
    version,
    about = "Search, filter, sort and page through recruiting records"
)]
struct Cli {
    /// JSON array of records to list instead of the sample jobs
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// YAML view config (page size, search fields, default sort, facets)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Free-text search
    #[arg(short, long)]
    search: Option<String>,

    /// Field to search in (repeatable)
    #[arg(long = "field", value_name = "FIELD")]
    fields: Vec<String>,

    /// Filter as KEY=VALUE, or KEY=MIN..MAX for a numeric range (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    filters: Vec<FilterArg>,

    /// Sort as FIELD:KEY, e.g. postedDate:dateDesc
    #[arg(long, value_name = "FIELD:KEY", value_parser = parse_sort)]
    sort: Option<SortSpec>,

    /// Page to show, 1-based
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Column to show in the table (repeatable)
    #[arg(long = "column", value_name = "FIELD")]
    columns: Vec<String>,

    /// Print option counts for a field (repeatable)
    #[arg(long = "facet", value_name = "FIELD")]
    facets: Vec<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone)]
enum FilterArg {
    Choice { key: String, value: String },
    Range {
        key: String,
        min: Option<f64>,
        max: Option<f64>,
    },
}

fn parse_filter(raw: &str) -> std::result::Result<FilterArg, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(format!("missing filter key in `{raw}`"));
    }

    match value.split_once("..") {
        Some((min, max)) => Ok(FilterArg::Range {
            key,
            min: parse_bound(min)?,
            max: parse_bound(max)?,
        }),
        None => Ok(FilterArg::Choice {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_bound(raw: &str) -> std::result::Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|e| format!("invalid range bound `{raw}`: {e}"))
}

fn parse_sort(raw: &str) -> std::result::Result<SortSpec, String> {
    match raw.split_once(':') {
        Some((field, key)) if !field.trim().is_empty() && !key.trim().is_empty() => {
            Ok(SortSpec::from_key(field.trim(), key))
        }
        _ => Err(format!("expected FIELD:KEY, got `{raw}`")),
    }
}

fn load_records(path: Option<&Path>) -> Result<Vec<Record>> {
    let records: Vec<Record> = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing records in {}", path.display()))?
        }
        None => serde_json::from_str(SAMPLE_JOBS).context("parsing embedded sample jobs")?,
    };
    tracing::debug!(
        records = records.len(),
        source = %path.map_or_else(|| "sample".to_string(), |p| p.display().to_string()),
        "loaded records"
    );
    Ok(records)
}

fn load_config(path: Option<&Path>) -> Result<ViewConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ViewConfig::from_yaml_str(&text)
                .with_context(|| format!("parsing view config {}", path.display()))
        }
        None => Ok(ViewConfig {
            search_fields: DEFAULT_SEARCH_FIELDS.map(String::from).into(),
            default_sort: Some(SortConfig {
                field: "postedDate".to_string(),
                kind: "dateDesc".to_string(),
                direction: None,
            }),
            ..ViewConfig::default()
        }),
    }
}

fn apply_flags(state: &mut ListState, cli: &Cli) {
    if !cli.fields.is_empty() {
        let query = state.query().search.query().to_string();
        state.update(|q| q.search = SearchSpec::new(&query, &cli.fields));
    }
    if let Some(search) = &cli.search {
        state.set_search(search);
    }
    for filter in &cli.filters {
        match filter {
            FilterArg::Choice { key, value } => {
                state.set_choice(key, value);
            }
            FilterArg::Range { key, min, max } => {
                let matcher = Matcher::range(min.map(Number::F64), max.map(Number::F64));
                state.set_filter(key, Filter::new(key.as_str(), matcher));
            }
        }
    }
    if let Some(sort) = &cli.sort {
        state.set_sort(Some(sort.clone()));
    }
    if let Some(size) = cli.page_size {
        state.set_page_size(size);
    }
    // Last, so filter changes above don't reset it.
    state.set_page(cli.page);
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let records = load_records(cli.data.as_deref())?;
    let config = load_config(cli.config.as_deref())?;

    let pipeline = Pipeline::new();
    config
        .validate(pipeline.registry())
        .context("view config names a sort this pipeline cannot resolve")?;

    let mut state = config.list_state();
    apply_flags(&mut state, &cli);
    let view = state.refresh(&pipeline, &records);

    let facet_fields = if cli.facets.is_empty() { &config.facets } else { &cli.facets };
    let query = state.query();
    let facets: BTreeMap<String, _> = facet_fields
        .iter()
        .map(|field| {
            (
                field.clone(),
                facet_counts_with(&records, &query.search, &query.filters, field),
            )
        })
        .collect();
    let filtered_by = query.filters.summary();

    if cli.json {
        let document = PageDocument {
            summary: view.summary(),
            filtered_by,
            records: view.visible().to_vec(),
            facets,
        };
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        let columns: Vec<String> = if cli.columns.is_empty() {
            DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
        } else {
            cli.columns.clone()
        };
        let table = render::table(&view, &columns, filtered_by.as_deref());
        print!("{table}");
        for (field, counts) in &facets {
            print!("{}", render::facets(field, counts));
        }
    }
    Ok(())
}
