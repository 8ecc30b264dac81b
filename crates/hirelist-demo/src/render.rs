//! Plain-text and JSON rendering of a page.

use std::collections::BTreeMap;

use hirelist::{FacetCount, FieldValue, PageSummary, PageView, Record};
use serde::Serialize;

const MAX_CELL: usize = 28;

/// JSON document printed with `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument<'a> {
    pub summary: PageSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_by: Option<String>,
    pub records: Vec<&'a Record>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub facets: BTreeMap<String, Vec<FacetCount>>,
}

/// Renders the visible rows as an aligned table with a footer.
pub fn table(view: &PageView<'_, Record>, columns: &[String], filtered_by: Option<&str>) -> String {
    let mut out = String::new();
    if view.is_empty() {
        out.push_str("No records match.\n");
    } else {
        let mut header = vec!["id".to_string()];
        header.extend(columns.iter().cloned());

        let rows: Vec<Vec<String>> = view
            .visible()
            .iter()
            .map(|record| {
                let mut row = vec![record.id.to_string()];
                row.extend(columns.iter().map(|c| cell(record.get(c))));
                row
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|i| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header[i].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        push_row(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_row(&mut out, &rule, &widths);
        for row in &rows {
            push_row(&mut out, row, &widths);
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Showing {}–{} of {} (page {} of {})\n",
        view.first_item_number(),
        view.last_item_number(),
        view.total_matched,
        view.current_page,
        view.total_pages
    ));
    if let Some(summary) = filtered_by {
        out.push_str(&format!("Filtered by: {summary}\n"));
    }
    out
}

/// Renders facet counts as `value (count)` lines under a heading.
pub fn facets(field: &str, counts: &[FacetCount]) -> String {
    let mut out = format!("\n{field}:\n");
    if counts.is_empty() {
        out.push_str("  (none)\n");
    }
    for facet in counts {
        out.push_str(&format!("  {} ({})\n", facet.value, facet.count));
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn cell(value: Option<&FieldValue>) -> String {
    let text = match value {
        None | Some(FieldValue::Null) => String::new(),
        Some(FieldValue::Bool(b)) => b.to_string(),
        Some(FieldValue::Integer(n)) => n.to_string(),
        Some(FieldValue::Float(n)) => n.to_string(),
        Some(FieldValue::Text(s)) => s.clone(),
        Some(FieldValue::List(items)) => items
            .iter()
            .map(|item| cell(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        Some(FieldValue::Object(map)) => format!("{{{} fields}}", map.len()),
    };
    truncate(&text)
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(MAX_CELL - 1).collect();
        short.push('…');
        short
    }
}
