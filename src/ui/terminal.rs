use crate::domain::{FilterState, Job, TechMap};

use super::html::or_placeholder;

const MAX_CELL: usize = 32;

/// Plain-text rendering of the visible jobs for the command line.
pub fn render_job_lines(visible: &[&Job], filter: &FilterState) -> String {
    let heading = match filter.label() {
        Some(label) => format!("{label} jobs"),
        None => "All Jobs".to_string(),
    };
    if visible.is_empty() {
        return format!("{heading}\n(no jobs)\n");
    }

    let header = ["PRI", "DATE", "COMPANY", "TITLE", "LOCATION", "URL"];
    let rows: Vec<[String; 6]> = visible
        .iter()
        .map(|job| {
            [
                job.effective_priority().to_string(),
                cell(job.date_added.as_deref()),
                cell(job.company_name.as_deref()),
                cell(job.job_title.as_deref()),
                cell(job.location.as_deref()),
                job.url.clone(),
            ]
        })
        .collect();

    let mut widths = header.map(|title| title.chars().count());
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = format!("{heading}\n");
    out.push_str(&format_line(header.map(String::from).iter(), &widths));
    for row in &rows {
        out.push_str(&format_line(row.iter(), &widths));
    }
    out
}

/// Technology labels in sidebar order, marking the active one.
pub fn render_tech_lines(techs: &TechMap, filter: &FilterState) -> String {
    let mut out = String::new();
    for label in techs.labels() {
        let marker = if filter.label() == Some(label) { "*" } else { " " };
        out.push_str(&format!("{marker} {label}\n"));
    }
    out
}

fn cell(value: Option<&str>) -> String {
    let text = or_placeholder(value, "N/A");
    if text.chars().count() > MAX_CELL {
        let truncated: String = text.chars().take(MAX_CELL - 1).collect();
        format!("{truncated}…")
    } else {
        text.to_string()
    }
}

fn format_line<'a>(cells: impl Iterator<Item = &'a String>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}
