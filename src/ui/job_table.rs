use crate::domain::job::MAX_PRIORITY;
use crate::domain::Job;
use crate::services::client_state::ClientState;

use v_htmlescape::escape;

use super::html::escaped_or;

const NOT_AVAILABLE: &str = "N/A";
const NO_SUMMARY: &str = "No summary available";
const COLUMN_COUNT: usize = 8;

/// Renders the table body: a summary row and a detail row per job, in the
/// given order. Rows are addressed by `data-url`, never by position.
pub fn render_job_table(visible: &[&Job], state: &ClientState) -> String {
    let mut body = String::new();
    for job in visible {
        let expanded = state.is_expanded(&job.url);
        body.push_str(&render_summary_row(job, state.displayed_priority(job), expanded));
        body.push_str(&render_details_row(job, expanded));
    }
    body
}

pub fn render_summary_row(job: &Job, priority: i64, expanded: bool) -> String {
    let url = escape(&job.url).to_string();
    let arrow = if expanded { "▼" } else { "▶" };

    let mut row = format!(
        "<tr class=\"job-row\" data-url=\"{url}\" title=\"{}\">",
        escaped_or(job.job_summary.as_deref(), NO_SUMMARY)
    );
    row.push_str(&format!(
        "<td><button class=\"expand-btn\" data-url=\"{url}\">{arrow}</button></td>"
    ));
    for field in [&job.company_name, &job.job_title, &job.location] {
        row.push_str(&format!(
            "<td>{}</td>",
            escaped_or(field.as_deref(), NOT_AVAILABLE)
        ));
    }
    row.push_str(&format!("<td>{}</td>", render_priority_select(&url, priority)));
    row.push_str(&format!(
        "<td>{}</td>",
        escaped_or(job.date_added.as_deref(), NOT_AVAILABLE)
    ));
    row.push_str(&format!(
        "<td><a class=\"view-btn\" href=\"{url}\" target=\"_blank\" rel=\"noopener\">View</a></td>"
    ));
    row.push_str(&format!(
        "<td><button class=\"delete-btn\" data-url=\"{url}\">✗</button></td>"
    ));
    row.push_str("</tr>");
    row
}

/// `url` must already be escaped.
fn render_priority_select(url: &str, priority: i64) -> String {
    let mut select = format!("<select class=\"priority-select\" data-url=\"{url}\">");
    for value in 0..=MAX_PRIORITY {
        let selected = if i64::from(value) == priority { " selected" } else { "" };
        select.push_str(&format!("<option value=\"{value}\"{selected}>{value}</option>"));
    }
    select.push_str("</select>");
    select
}

pub fn render_details_row(job: &Job, expanded: bool) -> String {
    let url = escape(&job.url).to_string();
    let display = if expanded { "block" } else { "none" };
    let field = |value: &Option<String>| escaped_or(value.as_deref(), NOT_AVAILABLE);

    let technologies: String = job
        .technologies
        .iter()
        .map(|tech| format!("<span class=\"tech-label\">{}</span>", escape(tech)))
        .collect();

    format!(
        "<tr class=\"details-row\"><td colspan=\"{COLUMN_COUNT}\">\
         <div class=\"job-details\" data-url=\"{url}\" style=\"display: {display}\">\
         <h4>Job Details:</h4>\
         <p><strong>Company:</strong> {company}</p>\
         <p><strong>Job Title:</strong> {title}</p>\
         <p><strong>Location:</strong> {location}</p>\
         <p><strong>URL:</strong> <a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{url}</a></p>\
         <p><strong>Date Added:</strong> {date}</p>\
         <p><strong>Summary:</strong> {summary}</p>\
         <p><strong>Technologies:</strong> {technologies}</p>\
         </div></td></tr>",
        company = field(&job.company_name),
        title = field(&job.job_title),
        location = field(&job.location),
        date = field(&job.date_added),
        summary = escaped_or(job.job_summary.as_deref(), NO_SUMMARY),
    )
}
