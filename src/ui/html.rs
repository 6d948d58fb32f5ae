use v_htmlescape::escape;

use super::DashboardView;

/// Field text, or `placeholder` when the field is absent or empty.
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => placeholder,
    }
}

/// Like [`or_placeholder`], escaping field text. Placeholders are fixed
/// markup-free strings and go out as is.
pub fn escaped_or(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => escape(text).to_string(),
        _ => placeholder.to_string(),
    }
}

/// Wraps the rendered fragments in a standalone document.
pub fn render_dashboard_page(view: &DashboardView) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n<title>Job Tracker</title>\n</head>\n<body>\n");

    page.push_str("<aside class=\"sidebar\">\n");
    page.push_str(&view.tech_toggle);
    page.push_str("\n<div id=\"techList\">");
    page.push_str(&view.tech_sidebar);
    page.push_str("</div>\n</aside>\n");

    page.push_str("<main>\n<section class=\"analyze\">\n");
    page.push_str(&view.model_menu);
    page.push_str("\n<div id=\"result\">");
    page.push_str(&view.analysis_panel);
    page.push_str("</div>\n</section>\n");

    page.push_str("<section class=\"jobs-table\">\n<h2>");
    page.push_str(&view.heading);
    page.push_str("</h2>\n<table>\n<thead><tr>");
    page.push_str("<th></th><th>Company</th><th>Title</th><th>Location</th>");
    page.push_str("<th id=\"sort-priority\" class=\"sortable\">Priority</th>");
    page.push_str("<th id=\"sort-date\" class=\"sortable\">Date Added</th>");
    page.push_str("<th></th><th></th></tr></thead>\n<tbody id=\"jobsTableBody\">");
    page.push_str(&view.job_table);
    page.push_str("</tbody>\n</table>\n</section>\n</main>\n</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape(r#"<b class="x">Tom & Jerry</b"#).to_string(),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; Jerry&lt;"
        );
        assert_eq!(escape("plain").to_string(), "plain");
    }

    #[test]
    fn test_placeholder_for_empty_text() {
        assert_eq!(or_placeholder(Some("Acme"), "N/A"), "Acme");
        assert_eq!(or_placeholder(Some(""), "N/A"), "N/A");
        assert_eq!(or_placeholder(None, "N/A"), "N/A");
        assert_eq!(escaped_or(Some("Acme"), "N/A"), "Acme");
        assert_eq!(escaped_or(Some("R&D"), "N/A"), "R&amp;D");
        assert_eq!(escaped_or(Some(""), "N/A"), "N/A");
        assert_eq!(escaped_or(None, "N/A"), "N/A");
    }

    #[test]
    fn test_page_contains_fragments() {
        let view = DashboardView {
            heading: "All Jobs".to_string(),
            job_table: "<tr><td>row</td></tr>".to_string(),
            tech_sidebar: "<span>All</span>".to_string(),
            ..Default::default()
        };
        let page = render_dashboard_page(&view);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<h2>All Jobs</h2>"));
        assert!(page.contains("<tbody id=\"jobsTableBody\"><tr><td>row</td></tr></tbody>"));
        assert!(page.contains("<div id=\"techList\"><span>All</span></div>"));
    }
}
