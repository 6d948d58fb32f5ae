use crate::domain::{FilterState, TechMap};

use v_htmlescape::escape;

/// "All" followed by every known label in lexicographic order. The list is
/// always the full backend set; the filter only marks which label is active.
pub fn render_tech_sidebar(techs: &TechMap, filter: &FilterState) -> String {
    let mut sidebar = tech_label("", "All", !filter.is_active());
    for label in techs.labels() {
        sidebar.push_str(&tech_label(label, label, filter.label() == Some(label)));
    }
    sidebar
}

fn tech_label(value: &str, text: &str, active: bool) -> String {
    let class = if active { "tech-label active" } else { "tech-label" };
    format!(
        "<span class=\"{class}\" data-tech=\"{}\">{}</span>",
        escape(value),
        escape(text)
    )
}

/// Table heading for the active filter.
pub fn render_heading(filter: &FilterState) -> String {
    match filter.label() {
        Some(label) => format!(
            "<span class=\"tech-label active\">{}</span> jobs",
            escape(label)
        ),
        None => "All Jobs".to_string(),
    }
}

pub fn render_tech_toggle(collapsed: bool) -> String {
    let class = if collapsed { "toggle-techs collapsed" } else { "toggle-techs" };
    format!("<button id=\"toggleTechs\" class=\"{class}\">Technologies</button>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn techs() -> TechMap {
        ["Rust", "AWS", "Go"].into_iter().collect()
    }

    #[test]
    fn test_all_is_active_without_filter() {
        let sidebar = render_tech_sidebar(&techs(), &FilterState::all());

        assert!(sidebar.starts_with("<span class=\"tech-label active\" data-tech=\"\">All</span>"));
        assert_eq!(sidebar.matches("active").count(), 1);
    }

    #[test]
    fn test_labels_sorted_and_active_marked() {
        let sidebar = render_tech_sidebar(&techs(), &FilterState::technology("Go"));

        let aws = sidebar.find(">AWS<").unwrap();
        let go = sidebar.find(">Go<").unwrap();
        let rust = sidebar.find(">Rust<").unwrap();
        assert!(aws < go && go < rust);
        assert!(sidebar.contains("<span class=\"tech-label active\" data-tech=\"Go\">Go</span>"));
        assert!(sidebar.contains("<span class=\"tech-label\" data-tech=\"\">All</span>"));
    }

    #[test]
    fn test_filter_does_not_narrow_label_list() {
        let sidebar = render_tech_sidebar(&techs(), &FilterState::technology("Go"));
        assert_eq!(sidebar.matches("<span").count(), 4);
    }

    #[test]
    fn test_heading() {
        assert_eq!(render_heading(&FilterState::all()), "All Jobs");
        assert_eq!(
            render_heading(&FilterState::technology("C++")),
            "<span class=\"tech-label active\">C++</span> jobs"
        );
    }

    #[test]
    fn test_toggle_class() {
        assert!(render_tech_toggle(true).contains("class=\"toggle-techs collapsed\""));
        assert!(render_tech_toggle(false).contains("class=\"toggle-techs\""));
    }
}
