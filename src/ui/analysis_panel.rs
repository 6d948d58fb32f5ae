use crate::domain::{AnalysisModel, Job};

use v_htmlescape::escape;

use super::html::escaped_or;

/// State of the one-off result panel under the URL input.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnalysisPanel {
    #[default]
    Idle,
    Pending,
    MissingUrl,
    Failure(String),
    Success(Job),
}

pub fn render_analysis_panel(panel: &AnalysisPanel) -> String {
    match panel {
        AnalysisPanel::Idle => String::new(),
        AnalysisPanel::Pending => "<div class=\"result\">Analyzing...</div>".to_string(),
        AnalysisPanel::MissingUrl => {
            "<div class=\"result error\">Please enter a URL</div>".to_string()
        }
        AnalysisPanel::Failure(message) => {
            format!("<div class=\"result error\">Error: {}</div>", escape(message))
        }
        AnalysisPanel::Success(job) => {
            let field = |value: Option<&str>| escaped_or(value, "N/A");
            format!(
                "<div class=\"result success\"><h3>Job Analysis Results:</h3>\
                 <p><strong>Company:</strong> {}</p>\
                 <p><strong>Job Title:</strong> {}</p>\
                 <p><strong>Location:</strong> {}</p>\
                 <p><strong>URL:</strong> {}</p>\
                 <p><strong>Date Added:</strong> {}</p>\
                 <p><strong>Summary:</strong> {}</p></div>",
                field(job.company_name.as_deref()),
                field(job.job_title.as_deref()),
                field(job.location.as_deref()),
                field(Some(job.url.as_str())),
                field(job.date_added.as_deref()),
                field(job.job_summary.as_deref()),
            )
        }
    }
}

/// Model picker with a check mark beside the current choice.
pub fn render_model_menu(current: AnalysisModel) -> String {
    let mut menu = format!(
        "<div class=\"model-selector\"><button id=\"modelToggle\">{} ▼</button><div id=\"modelMenu\">",
        escape(current.display_name())
    );
    for model in AnalysisModel::ALL {
        let check = if model == current { "✓" } else { "" };
        menu.push_str(&format!(
            "<div class=\"model-item\" data-model=\"{}\"><span class=\"check-icon\">{check}</span>{}</div>",
            model.token(),
            escape(model.display_name())
        ));
    }
    menu.push_str("</div></div>");
    menu
}
