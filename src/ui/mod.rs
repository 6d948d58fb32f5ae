// HTML fragments for the dashboard page plus a plain-text view for the CLI
pub mod analysis_panel;
pub mod html;
pub mod job_table;
pub mod tech_sidebar;
pub mod terminal;

pub use analysis_panel::{AnalysisPanel, render_analysis_panel, render_model_menu};
pub use html::render_dashboard_page;
pub use job_table::render_job_table;
pub use tech_sidebar::{render_heading, render_tech_sidebar, render_tech_toggle};

use crate::services::client_state::ClientState;

/// The last rendered fragments, one per page region.
///
/// Each region is redrawn on its own trigger: the job table when jobs
/// arrive or the filter/sort/expansion changes, the sidebar and heading
/// when techs arrive or the filter changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub heading: String,
    pub job_table: String,
    pub tech_sidebar: String,
    pub tech_toggle: String,
    pub model_menu: String,
    pub analysis_panel: String,
    /// Message of the most recent failed action, if not yet dismissed.
    pub alert: Option<String>,
}

impl DashboardView {
    pub fn redraw_jobs(&mut self, state: &ClientState) {
        let visible = state.visible_jobs();
        self.job_table = render_job_table(&visible, state);
    }

    pub fn redraw_techs(&mut self, state: &ClientState) {
        self.tech_sidebar = render_tech_sidebar(state.techs(), state.filter());
        self.heading = render_heading(state.filter());
    }

    pub fn redraw_controls(&mut self, state: &ClientState) {
        self.tech_toggle = render_tech_toggle(state.techs_collapsed());
        self.model_menu = render_model_menu(state.model());
    }

    pub fn redraw_all(&mut self, state: &ClientState) {
        self.redraw_jobs(state);
        self.redraw_techs(state);
        self.redraw_controls(state);
    }

    pub fn show_panel(&mut self, panel: &AnalysisPanel) {
        self.analysis_panel = render_analysis_panel(panel);
    }
}
