use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{AnalysisModel, FilterState, Job, SortDirection, SortKey, SortSpec};
use crate::repository::JobStore;
use crate::services::error_handling::{DashboardError, DashboardResult};
use crate::services::mutation_dispatcher::{
    Confirm, DeleteOutcome, MutationDispatcher, validate_priority,
};
use crate::services::state_sync::{Dashboard, StateSync};
use crate::ui::{AnalysisPanel, DashboardView};

/// Owns the dashboard state and reacts to user interaction.
///
/// Filter, sort, expansion and model choices redraw synchronously from the
/// cached snapshot. Mutations go through the dispatcher, which re-fetches
/// from the job store when the mutation calls for it.
#[derive(Clone)]
pub struct DashboardController {
    sync: StateSync,
    dispatcher: MutationDispatcher,
}

impl DashboardController {
    pub fn new(store: Arc<dyn JobStore>, model: AnalysisModel) -> Self {
        let sync = StateSync::new(store, model);
        let dispatcher = MutationDispatcher::new(sync.clone());
        Self { sync, dispatcher }
    }

    /// Initial population: jobs and techs fetched concurrently.
    pub async fn load(&self) -> DashboardResult<()> {
        self.sync.refresh().await
    }

    pub async fn load_jobs(&self) -> DashboardResult<usize> {
        self.sync.load_jobs().await
    }

    pub async fn load_techs(&self) -> DashboardResult<usize> {
        self.sync.load_techs().await
    }

    /// Selects a technology label, or "All" with `None`. No network.
    pub fn select_technology(&self, label: Option<&str>) {
        debug!(tech = ?label, "Technology filter changed");
        self.sync.with(|dashboard| {
            let filter = match label {
                Some(label) => FilterState::technology(label),
                None => FilterState::all(),
            };
            dashboard.state.set_filter(filter);
            dashboard.redraw_techs();
            dashboard.redraw_jobs();
        });
    }

    /// Handles a click on a sortable column header.
    pub fn toggle_sort(&self, key: SortKey) -> SortSpec {
        self.sync.with(|dashboard| {
            let spec = dashboard.state.activate_sort(key);
            dashboard.redraw_jobs();
            debug!(?spec, "Jobs sorted");
            spec
        })
    }

    /// Sorts by `key` in an explicit direction.
    pub fn sort_by(&self, key: SortKey, direction: SortDirection) {
        self.sync.with(|dashboard| {
            dashboard.state.sort_mut().set(key, direction);
            dashboard.redraw_jobs();
        });
    }

    /// Opens or closes a job's detail row. Returns whether it is now open.
    pub fn toggle_details(&self, url: &str) -> bool {
        self.sync.with(|dashboard| {
            let open = dashboard.state.toggle_expanded(url);
            dashboard.redraw_jobs();
            open
        })
    }

    pub fn toggle_tech_list(&self) -> bool {
        self.sync.with(|dashboard| {
            let collapsed = dashboard.state.toggle_techs_collapsed();
            dashboard.redraw_controls();
            collapsed
        })
    }

    pub fn select_model(&self, model: AnalysisModel) {
        info!(model = %model, "Analysis model selected");
        self.sync.with(|dashboard| {
            dashboard.state.set_model(model);
            dashboard.redraw_controls();
        });
    }

    /// Deletes a job after confirmation and refreshes on success. Failures
    /// leave the snapshot untouched and raise an alert.
    pub async fn delete_job(
        &self,
        url: &str,
        confirm: &dyn Confirm,
    ) -> DashboardResult<DeleteOutcome> {
        let outcome = self.dispatcher.delete(url, confirm).await;
        if let Err(err) = &outcome {
            self.raise_alert(format!("Error deleting job: {}", err.user_message()));
        }
        outcome
    }

    /// Records the selector change, then tells the job store. The table is
    /// not re-fetched; the selector keeps showing the chosen value. Values
    /// outside 0..=5 are refused before the selector changes.
    pub async fn change_priority(&self, url: &str, priority: i64) -> DashboardResult<()> {
        let outcome = match validate_priority(priority) {
            Ok(_) => {
                self.sync.with(|dashboard| {
                    dashboard.state.select_priority(url, priority);
                    dashboard.redraw_jobs();
                });
                self.dispatcher.update_priority(url, priority).await
            }
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            let prefix = if err.is_transport() {
                "Error updating priority"
            } else {
                "Failed to update priority"
            };
            self.raise_alert(format!("{prefix}: {}", err.user_message()));
        }
        outcome
    }

    /// Submits `url` with the current model and shows the result panel.
    pub async fn analyze(&self, url: &str) -> DashboardResult<Job> {
        if url.trim().is_empty() {
            self.show_panel(AnalysisPanel::MissingUrl);
            return Err(DashboardError::MissingUrl);
        }

        let model = self.sync.with(|dashboard| dashboard.state.model());
        self.show_panel(AnalysisPanel::Pending);

        match self.dispatcher.analyze(url, model).await {
            Ok(job) => {
                self.show_panel(AnalysisPanel::Success(job.clone()));
                Ok(job)
            }
            Err(err) => {
                self.show_panel(AnalysisPanel::Failure(err.user_message()));
                Err(err)
            }
        }
    }

    pub fn visible_jobs(&self) -> Vec<Job> {
        self.sync.with(|dashboard| {
            dashboard
                .state
                .visible_jobs()
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn view(&self) -> DashboardView {
        self.sync.with(|dashboard| dashboard.view.clone())
    }

    pub fn snapshot(&self) -> Dashboard {
        self.sync.snapshot()
    }

    /// Removes and returns the pending alert.
    pub fn take_alert(&self) -> Option<String> {
        self.sync.with(|dashboard| dashboard.view.alert.take())
    }

    fn raise_alert(&self, message: String) {
        self.sync.with(|dashboard| dashboard.view.alert = Some(message));
    }

    fn show_panel(&self, panel: AnalysisPanel) {
        self.sync.with(|dashboard| dashboard.set_panel(panel));
    }
}
