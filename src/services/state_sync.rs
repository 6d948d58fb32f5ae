use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

use crate::domain::AnalysisModel;
use crate::repository::JobStore;
use crate::services::client_state::ClientState;
use crate::services::error_handling::{DashboardResult, LogHelper};
use crate::ui::{AnalysisPanel, DashboardView};

/// Client state together with the fragments last rendered from it.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub state: ClientState,
    pub view: DashboardView,
    pub panel: AnalysisPanel,
}

impl Dashboard {
    pub fn new(model: AnalysisModel) -> Self {
        let mut dashboard = Self {
            state: ClientState::new(model),
            ..Default::default()
        };
        dashboard.redraw_all();
        dashboard
    }

    pub fn redraw_jobs(&mut self) {
        self.view.redraw_jobs(&self.state);
    }

    pub fn redraw_techs(&mut self) {
        self.view.redraw_techs(&self.state);
    }

    pub fn redraw_controls(&mut self) {
        self.view.redraw_controls(&self.state);
    }

    pub fn redraw_all(&mut self) {
        self.view.redraw_all(&self.state);
        self.view.show_panel(&self.panel);
    }

    pub fn set_panel(&mut self, panel: AnalysisPanel) {
        self.view.show_panel(&panel);
        self.panel = panel;
    }
}

/// Pulls snapshots from the job store into the shared dashboard.
///
/// Jobs and techs are fetched independently and each response redraws its
/// own region as soon as it lands, in whatever order they arrive. Responses
/// are never checked for staleness: when two fetches of the same resource
/// overlap, the one that finishes last wins even if it was issued first.
#[derive(Clone)]
pub struct StateSync {
    store: Arc<dyn JobStore>,
    dashboard: Arc<Mutex<Dashboard>>,
}

impl StateSync {
    pub fn new(store: Arc<dyn JobStore>, model: AnalysisModel) -> Self {
        Self {
            store,
            dashboard: Arc::new(Mutex::new(Dashboard::new(model))),
        }
    }

    pub fn store(&self) -> &Arc<dyn JobStore> {
        &self.store
    }

    /// Fetches `GET /jobs` and redraws the table. On failure the previous
    /// snapshot stays in place.
    pub async fn load_jobs(&self) -> DashboardResult<usize> {
        let response = self
            .store
            .list_jobs()
            .await
            .inspect_err(|err| LogHelper::log_fetch_failure("jobs", err))?;

        let count = response.jobs.len();
        {
            let mut dashboard = self.dashboard.lock();
            dashboard.state.set_jobs(response.jobs);
            dashboard.redraw_jobs();
        }
        info!(jobs = count, "Jobs loaded");
        Ok(count)
    }

    /// Fetches `GET /techs` and redraws the sidebar and heading.
    pub async fn load_techs(&self) -> DashboardResult<usize> {
        let response = self
            .store
            .list_techs()
            .await
            .inspect_err(|err| LogHelper::log_fetch_failure("technologies", err))?;

        let count = response.techs.len();
        {
            let mut dashboard = self.dashboard.lock();
            dashboard.state.set_techs(response.techs);
            dashboard.redraw_techs();
        }
        info!(techs = count, "Technologies loaded");
        Ok(count)
    }

    /// Fetches jobs and techs concurrently. Both fetches always run to
    /// completion; the first error, if any, is returned afterwards.
    pub async fn refresh(&self) -> DashboardResult<()> {
        let (jobs, techs) = tokio::join!(self.load_jobs(), self.load_techs());
        jobs?;
        techs?;
        Ok(())
    }

    /// Runs `f` with the dashboard locked. Must not be held across awaits.
    pub fn with<R>(&self, f: impl FnOnce(&mut Dashboard) -> R) -> R {
        f(&mut self.dashboard.lock())
    }

    pub fn snapshot(&self) -> Dashboard {
        self.dashboard.lock().clone()
    }
}
