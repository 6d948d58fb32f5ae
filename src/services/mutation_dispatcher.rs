use tracing::{info, warn};

use crate::domain::job::MAX_PRIORITY;
use crate::domain::{AnalysisModel, Job};
use crate::repository::{AnalyzeRequest, DeleteJobRequest, UpdatePriorityRequest};
use crate::services::error_handling::{DashboardError, DashboardResult, LogHelper};
use crate::services::state_sync::StateSync;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this job?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Checks a selector value against the 0..=5 range the backend accepts.
pub fn validate_priority(priority: i64) -> DashboardResult<u8> {
    u8::try_from(priority)
        .ok()
        .filter(|value| *value <= MAX_PRIORITY)
        .ok_or(DashboardError::InvalidPriority { priority })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Sends create/update/delete intents to the job store.
///
/// Successful deletes and analyses are followed by a full re-fetch of jobs
/// and techs. Priority updates are not: the selector already shows the new
/// value. Failed refreshes after a successful mutation are logged only.
#[derive(Clone)]
pub struct MutationDispatcher {
    sync: StateSync,
}

impl MutationDispatcher {
    pub fn new(sync: StateSync) -> Self {
        Self { sync }
    }

    pub async fn delete(&self, url: &str, confirm: &dyn Confirm) -> DashboardResult<DeleteOutcome> {
        if !confirm.confirm(DELETE_PROMPT) {
            info!(url = %url, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let request = DeleteJobRequest {
            job_id: url.to_string(),
        };
        let outcome = match self.sync.store().delete_job(request).await {
            Ok(response) if response.success => Ok(()),
            Ok(response) => Err(DashboardError::rejected(response.error)),
            Err(err) => Err(err),
        };
        LogHelper::log_mutation("delete", url, &outcome);
        outcome?;

        self.refresh_after("delete").await;
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn update_priority(&self, url: &str, priority: i64) -> DashboardResult<()> {
        let priority = validate_priority(priority)?;

        let request = UpdatePriorityRequest {
            job_id: url.to_string(),
            priority,
        };
        let outcome = match self.sync.store().update_priority(request).await {
            Ok(response) if response.success => Ok(()),
            Ok(response) => Err(DashboardError::rejected(response.error)),
            Err(err) => Err(err),
        };
        LogHelper::log_mutation("update_priority", url, &outcome);
        outcome
    }

    /// Submits a posting for analysis. Only presence of a URL is checked.
    pub async fn analyze(&self, url: &str, model: AnalysisModel) -> DashboardResult<Job> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DashboardError::MissingUrl);
        }

        let request = AnalyzeRequest {
            url: url.to_string(),
            model,
        };
        info!(url = %url, model = %model, "Submitting job for analysis");
        let job = match self.sync.store().analyze(request).await {
            Ok(response) if response.success => match response.data {
                Some(job) => Ok(job),
                None => Err(DashboardError::rejected(Some(
                    "Analysis returned no job data".to_string(),
                ))),
            },
            Ok(response) => Err(DashboardError::rejected(response.error)),
            Err(err) => Err(err),
        };
        LogHelper::log_mutation("analyze", url, &job);
        let job = job?;

        self.refresh_after("analyze").await;
        Ok(job)
    }

    async fn refresh_after(&self, operation: &str) {
        if let Err(err) = self.sync.refresh().await {
            warn!(operation = %operation, error = %err, "Refresh after mutation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TechMap;
    use crate::repository::{AnalyzeResponse, JobsResponse, MockJobStore, MutationResponse, TechsResponse};
    use std::sync::Arc;

    fn dispatcher(store: MockJobStore) -> MutationDispatcher {
        MutationDispatcher::new(StateSync::new(Arc::new(store), AnalysisModel::default()))
    }

    fn expect_refresh(store: &mut MockJobStore) {
        store
            .expect_list_jobs()
            .times(1)
            .returning(|| Ok(JobsResponse::default()));
        store
            .expect_list_techs()
            .times(1)
            .returning(|| Ok(TechsResponse { techs: TechMap::new() }));
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let mut store = MockJobStore::new();
        store.expect_delete_job().never();

        let outcome = dispatcher(store)
            .delete("a", &|_: &str| false)
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_delete_success_refreshes() {
        let mut store = MockJobStore::new();
        store
            .expect_delete_job()
            .times(1)
            .returning(|request| {
                assert_eq!(request.job_id, "a");
                Ok(MutationResponse::ok())
            });
        expect_refresh(&mut store);

        let outcome = dispatcher(store).delete("a", &|_: &str| true).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
    }

    #[tokio::test]
    async fn test_delete_rejection_skips_refresh() {
        let mut store = MockJobStore::new();
        store
            .expect_delete_job()
            .times(1)
            .returning(|_| Ok(MutationResponse::failed("not found")));
        store.expect_list_jobs().never();
        store.expect_list_techs().never();

        let err = dispatcher(store).delete("a", &|_: &str| true).await.unwrap_err();
        assert_eq!(err.user_message(), "not found");
    }

    #[tokio::test]
    async fn test_priority_update_does_not_refresh() {
        let mut store = MockJobStore::new();
        store
            .expect_update_priority()
            .times(1)
            .returning(|request| {
                assert_eq!(request.priority, 0);
                Ok(MutationResponse::ok())
            });
        store.expect_list_jobs().never();
        store.expect_list_techs().never();

        dispatcher(store).update_priority("a", 0).await.unwrap();
    }

    #[tokio::test]
    async fn test_out_of_range_priority_is_rejected_locally() {
        let mut store = MockJobStore::new();
        store.expect_update_priority().never();
        let dispatcher = dispatcher(store);

        for priority in [-1, 6] {
            let err = dispatcher.update_priority("a", priority).await.unwrap_err();
            assert_eq!(err, DashboardError::InvalidPriority { priority });
        }
    }

    #[tokio::test]
    async fn test_empty_url_is_not_submitted() {
        let mut store = MockJobStore::new();
        store.expect_analyze().never();

        let err = dispatcher(store)
            .analyze("   ", AnalysisModel::Anthropic)
            .await
            .unwrap_err();
        assert_eq!(err, DashboardError::MissingUrl);
    }

    #[tokio::test]
    async fn test_analyze_sends_model_and_refreshes() {
        let mut store = MockJobStore::new();
        store.expect_analyze().times(1).returning(|request| {
            assert_eq!(request.model, AnalysisModel::OpenAi);
            Ok(AnalyzeResponse::ok(Job::new(request.url)))
        });
        expect_refresh(&mut store);

        let job = dispatcher(store)
            .analyze("https://example.com/9", AnalysisModel::OpenAi)
            .await
            .unwrap();
        assert_eq!(job.url, "https://example.com/9");
    }

    #[tokio::test]
    async fn test_analyze_success_without_data_is_rejected() {
        let mut store = MockJobStore::new();
        store.expect_analyze().times(1).returning(|_| {
            Ok(AnalyzeResponse {
                success: true,
                ..Default::default()
            })
        });

        let err = dispatcher(store)
            .analyze("https://example.com/9", AnalysisModel::Anthropic)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Analysis returned no job data");
    }
}
