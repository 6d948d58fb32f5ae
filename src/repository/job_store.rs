use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::{AnalysisModel, Job, TechMap};
use crate::services::error_handling::DashboardResult;

/// `GET /jobs` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobsResponse {
    #[serde(default, deserialize_with = "lenient_jobs")]
    pub jobs: Vec<Job>,
}

/// `GET /techs` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TechsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub techs: TechMap,
}

/// `DELETE /jobs` body. The job url doubles as its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteJobRequest {
    pub job_id: String,
}

/// `PATCH /jobs` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdatePriorityRequest {
    pub job_id: String,
    pub priority: u8,
}

/// `POST /analyze` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeRequest {
    pub url: String,
    pub model: AnalysisModel,
}

/// Reply to delete and priority updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "detail", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Reply to `POST /analyze`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Job>,
    #[serde(default, alias = "detail", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    pub fn ok(job: Job) -> Self {
        Self {
            success: true,
            data: Some(job),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// The remote job store. It owns persistence; the dashboard only reads
/// snapshots from it and sends mutation intents.
///
/// Implementations return `Err` only for transport failures. Application
/// failures come back as `success: false` responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn list_jobs(&self) -> DashboardResult<JobsResponse>;

    async fn list_techs(&self) -> DashboardResult<TechsResponse>;

    async fn delete_job(&self, request: DeleteJobRequest) -> DashboardResult<MutationResponse>;

    async fn update_priority(
        &self,
        request: UpdatePriorityRequest,
    ) -> DashboardResult<MutationResponse>;

    async fn analyze(&self, request: AnalyzeRequest) -> DashboardResult<AnalyzeResponse>;
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes the job list entry by entry. Entries that are not objects carry
/// no fields to show and are skipped; a bad entry never drops the others.
fn lenient_jobs<'de, D>(deserializer: D) -> Result<Vec<Job>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut jobs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            warn!(index, entry = %entry, "Skipping job entry that is not an object");
            continue;
        }
        match serde_json::from_value::<Job>(entry) {
            Ok(job) => jobs.push(job),
            Err(err) => {
                warn!(index, error = %err, "Job entry undecodable, showing placeholders");
                jobs.push(Job::default());
            }
        }
    }
    Ok(jobs)
}
