// Test helpers for integration testing

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{AnalysisModel, Job, TechMap};
use crate::repository::{
    AnalyzeRequest, AnalyzeResponse, DeleteJobRequest, JobStore, JobsResponse, MutationResponse,
    TechsResponse, UpdatePriorityRequest,
};
use crate::services::error_handling::{DashboardError, DashboardResult};

pub fn job(url: &str, priority: i64, date_added: &str) -> Job {
    Job {
        url: url.to_string(),
        company_name: Some(format!("{url} Inc")),
        job_title: Some("Engineer".to_string()),
        date_added: Some(date_added.to_string()),
        priority: Some(priority),
        ..Default::default()
    }
}

pub fn job_with_techs(url: &str, priority: i64, date_added: &str, techs: &[&str]) -> Job {
    Job {
        technologies: techs.iter().map(|tech| tech.to_string()).collect(),
        ..job(url, priority, date_added)
    }
}

pub fn urls(jobs: &[Job]) -> Vec<&str> {
    jobs.iter().map(|job| job.url.as_str()).collect()
}

/// A request the scripted store received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    ListJobs,
    ListTechs,
    Delete(String),
    UpdatePriority(String, u8),
    Analyze(String, AnalysisModel),
}

struct Scripted<T> {
    delay: Duration,
    reply: DashboardResult<T>,
}

/// In-memory `JobStore` replaying queued replies in call order.
///
/// A reply is claimed when the call starts and returned after its delay,
/// so overlapping calls can finish out of order. Unscripted fetches return
/// empty lists; unscripted mutations fail with a transport error.
#[derive(Default)]
pub struct ScriptedJobStore {
    jobs: Mutex<VecDeque<Scripted<JobsResponse>>>,
    techs: Mutex<VecDeque<Scripted<TechsResponse>>>,
    deletes: Mutex<VecDeque<Scripted<MutationResponse>>>,
    priorities: Mutex<VecDeque<Scripted<MutationResponse>>>,
    analyses: Mutex<VecDeque<Scripted<AnalyzeResponse>>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl ScriptedJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_jobs(&self, jobs: Vec<Job>) -> &Self {
        self.push_jobs_after(jobs, Duration::ZERO)
    }

    pub fn push_jobs_after(&self, jobs: Vec<Job>, delay: Duration) -> &Self {
        push(&self.jobs, delay, Ok(JobsResponse { jobs }));
        self
    }

    pub fn push_jobs_error(&self, message: &str) -> &Self {
        push(&self.jobs, Duration::ZERO, Err(DashboardError::transport(message)));
        self
    }

    pub fn push_techs(&self, labels: &[&str]) -> &Self {
        self.push_techs_after(labels, Duration::ZERO)
    }

    pub fn push_techs_after(&self, labels: &[&str], delay: Duration) -> &Self {
        let techs: TechMap = labels.iter().copied().collect();
        push(&self.techs, delay, Ok(TechsResponse { techs }));
        self
    }

    pub fn push_delete(&self, reply: DashboardResult<MutationResponse>) -> &Self {
        push(&self.deletes, Duration::ZERO, reply);
        self
    }

    pub fn push_priority(&self, reply: DashboardResult<MutationResponse>) -> &Self {
        push(&self.priorities, Duration::ZERO, reply);
        self
    }

    pub fn push_analyze(&self, reply: DashboardResult<AnalyzeResponse>) -> &Self {
        push(&self.analyses, Duration::ZERO, reply);
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, matches: impl Fn(&StoreCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| matches(*call)).count()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().push(call);
    }
}

fn push<T>(queue: &Mutex<VecDeque<Scripted<T>>>, delay: Duration, reply: DashboardResult<T>) {
    queue.lock().push_back(Scripted { delay, reply });
}

async fn replay<T>(
    queue: &Mutex<VecDeque<Scripted<T>>>,
    unscripted: impl FnOnce() -> DashboardResult<T>,
) -> DashboardResult<T> {
    let next = queue.lock().pop_front();
    match next {
        Some(Scripted { delay, reply }) => {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            reply
        }
        None => unscripted(),
    }
}

#[async_trait]
impl JobStore for ScriptedJobStore {
    async fn list_jobs(&self) -> DashboardResult<JobsResponse> {
        self.record(StoreCall::ListJobs);
        replay(&self.jobs, || Ok(JobsResponse::default())).await
    }

    async fn list_techs(&self) -> DashboardResult<TechsResponse> {
        self.record(StoreCall::ListTechs);
        replay(&self.techs, || Ok(TechsResponse::default())).await
    }

    async fn delete_job(&self, request: DeleteJobRequest) -> DashboardResult<MutationResponse> {
        self.record(StoreCall::Delete(request.job_id));
        replay(&self.deletes, || Err(DashboardError::transport("no scripted delete reply"))).await
    }

    async fn update_priority(
        &self,
        request: UpdatePriorityRequest,
    ) -> DashboardResult<MutationResponse> {
        self.record(StoreCall::UpdatePriority(request.job_id, request.priority));
        replay(&self.priorities, || {
            Err(DashboardError::transport("no scripted priority reply"))
        })
        .await
    }

    async fn analyze(&self, request: AnalyzeRequest) -> DashboardResult<AnalyzeResponse> {
        self.record(StoreCall::Analyze(request.url, request.model));
        replay(&self.analyses, || Err(DashboardError::transport("no scripted analyze reply"))).await
    }
}
