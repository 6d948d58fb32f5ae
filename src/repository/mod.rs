pub mod http_job_store;
pub mod job_store;

pub use http_job_store::HttpJobStore;
pub use job_store::{
    AnalyzeRequest, AnalyzeResponse, DeleteJobRequest, JobStore, JobsResponse, MutationResponse,
    TechsResponse, UpdatePriorityRequest,
};

#[cfg(test)]
pub use job_store::MockJobStore;
