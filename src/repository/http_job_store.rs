use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::job_store::{
    AnalyzeRequest, AnalyzeResponse, DeleteJobRequest, JobStore, JobsResponse, MutationResponse,
    TechsResponse, UpdatePriorityRequest,
};
use crate::config::DashboardConfig;
use crate::services::error_handling::{DashboardError, DashboardResult};

/// `JobStore` backed by the dashboard's HTTP API.
#[derive(Clone)]
pub struct HttpJobStore {
    client: Client,
    base_url: String,
}

impl HttpJobStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> DashboardResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> DashboardResult<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.endpoint(path))
    }

    /// Sends the request and decodes the JSON body whatever the status code;
    /// the backend reports application failures inside the body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> DashboardResult<T> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = %status, url = %response.url(), "Job store responded");

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| {
            DashboardError::transport(format!("unexpected response ({status}): {err}"))
        })
    }
}

#[async_trait]
impl JobStore for HttpJobStore {
    async fn list_jobs(&self) -> DashboardResult<JobsResponse> {
        self.send(self.request(Method::GET, "jobs")).await
    }

    async fn list_techs(&self) -> DashboardResult<TechsResponse> {
        self.send(self.request(Method::GET, "techs")).await
    }

    async fn delete_job(&self, request: DeleteJobRequest) -> DashboardResult<MutationResponse> {
        self.send(self.request(Method::DELETE, "jobs").json(&request))
            .await
    }

    async fn update_priority(
        &self,
        request: UpdatePriorityRequest,
    ) -> DashboardResult<MutationResponse> {
        self.send(self.request(Method::PATCH, "jobs").json(&request))
            .await
    }

    async fn analyze(&self, request: AnalyzeRequest) -> DashboardResult<AnalyzeResponse> {
        self.send(self.request(Method::POST, "analyze").json(&request))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        let store = HttpJobStore::with_client(Client::new(), "http://localhost:8000/");
        assert_eq!(store.base_url(), "http://localhost:8000");
        assert_eq!(store.endpoint("jobs"), "http://localhost:8000/jobs");
        assert_eq!(store.endpoint("/analyze"), "http://localhost:8000/analyze");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let store = HttpJobStore::with_client(Client::new(), "https://jobs.example.com/api");
        assert_eq!(store.endpoint("techs"), "https://jobs.example.com/api/techs");
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        let store = HttpJobStore::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = store.list_jobs().await.unwrap_err();
        assert!(err.is_transport());
    }
}
