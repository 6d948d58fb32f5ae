use thiserror::Error;
use tracing::{error, info, warn};

/// Errors surfaced by the dashboard.
///
/// `Transport` and `Rejected` mirror the two failure kinds of every backend
/// round trip: the request never produced a usable answer, or the backend
/// answered `success: false`. Neither changes client state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Request failed: {message}")]
    Transport { message: String },

    #[error("{message}")]
    Rejected { message: String },

    #[error("Please enter a URL")]
    MissingUrl,

    #[error("Invalid priority {priority}: expected a value between 0 and 5")]
    InvalidPriority { priority: i64 },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DashboardError {
    pub fn transport(message: impl Into<String>) -> Self {
        DashboardError::Transport {
            message: message.into(),
        }
    }

    /// Builds a rejection from the backend's optional `error` field.
    pub fn rejected(message: Option<String>) -> Self {
        DashboardError::Rejected {
            message: message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        }
    }

    /// Text shown to the user: the server's message verbatim for rejections,
    /// the underlying cause for transport failures.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Transport { message } | DashboardError::Rejected { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, DashboardError::Transport { .. })
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::transport(err.to_string())
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Structured logging helpers
pub struct LogHelper;

impl LogHelper {
    pub fn log_mutation<T>(operation: &str, url: &str, outcome: &DashboardResult<T>) {
        match outcome {
            Ok(_) => info!(
                operation = %operation,
                url = %url,
                "Mutation completed successfully"
            ),
            Err(err) if err.is_transport() => error!(
                operation = %operation,
                url = %url,
                error = %err,
                "Mutation request failed"
            ),
            Err(err) => warn!(
                operation = %operation,
                url = %url,
                error = %err,
                "Mutation rejected by job store"
            ),
        }
    }

    pub fn log_fetch_failure(resource: &str, err: &DashboardError) {
        error!(
            resource = %resource,
            error = %err,
            "Error loading {}", resource
        );
    }
}
