pub mod config;
pub mod domain;
pub mod repository;
pub mod services;
pub mod ui;

// Make test_helpers available for integration tests
pub mod test_helpers;

pub use config::DashboardConfig;
pub use domain::{AnalysisModel, FilterState, Job, SortDirection, SortKey, SortSpec, TechMap};
pub use repository::{HttpJobStore, JobStore};
pub use services::{DashboardController, DashboardError, DashboardResult};
