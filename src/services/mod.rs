pub mod client_state;
pub mod dashboard_controller;
pub mod error_handling;
pub mod job_filter;
pub mod mutation_dispatcher;
pub mod state_sync;

pub use client_state::ClientState;
pub use dashboard_controller::DashboardController;
pub use error_handling::{DashboardError, DashboardResult};
pub use job_filter::visible_jobs;
pub use mutation_dispatcher::{Confirm, DeleteOutcome, MutationDispatcher};
pub use state_sync::{Dashboard, StateSync};
