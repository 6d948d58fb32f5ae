pub mod job;
pub mod view_state;

pub use job::{Job, TechMap};
pub use view_state::{AnalysisModel, FilterState, SortDirection, SortKey, SortSpec, SortState};
