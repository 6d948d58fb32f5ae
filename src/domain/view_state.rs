use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::job::Job;

/// At most one selected technology label. `None` shows every job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    label: Option<String>,
}

impl FilterState {
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter on `label`. An empty label selects "All".
    pub fn technology(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            label: (!label.is_empty()).then_some(label),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.label.is_some()
    }

    pub fn matches(&self, job: &Job) -> bool {
        match &self.label {
            Some(label) => job.has_technology(label),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Priority,
    DateAdded,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "priority" => Ok(SortKey::Priority),
            "date" | "date_added" | "date-added" => Ok(SortKey::DateAdded),
            other => Err(format!("unknown sort column: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Orients an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// A single sort key with its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

/// Per-column direction flags plus the column activated last.
///
/// Columns start unsorted; the first activation sorts ascending and every
/// later one flips that column. Only the last activated column orders the
/// table, and filter changes leave all of this untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    priority: Option<SortDirection>,
    date_added: Option<SortDirection>,
    active: Option<SortKey>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self, key: SortKey) -> Option<SortDirection> {
        match key {
            SortKey::Priority => self.priority,
            SortKey::DateAdded => self.date_added,
        }
    }

    /// Handles a click on a column header and returns the new direction.
    pub fn activate(&mut self, key: SortKey) -> SortDirection {
        let next = match self.direction(key) {
            Some(direction) => direction.flipped(),
            None => SortDirection::Ascending,
        };
        self.set(key, next);
        next
    }

    /// Sorts by `key` in an explicit direction.
    pub fn set(&mut self, key: SortKey, direction: SortDirection) {
        match key {
            SortKey::Priority => self.priority = Some(direction),
            SortKey::DateAdded => self.date_added = Some(direction),
        }
        self.active = Some(key);
    }

    /// The ordering currently applied to the table, if any.
    pub fn spec(&self) -> Option<SortSpec> {
        let key = self.active?;
        self.direction(key).map(|direction| SortSpec::new(key, direction))
    }
}

/// Model the backend should use when analyzing a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnalysisModel {
    #[default]
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "openai")]
    OpenAi,
}

impl AnalysisModel {
    pub const ALL: [AnalysisModel; 2] = [AnalysisModel::Anthropic, AnalysisModel::OpenAi];

    /// Token sent in the `model` field of `POST /analyze`.
    pub fn token(self) -> &'static str {
        match self {
            AnalysisModel::Anthropic => "anthropic",
            AnalysisModel::OpenAi => "openai",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AnalysisModel::Anthropic => "Claude (Anthropic)",
            AnalysisModel::OpenAi => "OpenAI GPT-3.5 Turbo",
        }
    }
}

impl fmt::Display for AnalysisModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for AnalysisModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(AnalysisModel::Anthropic),
            "openai" | "gpt" => Ok(AnalysisModel::OpenAi),
            other => Err(format!("unknown model: {other}")),
        }
    }
}
