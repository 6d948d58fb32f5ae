use std::collections::{HashMap, HashSet};

use crate::domain::{AnalysisModel, FilterState, Job, SortKey, SortSpec, SortState, TechMap};
use crate::services::job_filter::visible_jobs;

/// In-memory cache of the last fetched snapshot plus the user's view
/// choices. Nothing here is authoritative; every mutation is followed by a
/// full re-fetch that replaces the snapshot.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    jobs: Vec<Job>,
    techs: TechMap,
    filter: FilterState,
    sort: SortState,
    model: AnalysisModel,
    /// Detail rows the user opened, keyed by job url.
    expanded: HashSet<String>,
    /// Priority selector values chosen since the last snapshot.
    selected_priorities: HashMap<String, i64>,
    techs_collapsed: bool,
}

impl ClientState {
    pub fn new(model: AnalysisModel) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    /// Replaces the job snapshot, kept in received order.
    ///
    /// Selector overrides are dropped because the snapshot now carries the
    /// stored priorities. Expanded rows stay open when their url survives.
    pub fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.selected_priorities.clear();
        self.expanded
            .retain(|url| jobs.iter().any(|job| &job.url == url));
        self.jobs = jobs;
    }

    pub fn set_techs(&mut self, techs: TechMap) {
        self.techs = techs;
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn techs(&self) -> &TechMap {
        &self.techs
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn sort_mut(&mut self) -> &mut SortState {
        &mut self.sort
    }

    pub fn activate_sort(&mut self, key: SortKey) -> SortSpec {
        let direction = self.sort.activate(key);
        SortSpec::new(key, direction)
    }

    pub fn model(&self) -> AnalysisModel {
        self.model
    }

    pub fn set_model(&mut self, model: AnalysisModel) {
        self.model = model;
    }

    pub fn is_expanded(&self, url: &str) -> bool {
        self.expanded.contains(url)
    }

    /// Flips a detail row and returns whether it is now open.
    pub fn toggle_expanded(&mut self, url: &str) -> bool {
        if self.expanded.remove(url) {
            false
        } else {
            self.expanded.insert(url.to_string());
            true
        }
    }

    /// Records the value shown in a job's priority selector.
    pub fn select_priority(&mut self, url: &str, priority: i64) {
        self.selected_priorities.insert(url.to_string(), priority);
    }

    /// Value the priority selector shows for `job`.
    pub fn displayed_priority(&self, job: &Job) -> i64 {
        self.selected_priorities
            .get(&job.url)
            .copied()
            .unwrap_or_else(|| job.effective_priority())
    }

    pub fn techs_collapsed(&self) -> bool {
        self.techs_collapsed
    }

    pub fn toggle_techs_collapsed(&mut self) -> bool {
        self.techs_collapsed = !self.techs_collapsed;
        self.techs_collapsed
    }

    pub fn visible_jobs(&self) -> Vec<&Job> {
        visible_jobs(&self.jobs, &self.filter, self.sort.spec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortDirection;

    fn job(url: &str, priority: i64) -> Job {
        Job {
            url: url.to_string(),
            priority: Some(priority),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_jobs_keeps_received_order() {
        let mut state = ClientState::default();
        state.set_jobs(vec![job("b", 1), job("a", 3)]);

        let urls: Vec<_> = state.jobs().iter().map(|j| j.url.as_str()).collect();
        assert_eq!(urls, vec!["b", "a"]);
    }

    #[test]
    fn test_expanded_rows_survive_refresh_by_url() {
        let mut state = ClientState::default();
        state.set_jobs(vec![job("a", 1), job("b", 2)]);
        assert!(state.toggle_expanded("b"));

        // "a" disappears and "b" moves to index 0; "b" stays open.
        state.set_jobs(vec![job("b", 2), job("c", 3)]);
        assert!(state.is_expanded("b"));
        assert!(!state.is_expanded("c"));

        state.set_jobs(vec![job("c", 3)]);
        assert!(!state.is_expanded("b"));
    }

    #[test]
    fn test_toggle_expanded_twice_closes() {
        let mut state = ClientState::default();
        assert!(state.toggle_expanded("a"));
        assert!(!state.toggle_expanded("a"));
        assert!(!state.is_expanded("a"));
    }

    #[test]
    fn test_selected_priority_until_next_snapshot() {
        let mut state = ClientState::default();
        state.set_jobs(vec![job("a", 3)]);
        state.select_priority("a", 0);
        assert_eq!(state.displayed_priority(&state.jobs()[0]), 0);

        state.set_jobs(vec![job("a", 3)]);
        assert_eq!(state.displayed_priority(&state.jobs()[0]), 3);
    }

    #[test]
    fn test_sort_survives_filter_change() {
        let mut state = ClientState::default();
        state.activate_sort(SortKey::Priority);
        state.set_filter(FilterState::technology("Go"));

        assert_eq!(
            state.sort().spec(),
            Some(SortSpec::new(SortKey::Priority, SortDirection::Ascending))
        );
    }

    #[test]
    fn test_techs_collapsed_toggle() {
        let mut state = ClientState::default();
        assert!(!state.techs_collapsed());
        assert!(state.toggle_techs_collapsed());
        assert!(!state.toggle_techs_collapsed());
    }
}
