use std::cmp::Ordering;

use crate::domain::{FilterState, Job, SortKey, SortSpec};

/// Derives the ordered list of jobs the table shows.
///
/// Filtering keeps jobs carrying the selected label (all jobs when none is
/// selected). Sorting is a fresh stable sort of the received order by the
/// single key in `sort`, so ties always keep backend order regardless of
/// earlier sorts. Jobs whose `date_added` does not parse sort after every
/// dated job in both directions.
pub fn visible_jobs<'a>(
    all_jobs: &'a [Job],
    filter: &FilterState,
    sort: Option<SortSpec>,
) -> Vec<&'a Job> {
    let mut visible: Vec<&Job> = all_jobs.iter().filter(|job| filter.matches(job)).collect();

    if let Some(spec) = sort {
        visible.sort_by(|a, b| compare_jobs(a, b, spec));
    }

    visible
}

pub fn compare_jobs(a: &Job, b: &Job, spec: SortSpec) -> Ordering {
    match spec.key {
        SortKey::Priority => spec
            .direction
            .apply(a.effective_priority().cmp(&b.effective_priority())),
        SortKey::DateAdded => match (a.added_on(), b.added_on()) {
            (Some(a_date), Some(b_date)) => spec.direction.apply(a_date.cmp(&b_date)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
