use jobboard::domain::{FilterState, Job, SortDirection, SortKey, SortSpec, SortState};
use jobboard::services::visible_jobs;
use jobboard::test_helpers::{job, job_with_techs};
use rstest::rstest;

fn visible_urls(jobs: &[Job], filter: &FilterState, sort: Option<SortSpec>) -> Vec<String> {
    visible_jobs(jobs, filter, sort)
        .into_iter()
        .map(|job| job.url.clone())
        .collect()
}

fn sample_jobs() -> Vec<Job> {
    vec![
        job_with_techs("a", 3, "2024-01-05", &["Rust"]),
        job_with_techs("b", 1, "2024-02-01", &["Go"]),
        job_with_techs("c", 5, "2023-12-24", &["Go", "Rust"]),
        job_with_techs("d", 2, "2024-01-20", &[]),
    ]
}

#[rstest]
#[case::no_filter(None, vec!["a", "b", "c", "d"])]
#[case::go(Some("Go"), vec!["b", "c"])]
#[case::rust(Some("Rust"), vec!["a", "c"])]
#[case::unknown_label(Some("Haskell"), vec![])]
#[case::case_sensitive(Some("go"), vec![])]
fn test_filter_keeps_exactly_matching_jobs(#[case] label: Option<&str>, #[case] expected: Vec<&str>) {
    let filter = match label {
        Some(label) => FilterState::technology(label),
        None => FilterState::all(),
    };
    assert_eq!(visible_urls(&sample_jobs(), &filter, None), expected);
}

#[rstest]
#[case(SortKey::Priority, SortDirection::Ascending, vec!["b", "d", "a", "c"])]
#[case(SortKey::Priority, SortDirection::Descending, vec!["c", "a", "d", "b"])]
#[case(SortKey::DateAdded, SortDirection::Ascending, vec!["c", "a", "d", "b"])]
#[case(SortKey::DateAdded, SortDirection::Descending, vec!["b", "d", "a", "c"])]
fn test_single_key_sort(
    #[case] key: SortKey,
    #[case] direction: SortDirection,
    #[case] expected: Vec<&str>,
) {
    let spec = SortSpec::new(key, direction);
    assert_eq!(visible_urls(&sample_jobs(), &FilterState::all(), Some(spec)), expected);
}

#[test]
fn test_priority_sort_is_stable_for_ties() {
    let jobs = vec![
        job("first", 2, "2024-01-01"),
        job("low", 0, "2024-01-01"),
        job("second", 2, "2024-01-01"),
        job("third", 2, "2024-01-01"),
    ];
    let asc = SortSpec::new(SortKey::Priority, SortDirection::Ascending);
    let desc = SortSpec::new(SortKey::Priority, SortDirection::Descending);

    assert_eq!(
        visible_urls(&jobs, &FilterState::all(), Some(asc)),
        vec!["low", "first", "second", "third"]
    );
    assert_eq!(
        visible_urls(&jobs, &FilterState::all(), Some(desc)),
        vec!["first", "second", "third", "low"]
    );
}

#[test]
fn test_toggle_scenario_from_two_jobs() {
    let jobs = vec![job("a", 3, "2024-01-05"), job("b", 1, "2024-02-01")];
    let mut sort = SortState::new();

    sort.activate(SortKey::Priority);
    assert_eq!(visible_urls(&jobs, &FilterState::all(), sort.spec()), vec!["b", "a"]);

    sort.activate(SortKey::Priority);
    assert_eq!(visible_urls(&jobs, &FilterState::all(), sort.spec()), vec!["a", "b"]);
}

#[test]
fn test_toggling_twice_restores_order() {
    let jobs = sample_jobs();
    let mut sort = SortState::new();

    sort.activate(SortKey::DateAdded);
    let first = visible_urls(&jobs, &FilterState::all(), sort.spec());
    sort.activate(SortKey::DateAdded);
    let flipped = visible_urls(&jobs, &FilterState::all(), sort.spec());
    sort.activate(SortKey::DateAdded);
    let again = visible_urls(&jobs, &FilterState::all(), sort.spec());

    assert_ne!(first, flipped);
    assert_eq!(first, again);
}

#[test]
fn test_filtered_result_ignores_sort_state() {
    let jobs = vec![
        job("a", 3, "2024-01-05"),
        job_with_techs("b", 1, "2024-02-01", &["Go"]),
    ];
    let filter = FilterState::technology("Go");

    assert_eq!(visible_urls(&jobs, &filter, None), vec!["b"]);
    for key in [SortKey::Priority, SortKey::DateAdded] {
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let spec = SortSpec::new(key, direction);
            assert_eq!(visible_urls(&jobs, &filter, Some(spec)), vec!["b"]);
        }
    }
}

#[test]
fn test_last_clicked_column_replaces_previous_sort() {
    let jobs = sample_jobs();
    let mut sort = SortState::new();

    sort.activate(SortKey::Priority);
    sort.activate(SortKey::DateAdded);

    // Pure date order; the earlier priority sort leaves no trace.
    assert_eq!(
        visible_urls(&jobs, &FilterState::all(), sort.spec()),
        vec!["c", "a", "d", "b"]
    );
}

#[test]
fn test_invalid_dates_sort_last_and_keep_relative_order() {
    let jobs = vec![
        job("bad-1", 1, "n/a"),
        job("dated", 1, "2024-01-01"),
        job("bad-2", 1, ""),
    ];
    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        let spec = SortSpec::new(SortKey::DateAdded, direction);
        assert_eq!(
            visible_urls(&jobs, &FilterState::all(), Some(spec)),
            vec!["dated", "bad-1", "bad-2"]
        );
    }
}
