//! Integration tests for loading and walking exported build histories.

use podio_notifier::build::{
    adapters::memory::{BuildHistoryLoadError, InMemoryBuildHistory},
    domain::BuildResult,
    services::FailureStreakTracker,
};
use rstest::rstest;

use super::helpers::build;

const STREAK_EXPORT: &str = r#"{
  "builds": [
    { "number": 1, "result": "SUCCESS" },
    { "number": 2, "result": "FAILURE", "previous": 1 },
    { "number": 3, "result": "UNSTABLE", "previous": 2 },
    { "number": 4, "result": "FAILURE", "previous": 3 }
  ]
}"#;

#[rstest]
fn streak_after_success_starts_at_first_failure() -> Result<(), eyre::Report> {
    let history = InMemoryBuildHistory::from_json(STREAK_EXPORT)?;
    let tracker = FailureStreakTracker::new(&history);

    let first = tracker.first_failure_of(build(&history, 4)?);

    assert_eq!(first.number().value(), 2);
    assert_eq!(first.result(), BuildResult::Failure);
    Ok(())
}

#[rstest]
fn lone_failing_build_is_its_own_first_failure() -> Result<(), eyre::Report> {
    let history =
        InMemoryBuildHistory::from_json(r#"{"builds": [{"number": 1, "result": "FAILURE"}]}"#)?;

    let first = FailureStreakTracker::new(&history).first_failure_of(build(&history, 1)?);

    assert_eq!(first.number().value(), 1);
    Ok(())
}

#[rstest]
fn pruned_predecessor_ends_the_walk() -> Result<(), eyre::Report> {
    let history = InMemoryBuildHistory::from_json(
        r#"{"builds": [
            {"number": 7, "result": "FAILURE", "previous": 6},
            {"number": 8, "result": "FAILURE", "previous": 7}
        ]}"#,
    )?;

    let first = FailureStreakTracker::new(&history).first_failure_of(build(&history, 8)?);

    assert_eq!(first.number().value(), 7);
    Ok(())
}

#[rstest]
fn looping_history_terminates() -> Result<(), eyre::Report> {
    let history = InMemoryBuildHistory::from_json(
        r#"{"builds": [
            {"number": 5, "result": "FAILURE", "previous": 6},
            {"number": 6, "result": "FAILURE", "previous": 5}
        ]}"#,
    )?;
    let tracker = FailureStreakTracker::new(&history);

    let first = tracker.first_failure_of(build(&history, 6)?);

    assert_eq!(first.number().value(), 5);
    assert_eq!(tracker.ancestors(build(&history, 5)?).count(), 0);
    Ok(())
}

#[rstest]
fn malformed_export_is_rejected() {
    let result = InMemoryBuildHistory::from_json(r#"{"builds": [{"number": 0, "result": "SUCCESS"}]}"#);

    assert!(matches!(result, Err(BuildHistoryLoadError::Malformed(_))));
}
