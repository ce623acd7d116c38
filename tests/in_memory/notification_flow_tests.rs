//! End-to-end notification of a job's builds against the in-memory
//! workspace.

use podio_notifier::build::adapters::memory::InMemoryBuildHistory;
use podio_notifier::notifier::{
    BuildCompletionHandler, NotificationReport,
    services::{FIELD_CHANGES, FIELD_FAILED_TESTS, FIELD_RESULT, FIELD_TOTAL_TESTS, Transition},
};
use podio_notifier::workspace::{adapters::memory::InMemoryWorkspace, domain::ItemField};
use rstest::rstest;

use super::helpers::{ALICE, APP, BOB, build, notifier, workspace};

const JOB_EXPORT: &str = r#"{
  "builds": [
    {
      "number": 1,
      "result": "SUCCESS",
      "url": "https://ci.example/job/app/1/",
      "duration_text": "58 sec",
      "test_totals": { "total": 120, "failed": 0 }
    },
    {
      "number": 2,
      "result": "FAILURE",
      "url": "https://ci.example/job/app/2/",
      "duration_text": "1 min 3 sec",
      "previous": 1,
      "culprits": [{ "display_name": "Alice", "email": "alice@example.com" }],
      "change_entries": [
        {
          "author": { "display_name": "Bob", "email": "bob@example.com" },
          "message": "  Rework the parser  "
        },
        {
          "author": { "display_name": "Mallory" },
          "message": "Drop a test"
        }
      ],
      "test_totals": { "total": 119, "failed": 4 }
    },
    {
      "number": 3,
      "result": "NOT_BUILT",
      "previous": 2,
      "culprits": [{ "display_name": "Alice", "email": "ALICE@example.com" }]
    },
    {
      "number": 4,
      "result": "SUCCESS",
      "previous": 3,
      "culprits": [{ "display_name": "Bob", "email": "bob@example.com" }]
    }
  ]
}"#;

async fn notify_all(
    workspace: &InMemoryWorkspace,
    history: &InMemoryBuildHistory,
) -> Result<Vec<Transition>, eyre::Report> {
    let notifier = notifier(workspace)?;
    let mut transitions = Vec::new();
    for number in 1..=4 {
        let report = notifier
            .on_build_completed(history, build(history, number)?)
            .await?;
        let NotificationReport::Delivered(outcome) = report else {
            return Err(eyre::eyre!("build {number} was not delivered: {report:?}"));
        };
        transitions.push(outcome.tasks.transition);
    }
    Ok(transitions)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn job_lifecycle_opens_and_closes_tasks(
    workspace: InMemoryWorkspace,
) -> Result<(), eyre::Report> {
    let history = InMemoryBuildHistory::from_json(JOB_EXPORT)?;

    let transitions = notify_all(&workspace, &history).await?;

    assert_eq!(
        transitions,
        vec![
            Transition::StillPassing,
            Transition::Regressed,
            Transition::StillFailing,
            Transition::Recovered,
        ]
    );
    let tasks = workspace.tasks()?;
    assert_eq!(
        tasks.iter().map(|task| task.responsible).collect::<Vec<_>>(),
        vec![Some(ALICE), Some(BOB)]
    );
    assert!(tasks.iter().all(|task| !task.is_active()));
    let text = tasks
        .first()
        .map(|task| task.text.as_str())
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    assert_eq!(
        text,
        "Build 2 finished as failure. 4 of 119 test cases failed. Please fix the build."
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn items_carry_build_fields(workspace: InMemoryWorkspace) -> Result<(), eyre::Report> {
    let history = InMemoryBuildHistory::from_json(JOB_EXPORT)?;

    notify_all(&workspace, &history).await?;

    let items = workspace.items(APP)?;
    assert_eq!(items.len(), 4);
    let failing = items
        .iter()
        .find(|item| item.external_key.as_str() == "2")
        .ok_or_else(|| eyre::eyre!("item for build 2 missing"))?;
    assert!(failing.fields.contains(&ItemField::text(FIELD_RESULT, "Failure")));
    assert!(
        failing
            .fields
            .contains(&ItemField::text(FIELD_CHANGES, "Rework the parser\nDrop a test"))
    );
    assert!(failing.fields.contains(&ItemField::number(FIELD_TOTAL_TESTS, 119)));
    assert!(failing.fields.contains(&ItemField::number(FIELD_FAILED_TESTS, 4)));
    let not_built = items
        .iter()
        .find(|item| item.external_key.as_str() == "3")
        .ok_or_else(|| eyre::eyre!("item for build 3 missing"))?;
    assert!(not_built.fields.contains(&ItemField::text(FIELD_RESULT, "Not built")));
    assert!(
        not_built
            .fields
            .iter()
            .all(|field| field.external_id() != FIELD_TOTAL_TESTS)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replaying_the_job_is_idempotent_for_items(
    workspace: InMemoryWorkspace,
) -> Result<(), eyre::Report> {
    let history = InMemoryBuildHistory::from_json(JOB_EXPORT)?;

    notify_all(&workspace, &history).await?;
    let notifier = notifier(&workspace)?;
    notifier
        .on_build_completed(&history, build(&history, 4)?)
        .await?;

    assert_eq!(workspace.item_creations()?, 4);
    assert_eq!(workspace.task_completions()?, 2);
    Ok(())
}
