//! Then steps for build notification BDD scenarios.

use super::world::{APP, NotificationWorld};
use podio_notifier::notifier::NotificationReport;
use podio_notifier::workspace::domain::ItemId;
use rstest_bdd_macros::then;

fn item_ids_for(world: &NotificationWorld, number: u32) -> Result<Vec<ItemId>, eyre::Report> {
    let key = number.to_string();
    Ok(world
        .workspace
        .items(APP)?
        .into_iter()
        .filter(|item| item.external_key.as_str() == key)
        .map(|item| item.id)
        .collect())
}

#[then("the workspace holds {count:usize} item for build {number:u32}")]
fn workspace_holds_items(
    world: &NotificationWorld,
    count: usize,
    number: u32,
) -> Result<(), eyre::Report> {
    let items = item_ids_for(world, number)?;
    eyre::ensure!(
        items.len() == count,
        "expected {count} item(s) for build {number}, found {}",
        items.len()
    );
    Ok(())
}

#[then("{count:usize} active tasks reference the item of build {number:u32}")]
fn active_tasks_reference_item(
    world: &NotificationWorld,
    count: usize,
    number: u32,
) -> Result<(), eyre::Report> {
    let items = item_ids_for(world, number)?;
    let item = items
        .first()
        .copied()
        .ok_or_else(|| eyre::eyre!("no item for build {number}"))?;
    let active = world
        .workspace
        .tasks()?
        .iter()
        .filter(|task| task.reference_item == Some(item) && task.is_active())
        .count();
    eyre::ensure!(active == count, "expected {count} active task(s), found {active}");
    Ok(())
}

#[then("no task is active")]
fn no_task_is_active(world: &NotificationWorld) -> Result<(), eyre::Report> {
    let active = world
        .workspace
        .tasks()?
        .iter()
        .filter(|task| task.is_active())
        .count();
    eyre::ensure!(active == 0, "expected no active task, found {active}");
    Ok(())
}

#[then("{count:usize} tasks have been completed")]
fn tasks_have_been_completed(world: &NotificationWorld, count: usize) -> Result<(), eyre::Report> {
    let completed = world.workspace.task_completions()?;
    eyre::ensure!(
        completed == count,
        "expected {count} completion(s), found {completed}"
    );
    Ok(())
}

#[then("the notification is abandoned")]
fn notification_is_abandoned(world: &NotificationWorld) -> Result<(), eyre::Report> {
    let report = world
        .reports
        .last()
        .ok_or_else(|| eyre::eyre!("no notification was attempted"))?;
    eyre::ensure!(
        matches!(report, NotificationReport::Abandoned { .. }),
        "expected an abandoned notification, got {report:?}"
    );
    Ok(())
}
