//! When steps for build notification BDD scenarios.

use super::world::{NotificationWorld, run_async};
use eyre::WrapErr;
use podio_notifier::build::{domain::BuildNumber, ports::BuildHistory};
use podio_notifier::notifier::BuildCompletionHandler;
use rstest_bdd_macros::when;

fn notify(world: &mut NotificationWorld, number: u32) -> Result<(), eyre::Report> {
    let notifier = world.notifier()?;
    let build = world
        .history
        .find(BuildNumber::new(number)?)
        .ok_or_else(|| eyre::eyre!("build {number} missing from scenario history"))?;
    let report = run_async(notifier.on_build_completed(&world.history, build))
        .wrap_err_with(|| format!("notify build {number}"))?;
    world.reports.push(report);
    Ok(())
}

#[when("build {number:u32} is notified")]
fn build_is_notified(world: &mut NotificationWorld, number: u32) -> Result<(), eyre::Report> {
    notify(world, number)
}

#[when("builds {first:u32} to {last:u32} are notified in order")]
fn builds_are_notified(
    world: &mut NotificationWorld,
    first: u32,
    last: u32,
) -> Result<(), eyre::Report> {
    for number in first..=last {
        notify(world, number)?;
    }
    Ok(())
}
