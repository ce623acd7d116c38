//! Given steps for build notification BDD scenarios.

use super::world::{APP, NotificationWorld, SPACE};
use podio_notifier::build::{
    adapters::memory::InMemoryBuildHistory,
    domain::{BuildNumber, BuildParticipant, BuildRecord, BuildResult, ChangeEntry},
};
use podio_notifier::workspace::domain::{AppSummary, ProfileId, UserId};
use rstest_bdd_macros::given;

fn register_app(world: &NotificationWorld) -> Result<(), eyre::Report> {
    world.workspace.add_app(AppSummary {
        id: APP,
        space_id: SPACE,
    })?;
    Ok(())
}

#[given("a workspace where alice and bob are contacts")]
fn workspace_with_contacts(world: &mut NotificationWorld) -> Result<(), eyre::Report> {
    register_app(world)?;
    world
        .workspace
        .add_contact(SPACE, "alice@example.com", UserId::new(100), ProfileId::new(200))?;
    world
        .workspace
        .add_contact(SPACE, "bob@example.com", UserId::new(101), ProfileId::new(201))?;
    Ok(())
}

#[given("a workspace without contacts")]
fn workspace_without_contacts(world: &mut NotificationWorld) -> Result<(), eyre::Report> {
    register_app(world)
}

#[given("a workspace without the target application")]
fn workspace_without_app(world: &mut NotificationWorld) {
    let _ = world;
}

#[given(r#"a job history "{results}""#)]
fn job_history(world: &mut NotificationWorld, results: String) -> Result<(), eyre::Report> {
    let mut history = InMemoryBuildHistory::new();
    for (number, text) in (1_u32..).zip(results.split(',')) {
        let result = BuildResult::try_from(text)?;
        let mut build = BuildRecord::new(BuildNumber::new(number)?, result)
            .with_url(format!("https://ci.example/job/app/{number}/"))
            .with_culprits([BuildParticipant::new("Alice").with_email("alice@example.com")])
            .with_changes([ChangeEntry::new(
                BuildParticipant::new("Bob").with_email("bob@example.com"),
                format!("Change for build {number}"),
            )]);
        if number > 1 {
            build = build.with_previous(BuildNumber::new(number - 1)?);
        }
        history.insert(build);
    }
    world.history = history;
    Ok(())
}
