//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use podio_notifier::build::{
    adapters::memory::InMemoryBuildHistory,
    domain::{BuildNumber, BuildRecord},
    ports::BuildHistory,
};
use podio_notifier::config::NotifierSettings;
use podio_notifier::notifier::services::BuildNotifier;
use podio_notifier::workspace::{
    adapters::memory::InMemoryWorkspace,
    domain::{AppId, AppSummary, ProfileId, SpaceId, UserId},
};
use rstest::fixture;

/// Application receiving build items.
pub const APP: AppId = AppId::new(10);
/// Space owning the application.
pub const SPACE: SpaceId = SpaceId::new(1);
/// Workspace user of alice@example.com.
pub const ALICE: UserId = UserId::new(100);
/// Workspace user of bob@example.com.
pub const BOB: UserId = UserId::new(101);

/// Notifier type used by the integration tests.
pub type TestNotifier = BuildNotifier<InMemoryWorkspace, DefaultClock>;

/// Provides a workspace with the target app and two contacts.
#[fixture]
pub fn workspace() -> InMemoryWorkspace {
    let workspace = InMemoryWorkspace::new();
    let seeded = workspace
        .add_app(AppSummary {
            id: APP,
            space_id: SPACE,
        })
        .and_then(|()| {
            workspace.add_contact(SPACE, "alice@example.com", ALICE, ProfileId::new(200))
        })
        .and_then(|()| workspace.add_contact(SPACE, "bob@example.com", BOB, ProfileId::new(201)));
    assert!(seeded.is_ok(), "seeding the workspace failed: {seeded:?}");
    workspace
}

/// Creates a notifier posting to [`APP`] through `workspace`.
///
/// # Errors
///
/// Returns an error if the settings do not validate.
pub fn notifier(workspace: &InMemoryWorkspace) -> Result<TestNotifier, eyre::Report> {
    let settings = NotifierSettings {
        client_id: "ci-notifier".to_owned(),
        client_secret: "client-secret".to_owned(),
        username: "ci@example.com".to_owned(),
        password: "hunter2".to_owned(),
        app_id_or_space_url: APP.to_string(),
        ..NotifierSettings::default()
    };
    Ok(BuildNotifier::new(
        settings.validate()?,
        Arc::new(workspace.clone()),
        Arc::new(DefaultClock),
    ))
}

/// Looks a build up by number.
///
/// # Errors
///
/// Returns an error if the number is invalid or the build is missing.
pub fn build(history: &InMemoryBuildHistory, number: u32) -> Result<&BuildRecord, eyre::Report> {
    history
        .find(BuildNumber::new(number)?)
        .ok_or_else(|| eyre::eyre!("build {number} missing from history"))
}
