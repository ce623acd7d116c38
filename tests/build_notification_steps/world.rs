//! Shared world state for build notification BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use podio_notifier::build::adapters::memory::InMemoryBuildHistory;
use podio_notifier::config::NotifierSettings;
use podio_notifier::notifier::{NotificationReport, services::BuildNotifier};
use podio_notifier::workspace::{
    adapters::memory::InMemoryWorkspace,
    domain::{AppId, SpaceId},
};
use rstest::fixture;

/// Application receiving build items.
pub const APP: AppId = AppId::new(10);
/// Space owning the application and its contacts.
pub const SPACE: SpaceId = SpaceId::new(1);

/// Notifier type used by the BDD world.
pub type TestNotifier = BuildNotifier<InMemoryWorkspace, DefaultClock>;

/// Scenario world for build notification behaviour tests.
pub struct NotificationWorld {
    pub workspace: InMemoryWorkspace,
    pub history: InMemoryBuildHistory,
    pub reports: Vec<NotificationReport>,
}

impl NotificationWorld {
    /// Creates a world with an empty workspace and history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workspace: InMemoryWorkspace::new(),
            history: InMemoryBuildHistory::new(),
            reports: Vec::new(),
        }
    }

    /// Builds a notifier posting to [`APP`] with default settings.
    pub fn notifier(&self) -> Result<TestNotifier, eyre::Report> {
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
            Arc::new(self.workspace.clone()),
            Arc::new(DefaultClock),
        ))
    }
}

impl Default for NotificationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> NotificationWorld {
    NotificationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
