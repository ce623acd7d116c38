//! Shared builders for notifier tests.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;

use crate::build::{
    adapters::memory::InMemoryBuildHistory,
    domain::{BuildNumber, BuildParticipant, BuildRecord, BuildResult, ChangeEntry},
};
use crate::config::{
    ApiEndpoint, NotifierConfig, OAuthCredentials, RemoteFailurePolicy, TaskTextTemplate,
    WorkspaceTarget,
};
use crate::notifier::services::BuildNotifier;
use crate::workspace::{
    adapters::memory::InMemoryWorkspace,
    domain::{
        AppId, AppSummary, ContactSummary, ExternalKey, ItemField, ItemId, ItemLookup, NewTask,
        ProfileId, RemoteTask, SpaceId, SpaceSummary, SystemStatus, TaskId, UserId,
    },
    ports::{WorkspaceClient, WorkspaceClientError, WorkspaceClientResult},
};

pub(super) const SPACE_URL: &str = "https://podio.example/acme/ci";
pub(super) const SPACE: SpaceId = SpaceId::new(1);
pub(super) const APP: AppId = AppId::new(10);
pub(super) const ALICE_USER: UserId = UserId::new(100);
pub(super) const ALICE_PROFILE: ProfileId = ProfileId::new(200);
pub(super) const BOB_USER: UserId = UserId::new(101);
pub(super) const BOB_PROFILE: ProfileId = ProfileId::new(201);

mock! {
    pub Workspace {}

    #[async_trait]
    impl WorkspaceClient for Workspace {
        async fn find_items_by_external_id(
            &self,
            app_id: AppId,
            key: &ExternalKey,
        ) -> WorkspaceClientResult<ItemLookup>;
        async fn create_item(
            &self,
            app_id: AppId,
            key: &ExternalKey,
            fields: &[ItemField],
            silent: bool,
        ) -> WorkspaceClientResult<ItemId>;
        async fn update_item(
            &self,
            item_id: ItemId,
            fields: &[ItemField],
            silent: bool,
        ) -> WorkspaceClientResult<()>;
        async fn find_contacts_by_email(
            &self,
            space_id: SpaceId,
            email: &str,
        ) -> WorkspaceClientResult<Vec<ContactSummary>>;
        async fn tasks_referencing_item(&self, item_id: ItemId)
        -> WorkspaceClientResult<Vec<RemoteTask>>;
        async fn complete_task(&self, task_id: TaskId) -> WorkspaceClientResult<()>;
        async fn create_task(&self, task: &NewTask) -> WorkspaceClientResult<TaskId>;
        async fn get_space_by_url(&self, url: &str) -> WorkspaceClientResult<SpaceSummary>;
        async fn get_app(&self, app_id: AppId) -> WorkspaceClientResult<AppSummary>;
        async fn list_space_apps(&self, space_id: SpaceId) -> WorkspaceClientResult<Vec<AppSummary>>;
        async fn system_status(&self) -> WorkspaceClientResult<SystemStatus>;
    }
}

pub(super) type InMemoryNotifier = BuildNotifier<InMemoryWorkspace, DefaultClock>;

/// Workspace with one space, one app and contacts for Alice and Bob.
pub(super) fn seeded_workspace() -> Result<InMemoryWorkspace, WorkspaceClientError> {
    let workspace = InMemoryWorkspace::new();
    workspace.add_space(
        SPACE_URL,
        SpaceSummary {
            id: SPACE,
            name: "CI".to_owned(),
            organization_name: "Acme".to_owned(),
        },
    )?;
    workspace.add_app(AppSummary {
        id: APP,
        space_id: SPACE,
    })?;
    workspace.add_contact(SPACE, "alice@example.com", ALICE_USER, ALICE_PROFILE)?;
    workspace.add_contact(SPACE, "bob@example.com", BOB_USER, BOB_PROFILE)?;
    Ok(workspace)
}

pub(super) fn alice() -> BuildParticipant {
    BuildParticipant::new("Alice").with_email("alice@example.com")
}

pub(super) fn bob() -> BuildParticipant {
    BuildParticipant::new("Bob").with_email("bob@example.com")
}

/// Participant with an address unknown to the workspace.
pub(super) fn carol() -> BuildParticipant {
    BuildParticipant::new("Carol").with_email("carol@example.com")
}

/// Build linked to `number - 1`, blamed on Alice with a change by Bob.
pub(super) fn build(number: u32, result: BuildResult) -> Result<BuildRecord, eyre::Report> {
    let mut record = BuildRecord::new(BuildNumber::new(number)?, result)
        .with_url(format!("https://ci.example/job/app/{number}/"))
        .with_duration_text("1 min 2 sec")
        .with_culprits([alice()])
        .with_changes([ChangeEntry::new(bob(), "Tweak parser")]);
    if number > 1 {
        record = record.with_previous(BuildNumber::new(number - 1)?);
    }
    Ok(record)
}

/// Linear history with builds numbered from 1.
pub(super) fn history(results: &[BuildResult]) -> Result<InMemoryBuildHistory, eyre::Report> {
    let mut history = InMemoryBuildHistory::new();
    for (number, result) in (1_u32..).zip(results.iter().copied()) {
        history.insert(build(number, result)?);
    }
    Ok(history)
}

pub(super) fn config(
    target: WorkspaceTarget,
    failure_policy: RemoteFailurePolicy,
) -> Result<NotifierConfig, eyre::Report> {
    Ok(NotifierConfig {
        endpoint: ApiEndpoint::new("localhost", 9090, false)?,
        credentials: OAuthCredentials {
            client_id: "ci-notifier".to_owned(),
            client_secret: "client-secret".to_owned(),
            username: "ci@example.com".to_owned(),
            password: "hunter2".to_owned(),
        },
        target,
        failure_policy,
        task_template: TaskTextTemplate::default(),
    })
}

pub(super) fn in_memory_notifier(
    workspace: &InMemoryWorkspace,
) -> Result<InMemoryNotifier, eyre::Report> {
    Ok(BuildNotifier::new(
        config(WorkspaceTarget::App(APP), RemoteFailurePolicy::LogAndContinue)?,
        Arc::new(workspace.clone()),
        Arc::new(DefaultClock),
    ))
}
