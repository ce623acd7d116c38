//! End-to-end handling of one completed build.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use super::{
    FieldMapper, IdentityResolver, ItemSynchronizer, TaskLifecycleManager, TaskLifecycleOutcome,
    TransitionContext,
};
use crate::build::{
    domain::{BuildNumber, BuildRecord},
    ports::BuildHistory,
    services::Ancestors,
};
use crate::config::{NotifierConfig, RemoteFailurePolicy, WorkspaceTarget};
use crate::notifier::{BuildCompletionHandler, NotificationReport, NotifierError, NotifierResult};
use crate::workspace::{
    domain::{AppId, ItemId, RemoteIdentity, SpaceId},
    ports::WorkspaceClient,
};

/// Application and space that receive build items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Application holding one item per build.
    pub app_id: AppId,
    /// Space used for contact lookups.
    pub space_id: SpaceId,
}

/// Result of a delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOutcome {
    /// Build that was notified.
    pub build: BuildNumber,
    /// Item holding the build.
    pub item_id: ItemId,
    /// Participants resolved to workspace users.
    pub identities: Vec<RemoteIdentity>,
    /// Tasks opened or closed for the build.
    pub tasks: TaskLifecycleOutcome,
}

/// Posts builds to the workspace and keeps fix-the-build tasks in step.
///
/// One notifier serves one job. Each remote step is awaited in turn; a
/// failure stops the run and leaves earlier steps applied.
pub struct BuildNotifier<W: ?Sized, C> {
    config: NotifierConfig,
    client: Arc<W>,
    identities: IdentityResolver<W>,
    items: ItemSynchronizer<W>,
    tasks: TaskLifecycleManager<W, C>,
}

impl<W, C> BuildNotifier<W, C>
where
    W: WorkspaceClient + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a notifier for the configured workspace target.
    #[must_use]
    pub fn new(config: NotifierConfig, client: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            identities: IdentityResolver::new(Arc::clone(&client)),
            items: ItemSynchronizer::new(Arc::clone(&client)),
            tasks: TaskLifecycleManager::new(
                Arc::clone(&client),
                clock,
                config.task_template.clone(),
            ),
            client,
            config,
        }
    }

    /// Returns the configuration the notifier was built with.
    #[must_use]
    pub const fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Resolves the configured target to an application and its space.
    ///
    /// A space URL target posts to the first application of the space.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::NoApplication`] when the space has no
    /// application, or the workspace client failure.
    pub async fn resolve_target(&self) -> NotifierResult<ResolvedTarget> {
        match &self.config.target {
            WorkspaceTarget::App(app_id) => {
                let app = self.client.get_app(*app_id).await?;
                Ok(ResolvedTarget {
                    app_id: app.id,
                    space_id: app.space_id,
                })
            }
            WorkspaceTarget::SpaceUrl(url) => {
                let space = self.client.get_space_by_url(url).await?;
                let apps = self.client.list_space_apps(space.id).await?;
                let app = apps
                    .first()
                    .ok_or(NotifierError::NoApplication(space.id))?;
                debug!(space_id = %space.id, app_id = %app.id, "resolved space URL to application");
                Ok(ResolvedTarget {
                    app_id: app.id,
                    space_id: space.id,
                })
            }
        }
    }

    /// Notifies the workspace that `build` completed.
    ///
    /// # Errors
    ///
    /// Returns the first [`NotifierError`] encountered.
    pub async fn notify<H>(&self, history: &H, build: &BuildRecord) -> NotifierResult<NotificationOutcome>
    where
        H: BuildHistory + Sync + ?Sized,
    {
        let target = self.resolve_target().await?;
        let identities = self
            .identities
            .resolve_all(target.space_id, build.participants())
            .await?;
        let fields = FieldMapper::create_fields(build, &identities);
        let item_id = self
            .items
            .sync_item(target.app_id, build.number(), &fields)
            .await?;

        let previous = Ancestors::new(history, build).next();
        let tasks = self
            .tasks
            .on_transition(TransitionContext {
                history,
                app_id: target.app_id,
                previous,
                current: build,
                current_item: item_id,
                identities: &identities,
            })
            .await?;
        info!(
            build = %build.number(),
            result = build.result().as_str(),
            %item_id,
            transition = ?tasks.transition,
            created = tasks.created.len(),
            completed = tasks.completed.len(),
            "notified build"
        );
        Ok(NotificationOutcome {
            build: build.number(),
            item_id,
            identities,
            tasks,
        })
    }

    /// Re-posts `build`, refreshing its item's fields or creating the item.
    ///
    /// Tasks are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first [`NotifierError`] encountered.
    pub async fn repost(&self, build: &BuildRecord) -> NotifierResult<ItemId> {
        let target = self.resolve_target().await?;
        let identities = self
            .identities
            .resolve_all(target.space_id, build.participants())
            .await?;
        let item_id = self
            .items
            .repost(
                target.app_id,
                build.number(),
                &FieldMapper::create_fields(build, &identities),
                &FieldMapper::update_fields(build, &identities),
            )
            .await?;
        Ok(item_id)
    }
}

#[async_trait]
impl<W, C> BuildCompletionHandler for BuildNotifier<W, C>
where
    W: WorkspaceClient + ?Sized,
    C: Clock + Send + Sync,
{
    async fn on_build_completed(
        &self,
        history: &(dyn BuildHistory + Sync),
        build: &BuildRecord,
    ) -> Result<NotificationReport, NotifierError> {
        match self.notify(history, build).await {
            Ok(outcome) => Ok(NotificationReport::Delivered(outcome)),
            Err(err) => match self.config.failure_policy {
                RemoteFailurePolicy::FailBuild => Err(err),
                RemoteFailurePolicy::LogAndContinue => {
                    error!(build = %build.number(), error = %err, "workspace notification abandoned");
                    Ok(NotificationReport::Abandoned {
                        reason: err.to_string(),
                    })
                }
            },
        }
    }
}
