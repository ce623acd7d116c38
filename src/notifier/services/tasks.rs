//! Opening and closing "fix the build" tasks across result transitions.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use super::ItemSynchronizer;
use crate::build::{
    domain::{BuildRecord, BuildResult},
    ports::BuildHistory,
    services::FailureStreakTracker,
};
use crate::config::{TaskTextContext, TaskTextTemplate};
use crate::notifier::{NotifierError, NotifierResult};
use crate::workspace::{
    domain::{AppId, ItemId, NewTask, RemoteIdentity, TaskId},
    ports::WorkspaceClient,
};

/// Change of a job's state between two consecutive builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Neither build succeeded.
    StillFailing,
    /// Both builds succeeded.
    StillPassing,
    /// The job succeeded after failing.
    Recovered,
    /// The job stopped succeeding.
    Regressed,
}

impl Transition {
    /// Classifies a build result against its predecessor's.
    ///
    /// A failing first build, with no predecessor, counts as a regression.
    #[must_use]
    pub const fn classify(previous: Option<BuildResult>, current: BuildResult) -> Self {
        let was_passing = !matches!(previous, Some(result) if !result.is_success());
        match (was_passing, current.is_success()) {
            (true, true) => Self::StillPassing,
            (true, false) => Self::Regressed,
            (false, true) => Self::Recovered,
            (false, false) => Self::StillFailing,
        }
    }
}

/// Inputs for handling one build's transition.
#[derive(Debug)]
pub struct TransitionContext<'a, H: ?Sized> {
    /// History the builds belong to.
    pub history: &'a H,
    /// Application holding the build items.
    pub app_id: AppId,
    /// Build preceding `current`, when the host still retains it.
    pub previous: Option<&'a BuildRecord>,
    /// Build that just completed.
    pub current: &'a BuildRecord,
    /// Item already synchronized for `current`.
    pub current_item: ItemId,
    /// People responsible for `current`.
    pub identities: &'a [RemoteIdentity],
}

/// Tasks touched by one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLifecycleOutcome {
    /// Transition that was handled.
    pub transition: Transition,
    /// Tasks opened for the current build.
    pub created: Vec<TaskId>,
    /// Tasks completed on recovery.
    pub completed: Vec<TaskId>,
}

impl TaskLifecycleOutcome {
    const fn untouched(transition: Transition) -> Self {
        Self {
            transition,
            created: Vec::new(),
            completed: Vec::new(),
        }
    }
}

/// Opens tasks when a job breaks and closes them when it recovers.
pub struct TaskLifecycleManager<W: ?Sized, C> {
    client: Arc<W>,
    items: ItemSynchronizer<W>,
    clock: Arc<C>,
    template: TaskTextTemplate,
}

impl<W, C> TaskLifecycleManager<W, C>
where
    W: WorkspaceClient + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a manager rendering task text with `template`.
    #[must_use]
    pub fn new(client: Arc<W>, clock: Arc<C>, template: TaskTextTemplate) -> Self {
        Self {
            items: ItemSynchronizer::new(Arc::clone(&client)),
            client,
            clock,
            template,
        }
    }

    /// Acts on the transition from the previous build to the current one.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when a workspace call fails or the task
    /// text cannot be rendered. Tasks handled before the failure stay as
    /// they are.
    pub async fn on_transition<H>(
        &self,
        context: TransitionContext<'_, H>,
    ) -> NotifierResult<TaskLifecycleOutcome>
    where
        H: BuildHistory + Sync + ?Sized,
    {
        let TransitionContext {
            history,
            app_id,
            previous,
            current,
            current_item,
            identities,
        } = context;
        let transition = Transition::classify(previous.map(BuildRecord::result), current.result());
        debug!(build = %current.number(), ?transition, "classified build transition");
        match (transition, previous) {
            (Transition::Recovered, Some(failed)) => {
                let completed = self.close_streak(history, app_id, failed).await?;
                Ok(TaskLifecycleOutcome {
                    completed,
                    ..TaskLifecycleOutcome::untouched(transition)
                })
            }
            (Transition::Regressed, _) => {
                let created = self.open_tasks(current, current_item, identities).await?;
                Ok(TaskLifecycleOutcome {
                    created,
                    ..TaskLifecycleOutcome::untouched(transition)
                })
            }
            _ => Ok(TaskLifecycleOutcome::untouched(transition)),
        }
    }

    async fn close_streak<H>(
        &self,
        history: &H,
        app_id: AppId,
        last_failure: &BuildRecord,
    ) -> NotifierResult<Vec<TaskId>>
    where
        H: BuildHistory + Sync + ?Sized,
    {
        let first_failure = FailureStreakTracker::new(history).first_failure_of(last_failure);
        let Some(item_id) = self.items.find_item(app_id, first_failure.number()).await? else {
            debug!(build = %first_failure.number(), "first failing build has no item; nothing to close");
            return Ok(Vec::new());
        };

        let mut completed = Vec::new();
        for task in self.client.tasks_referencing_item(item_id).await? {
            if !task.is_active() {
                continue;
            }
            self.client.complete_task(task.id).await?;
            info!(task_id = %task.id, %item_id, "completed fix-the-build task");
            completed.push(task.id);
        }
        Ok(completed)
    }

    async fn open_tasks(
        &self,
        build: &BuildRecord,
        item_id: ItemId,
        identities: &[RemoteIdentity],
    ) -> NotifierResult<Vec<TaskId>> {
        if identities.is_empty() {
            debug!(build = %build.number(), "no resolved participants; no task opened");
            return Ok(Vec::new());
        }
        let text = self.task_text(build)?;
        let due_date = self.clock.utc().date_naive();

        let mut created = Vec::with_capacity(identities.len());
        for identity in identities {
            let task = NewTask {
                text: text.clone(),
                due_date,
                responsible: identity.user_id(),
                reference_item: item_id,
            };
            let task_id = self.client.create_task(&task).await?;
            info!(%task_id, user_id = %identity.user_id(), %item_id, "opened fix-the-build task");
            created.push(task_id);
        }
        Ok(created)
    }

    fn task_text(&self, build: &BuildRecord) -> NotifierResult<String> {
        let totals = build.test_totals();
        let context = TaskTextContext {
            number: build.number().value(),
            result: build.result().display_text().to_lowercase(),
            failed_tests: totals.map(|value| value.failed()),
            total_tests: totals.map(|value| value.total()),
        };
        self.template
            .render(&context)
            .map_err(|error| NotifierError::TaskText {
                number: build.number(),
                reason: error.to_string(),
            })
    }
}
