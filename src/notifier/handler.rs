//! Host-facing contract invoked once per completed build.

use super::{NotifierError, services::NotificationOutcome};
use crate::build::{domain::BuildRecord, ports::BuildHistory};
use async_trait::async_trait;

/// What happened to a notification attempt.
#[derive(Debug)]
pub enum NotificationReport {
    /// The workspace was updated.
    Delivered(NotificationOutcome),
    /// The workspace could not be updated; the failure was logged and the
    /// build result is left alone.
    Abandoned {
        /// Why the notification was abandoned.
        reason: String,
    },
}

impl NotificationReport {
    /// Returns the outcome when the notification was delivered.
    #[must_use]
    pub const fn outcome(&self) -> Option<&NotificationOutcome> {
        match self {
            Self::Delivered(outcome) => Some(outcome),
            Self::Abandoned { .. } => None,
        }
    }
}

/// Adapter seam between a CI host and the notifier.
///
/// Hosts call [`BuildCompletionHandler::on_build_completed`] synchronously
/// after each build of a job finishes, in build order.
#[async_trait]
pub trait BuildCompletionHandler: Send + Sync {
    /// Notifies the workspace about `build`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] only when the configured policy asks for
    /// workspace failures to fail the build.
    async fn on_build_completed(
        &self,
        history: &(dyn BuildHistory + Sync),
        build: &BuildRecord,
    ) -> Result<NotificationReport, NotifierError>;
}
