//! Error types for build notification.

use crate::build::domain::BuildNumber;
use crate::workspace::{domain::SpaceId, ports::WorkspaceClientError};
use thiserror::Error;

/// Errors that end a notification attempt.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// A workspace call failed.
    #[error(transparent)]
    Workspace(#[from] WorkspaceClientError),

    /// The configured space has no application to hold build items.
    #[error("space {0} has no application to post build items to")]
    NoApplication(SpaceId),

    /// The task text template failed to render.
    #[error("failed to render task text for build {number}: {reason}")]
    TaskText {
        /// Build the task was for.
        number: BuildNumber,
        /// Renderer message.
        reason: String,
    },
}

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;
