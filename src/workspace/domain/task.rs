//! Remote tasks referencing build items.

use super::{ItemId, TaskId, UserId, WorkspaceDomainError};
use chrono::NaiveDate;
use std::fmt;

/// Remote task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Task is open.
    Active,
    /// Task has been completed.
    Completed,
}

impl TaskStatus {
    /// Returns the remote wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = WorkspaceDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(WorkspaceDomainError::UnknownTaskStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task as read back from the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTask {
    /// Task identifier.
    pub id: TaskId,
    /// Current status.
    pub status: TaskStatus,
    /// Item the task references, if any.
    pub reference_item: Option<ItemId>,
    /// User responsible for the task, if assigned.
    pub responsible: Option<UserId>,
    /// Task text.
    pub text: String,
    /// Due date, if set.
    pub due_date: Option<NaiveDate>,
}

impl RemoteTask {
    /// Returns `true` while the task is open.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, TaskStatus::Active)
    }
}

/// Request to create a task referencing an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task text.
    pub text: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// User responsible for the task.
    pub responsible: UserId,
    /// Item the task references.
    pub reference_item: ItemId,
}
