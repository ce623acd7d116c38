//! Workspace client port for items, contacts and tasks.

use crate::workspace::domain::{
    AppId, AppSummary, ContactSummary, ExternalKey, ItemField, ItemId, ItemLookup, NewTask,
    RemoteTask, SpaceId, SpaceSummary, SystemStatus, TaskId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workspace client operations.
pub type WorkspaceClientResult<T> = Result<T, WorkspaceClientError>;

/// Remote workspace contract.
///
/// Every call is a single blocking round trip from the caller's point of
/// view; implementations do not retry.
#[async_trait]
pub trait WorkspaceClient: Send + Sync {
    /// Filters an application's items by external key.
    async fn find_items_by_external_id(
        &self,
        app_id: AppId,
        key: &ExternalKey,
    ) -> WorkspaceClientResult<ItemLookup>;

    /// Creates an item with the given external key and fields.
    ///
    /// When `silent` is set the remote does not notify watchers.
    async fn create_item(
        &self,
        app_id: AppId,
        key: &ExternalKey,
        fields: &[ItemField],
        silent: bool,
    ) -> WorkspaceClientResult<ItemId>;

    /// Replaces the given fields of an existing item.
    async fn update_item(
        &self,
        item_id: ItemId,
        fields: &[ItemField],
        silent: bool,
    ) -> WorkspaceClientResult<()>;

    /// Lists contacts of a space whose e-mail matches, in remote order.
    async fn find_contacts_by_email(
        &self,
        space_id: SpaceId,
        email: &str,
    ) -> WorkspaceClientResult<Vec<ContactSummary>>;

    /// Lists tasks referencing an item.
    async fn tasks_referencing_item(&self, item_id: ItemId)
    -> WorkspaceClientResult<Vec<RemoteTask>>;

    /// Marks a task as completed.
    async fn complete_task(&self, task_id: TaskId) -> WorkspaceClientResult<()>;

    /// Creates a task and returns its identifier.
    async fn create_task(&self, task: &NewTask) -> WorkspaceClientResult<TaskId>;

    /// Resolves a space from its URL.
    async fn get_space_by_url(&self, url: &str) -> WorkspaceClientResult<SpaceSummary>;

    /// Fetches an application.
    async fn get_app(&self, app_id: AppId) -> WorkspaceClientResult<AppSummary>;

    /// Lists the applications of a space, in remote order.
    async fn list_space_apps(&self, space_id: SpaceId) -> WorkspaceClientResult<Vec<AppSummary>>;

    /// Reports the remote API status. Does not require authentication.
    async fn system_status(&self) -> WorkspaceClientResult<SystemStatus>;
}

/// Errors returned by workspace client implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkspaceClientError {
    /// The remote rejected the configured credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The remote answered with a non-success HTTP status.
    #[error("workspace API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response could not be decoded.
    #[error("malformed workspace response: {0}")]
    Decode(String),

    /// Connection-level failure.
    #[error("workspace transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkspaceClientError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns `true` when the remote reported that the resource does not
    /// exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
