//! One item per build, keyed by build number.

use std::sync::Arc;

use tracing::{debug, info};

use crate::build::domain::BuildNumber;
use crate::workspace::{
    domain::{AppId, ExternalKey, ItemField, ItemId},
    ports::{WorkspaceClient, WorkspaceClientResult},
};

/// Keeps a single item per build in the target application.
///
/// Items are found by their external key before anything is created, so
/// notifying the same build twice leaves one item behind.
pub struct ItemSynchronizer<W: ?Sized> {
    client: Arc<W>,
}

impl<W: WorkspaceClient + ?Sized> ItemSynchronizer<W> {
    /// Creates a synchronizer backed by `client`.
    #[must_use]
    pub const fn new(client: Arc<W>) -> Self {
        Self { client }
    }

    /// Looks up the item of a build without creating one.
    ///
    /// A lookup matching zero or several items counts as not found.
    ///
    /// # Errors
    ///
    /// Propagates workspace client failures.
    pub async fn find_item(
        &self,
        app_id: AppId,
        number: BuildNumber,
    ) -> WorkspaceClientResult<Option<ItemId>> {
        let key = ExternalKey::from(number);
        let lookup = self.client.find_items_by_external_id(app_id, &key).await?;
        debug!(%app_id, build = %number, filtered = lookup.filtered, "looked up build item");
        Ok(lookup.unique_item())
    }

    /// Returns the item of a build, creating it silently with `fields` when
    /// it does not exist yet.
    ///
    /// # Errors
    ///
    /// Propagates workspace client failures.
    pub async fn sync_item(
        &self,
        app_id: AppId,
        number: BuildNumber,
        fields: &[ItemField],
    ) -> WorkspaceClientResult<ItemId> {
        if let Some(item_id) = self.find_item(app_id, number).await? {
            debug!(%item_id, build = %number, "build item already exists");
            return Ok(item_id);
        }
        self.create(app_id, number, fields).await
    }

    /// Re-posts a build: updates its item in place, or creates it when
    /// absent.
    ///
    /// # Errors
    ///
    /// Propagates workspace client failures.
    pub async fn repost(
        &self,
        app_id: AppId,
        number: BuildNumber,
        create_fields: &[ItemField],
        update_fields: &[ItemField],
    ) -> WorkspaceClientResult<ItemId> {
        let Some(item_id) = self.find_item(app_id, number).await? else {
            return self.create(app_id, number, create_fields).await;
        };
        self.client.update_item(item_id, update_fields, true).await?;
        info!(%item_id, build = %number, "updated build item");
        Ok(item_id)
    }

    async fn create(
        &self,
        app_id: AppId,
        number: BuildNumber,
        fields: &[ItemField],
    ) -> WorkspaceClientResult<ItemId> {
        let key = ExternalKey::from(number);
        let item_id = self.client.create_item(app_id, &key, fields, true).await?;
        info!(%app_id, %item_id, build = %number, "created build item");
        Ok(item_id)
    }
}
