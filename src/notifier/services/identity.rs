//! Resolution of build participants to remote users.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::build::domain::BuildParticipant;
use crate::workspace::{
    domain::{RemoteIdentity, SpaceId},
    ports::{WorkspaceClient, WorkspaceClientResult},
};

/// Maps build participants to workspace users by e-mail address.
pub struct IdentityResolver<W: ?Sized> {
    client: Arc<W>,
}

impl<W: WorkspaceClient + ?Sized> IdentityResolver<W> {
    /// Creates a resolver backed by `client`.
    #[must_use]
    pub const fn new(client: Arc<W>) -> Self {
        Self { client }
    }

    /// Resolves one participant within a space.
    ///
    /// Participants without an e-mail address resolve to `None` without a
    /// remote call. When several contacts share the address the first one
    /// returned by the workspace is used.
    ///
    /// # Errors
    ///
    /// Propagates workspace client failures.
    pub async fn resolve(
        &self,
        space_id: SpaceId,
        participant: &BuildParticipant,
    ) -> WorkspaceClientResult<Option<RemoteIdentity>> {
        let Some(email) = participant.email() else {
            debug!(participant = participant.display_name(), "no e-mail address; skipping");
            return Ok(None);
        };
        let contacts = self.client.find_contacts_by_email(space_id, email).await?;
        if contacts.is_empty() {
            debug!(%space_id, email, "no contact matches e-mail address");
        }
        Ok(contacts
            .into_iter()
            .next()
            .map(|contact| RemoteIdentity::from_contact(contact, email)))
    }

    /// Resolves a sequence of participants, in order.
    ///
    /// Each distinct address is looked up once per call and the result is
    /// de-duplicated by user, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Propagates the first workspace client failure.
    pub async fn resolve_all<'p>(
        &self,
        space_id: SpaceId,
        participants: impl IntoIterator<Item = &'p BuildParticipant>,
    ) -> WorkspaceClientResult<Vec<RemoteIdentity>> {
        let mut by_email: HashMap<String, Option<RemoteIdentity>> = HashMap::new();
        let mut seen = HashSet::new();
        let mut identities = Vec::new();

        for participant in participants {
            let Some(email) = participant.email() else {
                continue;
            };
            let cache_key = email.to_lowercase();
            let resolved = match by_email.get(&cache_key) {
                Some(cached) => cached.clone(),
                None => {
                    let fresh = self.resolve(space_id, participant).await?;
                    by_email.insert(cache_key, fresh.clone());
                    fresh
                }
            };
            let Some(identity) = resolved else {
                continue;
            };
            if seen.insert(identity.user_id()) {
                identities.push(identity);
            }
        }
        Ok(identities)
    }
}
