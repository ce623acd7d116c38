//! Remote identities of build participants.

use super::{ProfileId, UserId};
use serde::{Deserialize, Serialize};

/// Contact returned by a space contact lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactSummary {
    /// User account of the contact.
    pub user_id: UserId,
    /// Contact profile of the contact.
    pub profile_id: ProfileId,
}

/// A build participant resolved to a remote user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteIdentity {
    user_id: UserId,
    profile_id: ProfileId,
    email: String,
}

impl RemoteIdentity {
    /// Creates an identity from a contact matched by `email`.
    #[must_use]
    pub fn from_contact(contact: ContactSummary, email: impl Into<String>) -> Self {
        Self {
            user_id: contact.user_id,
            profile_id: contact.profile_id,
            email: email.into(),
        }
    }

    /// Returns the user account identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the contact profile identifier.
    #[must_use]
    pub const fn profile_id(&self) -> ProfileId {
        self.profile_id
    }

    /// Returns the e-mail address the identity was resolved from.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
