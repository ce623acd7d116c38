//! Identifiers assigned by the remote workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! remote_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a remote identifier.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

remote_id!(
    /// Identifier of an application (the item container) within a space.
    AppId
);
remote_id!(
    /// Identifier of a workspace space.
    SpaceId
);
remote_id!(
    /// Identifier of an item.
    ItemId
);
remote_id!(
    /// Identifier of a task.
    TaskId
);
remote_id!(
    /// Identifier of a user account, used for task responsibility.
    UserId
);
remote_id!(
    /// Identifier of a contact profile, used in contact fields.
    ProfileId
);
