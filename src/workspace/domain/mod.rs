//! Domain model for remote workspace records.
//!
//! Identifiers are assigned by the remote system; the notifier only ever
//! reads them back and passes them along.

mod error;
mod field;
mod identity;
mod ids;
mod item;
mod space;
mod task;

pub use error::WorkspaceDomainError;
pub use field::{FieldValue, ItemField};
pub use identity::{ContactSummary, RemoteIdentity};
pub use ids::{AppId, ItemId, ProfileId, SpaceId, TaskId, UserId};
pub use item::{ExternalKey, ItemLookup};
pub use space::{AppSummary, SpaceSummary, SystemStatus};
pub use task::{NewTask, RemoteTask, TaskStatus};
