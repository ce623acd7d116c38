//! Domain model for completed builds.
//!
//! Builds are immutable snapshots handed over by the CI host once a build
//! has finished. The predecessor link is a build number, resolved through a
//! [`crate::build::ports::BuildHistory`] rather than owned.

mod error;
mod number;
mod record;
mod result;

pub use error::BuildDomainError;
pub use number::BuildNumber;
pub use record::{BuildParticipant, BuildRecord, ChangeEntry, TestTotals};
pub use result::BuildResult;
