//! Read-only access to a single job's completed builds.

use crate::build::domain::{BuildNumber, BuildRecord};

/// Build history provider for one job.
///
/// Implementations are read-only views owned by the CI host; the notifier
/// never mutates them.
pub trait BuildHistory {
    /// Finds a build by number.
    ///
    /// Returns `None` when the host no longer retains the build.
    fn find(&self, number: BuildNumber) -> Option<&BuildRecord>;

    /// Returns the build immediately preceding `build`, if the host still
    /// retains it.
    fn previous_of(&self, build: &BuildRecord) -> Option<&BuildRecord> {
        build.previous().and_then(|number| self.find(number))
    }
}
