//! Backward traversal of a job's build history.

use tracing::{debug, warn};

use crate::build::{domain::BuildRecord, ports::BuildHistory};

/// Lazy iterator over the ancestors of a build, newest first.
///
/// The starting build itself is not yielded. Iteration stops at the root of
/// the history, at a predecessor the host no longer retains, or at a
/// predecessor whose number is not lower than its successor's, so a corrupt
/// history cannot loop.
#[derive(Debug)]
pub struct Ancestors<'h, H: BuildHistory + ?Sized> {
    history: &'h H,
    cursor: Option<&'h BuildRecord>,
}

impl<'h, H: BuildHistory + ?Sized> Ancestors<'h, H> {
    /// Creates an iterator starting after `build`.
    #[must_use]
    pub const fn new(history: &'h H, build: &'h BuildRecord) -> Self {
        Self {
            history,
            cursor: Some(build),
        }
    }
}

impl<'h, H: BuildHistory + ?Sized> Iterator for Ancestors<'h, H> {
    type Item = &'h BuildRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;
        let previous_number = current.previous()?;
        let Some(previous) = self.history.find(previous_number) else {
            debug!(
                build = %current.number(),
                previous = %previous_number,
                "predecessor no longer retained; treating build as root"
            );
            return None;
        };
        if previous.number() >= current.number() {
            warn!(
                build = %current.number(),
                previous = %previous.number(),
                "predecessor number does not precede build; stopping history walk"
            );
            return None;
        }
        self.cursor = Some(previous);
        Some(previous)
    }
}

/// Locates the first build of a failure streak.
#[derive(Debug)]
pub struct FailureStreakTracker<'h, H: BuildHistory + ?Sized> {
    history: &'h H,
}

impl<'h, H: BuildHistory + ?Sized> FailureStreakTracker<'h, H> {
    /// Creates a tracker over a job's history.
    #[must_use]
    pub const fn new(history: &'h H) -> Self {
        Self { history }
    }

    /// Returns the ancestors of `build`, newest first.
    #[must_use]
    pub const fn ancestors(&self, build: &'h BuildRecord) -> Ancestors<'h, H> {
        Ancestors::new(self.history, build)
    }

    /// Returns the earliest build of the failure streak ending at `build`.
    ///
    /// Walks predecessors while they are also unsuccessful and returns the
    /// last one visited. A build without a predecessor is its own first
    /// failure. A successful `build` ends no streak and is returned as is.
    #[must_use]
    pub fn first_failure_of(&self, build: &'h BuildRecord) -> &'h BuildRecord {
        if build.result().is_success() {
            return build;
        }
        self.ancestors(build)
            .take_while(|ancestor| !ancestor.result().is_success())
            .last()
            .unwrap_or(build)
    }
}
