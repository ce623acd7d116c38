//! In-memory build history, optionally loaded from a JSON export.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::build::{
    domain::{BuildNumber, BuildRecord},
    ports::BuildHistory,
};

/// Errors returned while loading a build history export.
#[derive(Debug, Error)]
pub enum BuildHistoryLoadError {
    /// The export is not valid JSON or does not describe builds.
    #[error("malformed build history: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two builds in the export share a number.
    #[error("duplicate build number {0} in build history")]
    DuplicateBuild(BuildNumber),
}

#[derive(Deserialize)]
struct BuildHistoryExport {
    builds: Vec<BuildRecord>,
}

/// Build history held in memory, keyed by build number.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBuildHistory {
    builds: BTreeMap<BuildNumber, BuildRecord>,
}

impl InMemoryBuildHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history from builds, later duplicates replacing earlier
    /// ones.
    #[must_use]
    pub fn from_builds(builds: impl IntoIterator<Item = BuildRecord>) -> Self {
        let mut history = Self::new();
        for build in builds {
            history.insert(build);
        }
        history
    }

    /// Parses a JSON export of the form `{"builds": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildHistoryLoadError`] when the JSON is malformed or two
    /// builds share a number.
    pub fn from_json(json: &str) -> Result<Self, BuildHistoryLoadError> {
        let export: BuildHistoryExport = serde_json::from_str(json)?;
        let mut history = Self::new();
        for build in export.builds {
            let number = build.number();
            if history.builds.contains_key(&number) {
                return Err(BuildHistoryLoadError::DuplicateBuild(number));
            }
            history.insert(build);
        }
        Ok(history)
    }

    /// Inserts or replaces a build.
    pub fn insert(&mut self, build: BuildRecord) {
        self.builds.insert(build.number(), build);
    }

    /// Returns the most recent build, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&BuildRecord> {
        self.builds.values().next_back()
    }

    /// Returns the number of retained builds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builds.len()
    }

    /// Returns `true` when no builds are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}

impl BuildHistory for InMemoryBuildHistory {
    fn find(&self, number: BuildNumber) -> Option<&BuildRecord> {
        self.builds.get(&number)
    }
}
