//! In-memory build history adapters.

mod history;

pub use history::{BuildHistoryLoadError, InMemoryBuildHistory};
