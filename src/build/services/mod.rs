//! Services over a job's build history.

mod streak;

pub use streak::{Ancestors, FailureStreakTracker};
