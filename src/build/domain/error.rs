//! Error types for build domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing build domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildDomainError {
    /// The build number is not a positive integer.
    #[error("invalid build number {0}, expected a positive integer")]
    InvalidBuildNumber(u32),

    /// The build result text is not one the CI host reports.
    #[error("unknown build result: {0}")]
    UnknownBuildResult(String),

    /// More tests failed than were run.
    #[error("failed test count {failed} exceeds total test count {total}")]
    InvalidTestTotals {
        /// Total number of test cases.
        total: u32,
        /// Number of failed test cases.
        failed: u32,
    },
}
