//! Error types for workspace domain parsing.

use thiserror::Error;

/// Errors returned while interpreting remote workspace values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceDomainError {
    /// The remote reported a task status this client does not know.
    #[error("unknown task status: {0}")]
    UnknownTaskStatus(String),
}
