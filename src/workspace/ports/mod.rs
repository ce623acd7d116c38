//! Port contracts for the remote workspace.
//!
//! Ports define infrastructure-agnostic interfaces used by notifier
//! services.

pub mod client;
pub mod connector;

pub use client::{WorkspaceClient, WorkspaceClientError, WorkspaceClientResult};
pub use connector::WorkspaceConnector;
