//! Podio REST adapter for the workspace port.

mod client;
mod wire;

pub use client::{RestConnector, RestWorkspaceClient};
