//! Remote collaboration workspace (Podio) model and client.
//!
//! The workspace holds one item per build and the "fix the build" tasks
//! that reference those items. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
