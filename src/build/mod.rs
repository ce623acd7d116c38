//! Continuous-integration build history for a single job.
//!
//! The CI host owns builds; this module only models the read-only view the
//! notifier needs and the backward walk over a job's history:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - History traversal services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
