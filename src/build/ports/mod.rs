//! Port contracts for build history access.
//!
//! Ports define infrastructure-agnostic interfaces used by build services.

pub mod history;

pub use history::BuildHistory;
