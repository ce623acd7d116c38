//! Step definitions for build notification scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
