//! Adapter implementations for build history ports.

pub mod memory;
