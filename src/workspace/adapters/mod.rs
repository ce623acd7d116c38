//! Adapter implementations for workspace ports.

pub mod memory;
pub mod rest;
