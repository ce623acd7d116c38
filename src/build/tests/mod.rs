//! Unit tests for the build history context.
