//! Unit tests for notifier configuration.
