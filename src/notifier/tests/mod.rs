//! Unit tests for the notifier services.

mod support;
