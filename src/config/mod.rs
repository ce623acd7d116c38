//! Notifier configuration.
//!
//! Raw settings arrive as loosely typed strings (from a host form or the
//! environment) and are validated once into a [`NotifierConfig`], which is
//! passed explicitly to the notifier. Validation failures carry the
//! user-facing message shown next to the offending setting; they are never
//! raised during a build run.

mod error;
mod notifier;
mod settings;
mod template;

pub use error::ConfigError;
pub use notifier::{ApiEndpoint, NotifierConfig, OAuthCredentials, RemoteFailurePolicy, WorkspaceTarget};
pub use settings::NotifierSettings;
pub use template::{TaskTextContext, TaskTextTemplate};

#[cfg(test)]
mod tests;
