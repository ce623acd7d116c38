//! Configuration validation errors.

use thiserror::Error;

/// Errors returned while validating notifier settings.
///
/// The display text of each variant is the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The hostname is empty.
    #[error("Hostname must not be empty")]
    EmptyHostname,

    /// The port is not an integer.
    #[error("Port must be an integer")]
    PortNotInteger(String),

    /// The port is outside the TCP port range.
    #[error("Port must be between 1 and 65535")]
    PortOutOfRange(u64),

    /// A required credential is empty.
    #[error("{0} must not be empty")]
    MissingSetting(&'static str),

    /// The target is neither a positive app id nor an http(s) space URL.
    #[error("App id or space URL must be a positive integer or an http(s) URL, got '{0}'")]
    InvalidTarget(String),

    /// The failure policy name is unknown.
    #[error("Failure policy must be 'log-and-continue' or 'fail-build', got '{0}'")]
    InvalidFailurePolicy(String),

    /// The task text template does not compile.
    #[error("Task text template is invalid: {0}")]
    InvalidTaskTemplate(String),

    /// A boolean setting could not be parsed.
    #[error("{name} must be 'true' or 'false', got '{value}'")]
    InvalidFlag {
        /// Setting name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}
