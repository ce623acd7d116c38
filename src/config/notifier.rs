//! Validated notifier configuration.

use super::{ConfigError, TaskTextTemplate};
use crate::workspace::domain::AppId;
use std::fmt;

/// Location of the workspace API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    hostname: String,
    port: u16,
    ssl: bool,
}

impl ApiEndpoint {
    /// Creates an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyHostname`] when the hostname is blank or
    /// [`ConfigError::PortOutOfRange`] for port zero.
    pub fn new(hostname: impl Into<String>, port: u16, ssl: bool) -> Result<Self, ConfigError> {
        let raw_hostname = hostname.into();
        let trimmed = raw_hostname.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyHostname);
        }
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(0));
        }
        Ok(Self {
            hostname: trimmed.to_owned(),
            port,
            ssl,
        })
    }

    /// Returns the hostname.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Returns the TCP port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether TLS is used.
    #[must_use]
    pub const fn ssl(&self) -> bool {
        self.ssl
    }

    /// Returns the base URL, such as `https://api.podio.com:443`.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.hostname, self.port)
    }
}

/// OAuth client and user credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Workspace user name.
    pub username: String,
    /// Workspace user password.
    pub password: String,
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where build items are posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceTarget {
    /// A specific application; its space is looked up from the app.
    App(AppId),
    /// A space URL; items go to the first application of the space.
    SpaceUrl(String),
}

impl WorkspaceTarget {
    /// Parses a positive application id or an http(s) space URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTarget`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if let Ok(app_id) = trimmed.parse::<u64>() {
            if app_id == 0 {
                return Err(ConfigError::InvalidTarget(raw.to_owned()));
            }
            return Ok(Self::App(AppId::new(app_id)));
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Self::SpaceUrl(trimmed.to_owned()));
        }
        Err(ConfigError::InvalidTarget(raw.to_owned()))
    }
}

/// What to do when the workspace cannot be reached during a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoteFailurePolicy {
    /// Log the failure and report the notification as abandoned, leaving
    /// the build result untouched.
    #[default]
    LogAndContinue,
    /// Surface the failure to the CI host so the build step fails.
    FailBuild,
}

impl RemoteFailurePolicy {
    /// Returns the setting value naming this policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LogAndContinue => "log-and-continue",
            Self::FailBuild => "fail-build",
        }
    }
}

impl TryFrom<&str> for RemoteFailurePolicy {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "log-and-continue" => Ok(Self::LogAndContinue),
            "fail-build" => Ok(Self::FailBuild),
            _ => Err(ConfigError::InvalidFailurePolicy(value.to_owned())),
        }
    }
}

/// Complete notifier configuration, passed to the notifier at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Workspace API location.
    pub endpoint: ApiEndpoint,
    /// OAuth credentials.
    pub credentials: OAuthCredentials,
    /// Application or space receiving build items.
    pub target: WorkspaceTarget,
    /// Behaviour on workspace failures.
    pub failure_policy: RemoteFailurePolicy,
    /// Template for regression task text.
    pub task_template: TaskTextTemplate,
}
