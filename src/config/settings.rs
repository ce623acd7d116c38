//! Raw notifier settings and their validation.

use super::{
    ApiEndpoint, ConfigError, NotifierConfig, OAuthCredentials, RemoteFailurePolicy,
    TaskTextTemplate, WorkspaceTarget,
};
use serde::Deserialize;

const DEFAULT_HOSTNAME: &str = "localhost";
const DEFAULT_PORT: &str = "9090";

/// Unvalidated settings as entered by a user.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotifierSettings {
    /// API hostname.
    pub hostname: String,
    /// API port, as text.
    pub port: String,
    /// Whether TLS is used.
    pub ssl: bool,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Workspace user name.
    pub username: String,
    /// Workspace user password.
    pub password: String,
    /// Positive application id or space URL.
    #[serde(rename = "appIdOrSpaceURL")]
    pub app_id_or_space_url: String,
    /// Failure policy name; defaults to `log-and-continue`.
    pub failure_policy: Option<String>,
    /// Task text template; defaults to the built-in template.
    pub task_template: Option<String>,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_owned(),
            port: DEFAULT_PORT.to_owned(),
            ssl: false,
            client_id: String::new(),
            client_secret: String::new(),
            username: String::new(),
            password: String::new(),
            app_id_or_space_url: String::new(),
            failure_policy: None,
            task_template: None,
        }
    }
}

impl std::fmt::Debug for NotifierSettings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NotifierSettings")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("ssl", &self.ssl)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("app_id_or_space_url", &self.app_id_or_space_url)
            .field("failure_policy", &self.failure_policy)
            .field("task_template", &self.task_template)
            .finish()
    }
}

impl NotifierSettings {
    /// Reads settings from `PODIO_*` environment variables, keeping the
    /// defaults for unset ones.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFlag`] when `PODIO_SSL` is not a
    /// boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, keyed by `PODIO_*` variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFlag`] when `PODIO_SSL` is not a
    /// boolean.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        if let Some(hostname) = lookup("PODIO_HOSTNAME") {
            settings.hostname = hostname;
        }
        if let Some(port) = lookup("PODIO_PORT") {
            settings.port = port;
        }
        if let Some(ssl) = lookup("PODIO_SSL") {
            settings.ssl = parse_flag("PODIO_SSL", &ssl)?;
        }
        settings.client_id = lookup("PODIO_CLIENT_ID").unwrap_or_default();
        settings.client_secret = lookup("PODIO_CLIENT_SECRET").unwrap_or_default();
        settings.username = lookup("PODIO_USERNAME").unwrap_or_default();
        settings.password = lookup("PODIO_PASSWORD").unwrap_or_default();
        settings.app_id_or_space_url = lookup("PODIO_TARGET").unwrap_or_default();
        settings.failure_policy = lookup("PODIO_FAILURE_POLICY");
        settings.task_template = lookup("PODIO_TASK_TEMPLATE");
        Ok(settings)
    }

    /// Validates the API location alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a blank hostname or a bad port.
    pub fn endpoint(&self) -> Result<ApiEndpoint, ConfigError> {
        ApiEndpoint::new(&self.hostname, parse_port(&self.port)?, self.ssl)
    }

    /// Validates every setting.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered, in setting order.
    pub fn validate(&self) -> Result<NotifierConfig, ConfigError> {
        let endpoint = self.endpoint()?;
        let credentials = OAuthCredentials {
            client_id: required("Client id", &self.client_id)?,
            client_secret: required("Client secret", &self.client_secret)?,
            username: required("Username", &self.username)?,
            password: required("Password", &self.password)?,
        };
        let target = WorkspaceTarget::parse(&self.app_id_or_space_url)?;
        let failure_policy = self
            .failure_policy
            .as_deref()
            .map_or(Ok(RemoteFailurePolicy::default()), |policy| {
                RemoteFailurePolicy::try_from(policy)
            })?;
        let task_template = self
            .task_template
            .as_deref()
            .map_or_else(
                || Ok(TaskTextTemplate::default()),
                |source| TaskTextTemplate::new(source),
            )?;

        Ok(NotifierConfig {
            endpoint,
            credentials,
            target,
            failure_policy,
            task_template,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let port = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::PortNotInteger(raw.to_owned()))?;
    u16::try_from(port)
        .ok()
        .filter(|value| *value != 0)
        .ok_or(ConfigError::PortOutOfRange(port))
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: raw.to_owned(),
        }),
    }
}

fn required(name: &'static str, value: &str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingSetting(name));
    }
    Ok(value.to_owned())
}
