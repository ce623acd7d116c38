//! Connection checks for settings that are being edited.

use std::fmt;

use tracing::debug;

use crate::config::{NotifierSettings, OAuthCredentials, WorkspaceTarget};
use crate::workspace::ports::{WorkspaceClient, WorkspaceConnector};

/// Outcome of a settings check, shown next to the checked setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValidation {
    /// The check passed.
    Ok(String),
    /// The check failed.
    Error(String),
}

impl FormValidation {
    /// Returns `true` when the check passed.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns the message shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Ok(message) | Self::Error(message) => message,
        }
    }
}

impl fmt::Display for FormValidation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.message())
    }
}

/// Checks API reachability and credentials before settings are saved.
#[derive(Debug, Clone)]
pub struct ConnectionValidator<K> {
    connector: K,
}

impl<K: WorkspaceConnector> ConnectionValidator<K> {
    /// Creates a validator that opens clients through `connector`.
    #[must_use]
    pub const fn new(connector: K) -> Self {
        Self { connector }
    }

    /// Checks that an API answers at `hostname`, `port` and `ssl`.
    ///
    /// No credentials are needed: only the public status endpoint is
    /// queried.
    pub async fn validate_api(&self, hostname: &str, port: &str, ssl: bool) -> FormValidation {
        let settings = NotifierSettings {
            hostname: hostname.to_owned(),
            port: port.to_owned(),
            ssl,
            ..NotifierSettings::default()
        };
        let endpoint = match settings.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => return FormValidation::Error(err.to_string()),
        };
        let anonymous = OAuthCredentials {
            client_id: String::new(),
            client_secret: String::new(),
            username: String::new(),
            password: String::new(),
        };
        let reply = match self.connector.connect(&endpoint, anonymous) {
            Ok(client) => client.system_status().await,
            Err(err) => Err(err),
        };
        match reply {
            Ok(status) => FormValidation::Ok(format!(
                "Connection validated, running API version {}",
                status.version
            )),
            Err(err) => {
                debug!(base_url = %endpoint.base_url(), error = %err, "API status check failed");
                FormValidation::Error("Invalid hostname, port or ssl".to_owned())
            }
        }
    }

    /// Checks credentials by resolving the configured target.
    pub async fn validate_auth(&self, settings: &NotifierSettings) -> FormValidation {
        let config = match settings.validate() {
            Ok(config) => config,
            Err(err) => return FormValidation::Error(err.to_string()),
        };
        let client = match self.connector.connect(&config.endpoint, config.credentials) {
            Ok(client) => client,
            Err(err) => return FormValidation::Error(err.to_string()),
        };

        match &config.target {
            WorkspaceTarget::SpaceUrl(url) => match client.get_space_by_url(url).await {
                Ok(space) => FormValidation::Ok(format!(
                    "Connection ok, using space {} in organization {}",
                    space.name, space.organization_name
                )),
                Err(err) if err.is_not_found() => {
                    FormValidation::Error(format!("No space found with the URL {url}"))
                }
                Err(err) => invalid_credentials(&err),
            },
            WorkspaceTarget::App(app_id) => match client.get_app(*app_id).await {
                Ok(app) => FormValidation::Ok(format!(
                    "Connection ok, using app {} in space {}",
                    app.id, app.space_id
                )),
                Err(err) if err.is_not_found() => {
                    FormValidation::Error(format!("No app found with the id {app_id}"))
                }
                Err(err) => invalid_credentials(&err),
            },
        }
    }
}

fn invalid_credentials(err: &impl fmt::Display) -> FormValidation {
    debug!(error = %err, "credential check failed");
    FormValidation::Error("Invalid username or password".to_owned())
}
