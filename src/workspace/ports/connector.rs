//! Construction of workspace clients for candidate settings.

use super::{WorkspaceClient, WorkspaceClientResult};
use crate::config::{ApiEndpoint, OAuthCredentials};

/// Builds workspace clients for an endpoint and credentials.
///
/// Connection checks run against settings that are not yet saved, so they
/// cannot reuse the notifier's configured client.
pub trait WorkspaceConnector: Send + Sync {
    /// Client type produced by the connector.
    type Client: WorkspaceClient;

    /// Creates a client; no remote call is made.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the client cannot be initialized.
    fn connect(
        &self,
        endpoint: &ApiEndpoint,
        credentials: OAuthCredentials,
    ) -> WorkspaceClientResult<Self::Client>;
}
