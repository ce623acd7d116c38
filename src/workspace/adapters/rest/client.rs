//! Podio REST client authenticated with the OAuth password grant.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url, header};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;

use super::wire::{
    AppWire, ContactWire, ItemCreatedResponse, ItemsResponse, SpaceWire, StatusWire,
    TaskCreateBody, TaskCreatedResponse, TaskWire, TokenResponse, decode_tasks, encode_fields,
    truncate_for_error,
};
use crate::config::{ApiEndpoint, OAuthCredentials};
use crate::workspace::{
    domain::{
        AppId, AppSummary, ContactSummary, ExternalKey, ItemField, ItemId, ItemLookup, NewTask,
        RemoteTask, SpaceId, SpaceSummary, SystemStatus, TaskId,
    },
    ports::{WorkspaceClient, WorkspaceClientError, WorkspaceClientResult, WorkspaceConnector},
};

const USER_AGENT: &str = "podio-notifier";

/// Workspace client speaking the Podio REST API.
///
/// The access token is fetched on first use and reused for the lifetime of
/// the client; calls are never retried.
pub struct RestWorkspaceClient {
    base_url: String,
    credentials: OAuthCredentials,
    client: Client,
    access_token: Mutex<Option<String>>,
}

impl fmt::Debug for RestWorkspaceClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RestWorkspaceClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("access_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl RestWorkspaceClient {
    /// Creates a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceClientError::Transport`] when the HTTP client
    /// cannot be initialized.
    pub fn new(endpoint: &ApiEndpoint, credentials: OAuthCredentials) -> WorkspaceClientResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(WorkspaceClientError::transport)?;
        Ok(Self {
            base_url: endpoint.base_url(),
            credentials,
            client,
            access_token: Mutex::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let suffix = path.trim_start_matches('/');
        format!("{base}/{suffix}")
    }

    fn endpoint_with_query(&self, path: &str, query: &[(&str, &str)]) -> WorkspaceClientResult<Url> {
        Url::parse_with_params(&self.endpoint(path), query).map_err(WorkspaceClientError::transport)
    }

    async fn access_token(&self) -> WorkspaceClientResult<String> {
        let mut cached = self.access_token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token_url = self.endpoint_with_query(
            "oauth/token",
            &[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ],
        )?;
        let form_body = token_url.query().unwrap_or_default().to_owned();
        let response = self
            .client
            .post(self.endpoint("oauth/token"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form_body)
            .send()
            .await
            .map_err(WorkspaceClientError::transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(WorkspaceClientError::transport)?;
        if !status.is_success() {
            return Err(WorkspaceClientError::Authentication(format!(
                "token request returned HTTP {status}: {}",
                truncate_for_error(&body)
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|err| WorkspaceClientError::Decode(format!("token response: {err}")))?;
        debug!(username = %self.credentials.username, "obtained workspace access token");
        *cached = Some(token.access_token.clone());
        Ok(token.access_token)
    }

    async fn authorized(&self, request: RequestBuilder) -> WorkspaceClientResult<RequestBuilder> {
        let token = self.access_token().await?;
        Ok(request.header(header::AUTHORIZATION, format!("OAuth2 {token}")))
    }

    async fn send(&self, request: RequestBuilder) -> WorkspaceClientResult<String> {
        let response = request
            .send()
            .await
            .map_err(WorkspaceClientError::transport)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(WorkspaceClientError::transport)?;
        if !status.is_success() {
            return Err(WorkspaceClientError::Status {
                status: status.as_u16(),
                body: truncate_for_error(&body),
            });
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> WorkspaceClientResult<T> {
        let body = self.send(self.authorized(request).await?).await?;
        serde_json::from_str(&body).map_err(|err| WorkspaceClientError::Decode(err.to_string()))
    }

    async fn send_status_only(&self, request: RequestBuilder) -> WorkspaceClientResult<()> {
        self.send(self.authorized(request).await?).await?;
        Ok(())
    }
}

const fn silent_flag(silent: bool) -> &'static str {
    if silent { "true" } else { "false" }
}

#[async_trait]
impl WorkspaceClient for RestWorkspaceClient {
    async fn find_items_by_external_id(
        &self,
        app_id: AppId,
        key: &ExternalKey,
    ) -> WorkspaceClientResult<ItemLookup> {
        let url = self.endpoint_with_query(
            &format!("item/app/{app_id}/v2/"),
            &[("external_id", key.as_str()), ("limit", "2")],
        )?;
        let response: ItemsResponse = self.send_json(self.client.get(url)).await?;
        Ok(response.into())
    }

    async fn create_item(
        &self,
        app_id: AppId,
        key: &ExternalKey,
        fields: &[ItemField],
        silent: bool,
    ) -> WorkspaceClientResult<ItemId> {
        let url = self.endpoint_with_query(
            &format!("item/app/{app_id}/"),
            &[("silent", silent_flag(silent))],
        )?;
        let body = serde_json::json!({
            "external_id": key.as_str(),
            "fields": encode_fields(fields),
        });
        let created: ItemCreatedResponse = self.send_json(self.client.post(url).json(&body)).await?;
        Ok(ItemId::new(created.item_id))
    }

    async fn update_item(
        &self,
        item_id: ItemId,
        fields: &[ItemField],
        silent: bool,
    ) -> WorkspaceClientResult<()> {
        let url = self.endpoint_with_query(
            &format!("item/{item_id}"),
            &[("silent", silent_flag(silent))],
        )?;
        let body = serde_json::json!({ "fields": encode_fields(fields) });
        self.send_status_only(self.client.put(url).json(&body)).await
    }

    async fn find_contacts_by_email(
        &self,
        space_id: SpaceId,
        email: &str,
    ) -> WorkspaceClientResult<Vec<ContactSummary>> {
        let url = self.endpoint_with_query(
            &format!("contact/space/{space_id}/"),
            &[("mail", email), ("type", "mini"), ("exclude_self", "false")],
        )?;
        let contacts: Vec<ContactWire> = self.send_json(self.client.get(url)).await?;
        Ok(contacts.into_iter().map(ContactSummary::from).collect())
    }

    async fn tasks_referencing_item(
        &self,
        item_id: ItemId,
    ) -> WorkspaceClientResult<Vec<RemoteTask>> {
        let reference = format!("item:{item_id}");
        let url = self.endpoint_with_query("task/", &[("reference", reference.as_str())])?;
        let tasks: Vec<TaskWire> = self.send_json(self.client.get(url)).await?;
        decode_tasks(tasks)
    }

    async fn complete_task(&self, task_id: TaskId) -> WorkspaceClientResult<()> {
        let url = self.endpoint(&format!("task/{task_id}/complete"));
        self.send_status_only(self.client.post(url)).await
    }

    async fn create_task(&self, task: &NewTask) -> WorkspaceClientResult<TaskId> {
        let body = TaskCreateBody::from(task);
        let created: TaskCreatedResponse = self
            .send_json(self.client.post(self.endpoint("task/")).json(&body))
            .await?;
        Ok(TaskId::new(created.task_id))
    }

    async fn get_space_by_url(&self, url: &str) -> WorkspaceClientResult<SpaceSummary> {
        let request_url = self.endpoint_with_query("space/url", &[("url", url)])?;
        let space: SpaceWire = self.send_json(self.client.get(request_url)).await?;
        Ok(space.into())
    }

    async fn get_app(&self, app_id: AppId) -> WorkspaceClientResult<AppSummary> {
        let app: AppWire = self
            .send_json(self.client.get(self.endpoint(&format!("app/{app_id}"))))
            .await?;
        Ok(app.into())
    }

    async fn list_space_apps(&self, space_id: SpaceId) -> WorkspaceClientResult<Vec<AppSummary>> {
        let apps: Vec<AppWire> = self
            .send_json(self.client.get(self.endpoint(&format!("app/space/{space_id}/"))))
            .await?;
        Ok(apps.into_iter().map(AppSummary::from).collect())
    }

    async fn system_status(&self) -> WorkspaceClientResult<SystemStatus> {
        let body = self.send(self.client.get(self.endpoint("status"))).await?;
        let status: StatusWire = serde_json::from_str(&body)
            .map_err(|err| WorkspaceClientError::Decode(err.to_string()))?;
        Ok(status.into())
    }
}

/// Connector producing [`RestWorkspaceClient`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestConnector;

impl WorkspaceConnector for RestConnector {
    type Client = RestWorkspaceClient;

    fn connect(
        &self,
        endpoint: &ApiEndpoint,
        credentials: OAuthCredentials,
    ) -> WorkspaceClientResult<Self::Client> {
        RestWorkspaceClient::new(endpoint, credentials)
    }
}
