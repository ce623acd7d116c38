//! Podio wire formats and their mapping to domain values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::workspace::{
    domain::{
        AppId, AppSummary, ContactSummary, FieldValue, ItemField, ItemId, ItemLookup, NewTask,
        ProfileId, RemoteTask, SpaceId, SpaceSummary, SystemStatus, TaskId, TaskStatus, UserId,
    },
    ports::{WorkspaceClientError, WorkspaceClientResult},
};

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemsResponse {
    #[serde(default)]
    filtered: u64,
    #[serde(default)]
    items: Vec<ItemSummaryWire>,
}

#[derive(Debug, Deserialize)]
struct ItemSummaryWire {
    item_id: u64,
}

impl From<ItemsResponse> for ItemLookup {
    fn from(response: ItemsResponse) -> Self {
        Self {
            filtered: response.filtered,
            item_ids: response
                .items
                .into_iter()
                .map(|item| ItemId::new(item.item_id))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemCreatedResponse {
    pub(super) item_id: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContactWire {
    user_id: u64,
    profile_id: u64,
}

impl From<ContactWire> for ContactSummary {
    fn from(contact: ContactWire) -> Self {
        Self {
            user_id: UserId::new(contact.user_id),
            profile_id: ProfileId::new(contact.profile_id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskWire {
    task_id: u64,
    status: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    responsible: Option<ResponsibleWire>,
    #[serde(default, rename = "ref")]
    reference: Option<ReferenceWire>,
}

#[derive(Debug, Deserialize)]
struct ResponsibleWire {
    user_id: u64,
}

#[derive(Debug, Deserialize)]
struct ReferenceWire {
    #[serde(rename = "type")]
    kind: String,
    id: u64,
}

impl TryFrom<TaskWire> for RemoteTask {
    type Error = WorkspaceClientError;

    fn try_from(task: TaskWire) -> Result<Self, Self::Error> {
        let status = TaskStatus::try_from(task.status.as_str())
            .map_err(|err| WorkspaceClientError::Decode(err.to_string()))?;
        let due_date = task
            .due_date
            .as_deref()
            .map(|raw| NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT))
            .transpose()
            .map_err(|err| WorkspaceClientError::Decode(format!("invalid task due date: {err}")))?;
        let reference_item = task
            .reference
            .filter(|reference| reference.kind == "item")
            .map(|reference| ItemId::new(reference.id));

        Ok(Self {
            id: TaskId::new(task.task_id),
            status,
            reference_item,
            responsible: task
                .responsible
                .map(|responsible| UserId::new(responsible.user_id)),
            text: task.text,
            due_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskCreatedResponse {
    pub(super) task_id: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct SpaceWire {
    space_id: u64,
    name: String,
    org: OrganizationWire,
}

#[derive(Debug, Deserialize)]
struct OrganizationWire {
    name: String,
}

impl From<SpaceWire> for SpaceSummary {
    fn from(space: SpaceWire) -> Self {
        Self {
            id: SpaceId::new(space.space_id),
            name: space.name,
            organization_name: space.org.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AppWire {
    app_id: u64,
    space_id: u64,
}

impl From<AppWire> for AppSummary {
    fn from(app: AppWire) -> Self {
        Self {
            id: AppId::new(app.app_id),
            space_id: SpaceId::new(app.space_id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct StatusWire {
    version: String,
}

impl From<StatusWire> for SystemStatus {
    fn from(status: StatusWire) -> Self {
        Self {
            version: status.version,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct TaskCreateBody<'a> {
    text: &'a str,
    due_date: String,
    responsible: u64,
    ref_type: &'static str,
    ref_id: u64,
}

impl<'a> From<&'a NewTask> for TaskCreateBody<'a> {
    fn from(task: &'a NewTask) -> Self {
        Self {
            text: &task.text,
            due_date: task.due_date.format(DUE_DATE_FORMAT).to_string(),
            responsible: task.responsible.value(),
            ref_type: "item",
            ref_id: task.reference_item.value(),
        }
    }
}

/// Encodes fields as Podio's `{"external-id": [{"value": ...}]}` map.
pub(super) fn encode_fields(fields: &[ItemField]) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|field| {
            let values = field.values().iter().map(encode_value).collect();
            (field.external_id().to_owned(), Value::Array(values))
        })
        .collect();
    Value::Object(encoded)
}

fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => json!({ "value": text }),
        FieldValue::Number(number) => json!({ "value": number }),
        FieldValue::Contact(profile_id) => json!({ "value": profile_id.value() }),
    }
}

/// Converts a list of wire records, failing on the first undecodable one.
pub(super) fn decode_tasks(tasks: Vec<TaskWire>) -> WorkspaceClientResult<Vec<RemoteTask>> {
    tasks.into_iter().map(RemoteTask::try_from).collect()
}

/// Shortens a response body for inclusion in an error.
pub(super) fn truncate_for_error(body: &str) -> String {
    const LIMIT: usize = 512;
    if body.len() <= LIMIT {
        return body.to_owned();
    }
    let cut = (0..=LIMIT)
        .rev()
        .find(|index| body.is_char_boundary(*index))
        .unwrap_or(0);
    format!("{}...", body.get(..cut).unwrap_or_default())
}
