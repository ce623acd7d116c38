//! Thread-safe in-memory workspace.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::workspace::{
    domain::{
        AppId, AppSummary, ContactSummary, ExternalKey, ItemField, ItemId, ItemLookup, NewTask,
        ProfileId, RemoteTask, SpaceId, SpaceSummary, SystemStatus, TaskId, TaskStatus, UserId,
    },
    ports::{WorkspaceClient, WorkspaceClientError, WorkspaceClientResult, WorkspaceConnector},
};
use crate::config::{ApiEndpoint, OAuthCredentials};

/// Item held by the in-memory workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    /// Item identifier.
    pub id: ItemId,
    /// Owning application.
    pub app_id: AppId,
    /// External key the item was created with.
    pub external_key: ExternalKey,
    /// Current field values.
    pub fields: Vec<ItemField>,
}

#[derive(Debug, Clone)]
struct StoredContact {
    space_id: SpaceId,
    email: String,
    contact: ContactSummary,
}

#[derive(Debug)]
struct InMemoryWorkspaceState {
    next_id: u64,
    api_version: String,
    spaces: BTreeMap<String, SpaceSummary>,
    apps: Vec<AppSummary>,
    contacts: Vec<StoredContact>,
    items: BTreeMap<ItemId, StoredItem>,
    tasks: BTreeMap<TaskId, RemoteTask>,
    item_creations: usize,
    task_completions: usize,
}

impl Default for InMemoryWorkspaceState {
    fn default() -> Self {
        Self {
            next_id: 1,
            api_version: "in-memory".to_owned(),
            spaces: BTreeMap::new(),
            apps: Vec::new(),
            contacts: Vec::new(),
            items: BTreeMap::new(),
            tasks: BTreeMap::new(),
            item_creations: 0,
            task_completions: 0,
        }
    }
}

impl InMemoryWorkspaceState {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Workspace held entirely in memory.
///
/// Items and tasks behave like the remote API: identifiers are assigned on
/// creation and the external key is not enforced as unique.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspace {
    state: Arc<RwLock<InMemoryWorkspaceState>>,
}

fn poisoned(err: &impl std::fmt::Display) -> WorkspaceClientError {
    WorkspaceClientError::transport(std::io::Error::other(err.to_string()))
}

fn not_found(what: &str) -> WorkspaceClientError {
    WorkspaceClientError::Status {
        status: 404,
        body: format!("{what} not found"),
    }
}

impl InMemoryWorkspace {
    /// Creates an empty workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> WorkspaceClientResult<RwLockReadGuard<'_, InMemoryWorkspaceState>> {
        self.state.read().map_err(|err| poisoned(&err))
    }

    fn write(&self) -> WorkspaceClientResult<RwLockWriteGuard<'_, InMemoryWorkspaceState>> {
        self.state.write().map_err(|err| poisoned(&err))
    }

    /// Registers a space reachable by `url`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceClientError::Transport`] when the state lock is
    /// poisoned.
    pub fn add_space(&self, url: impl Into<String>, space: SpaceSummary) -> WorkspaceClientResult<()> {
        self.write()?.spaces.insert(url.into(), space);
        Ok(())
    }

    /// Registers an application.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceClientError::Transport`] when the state lock is
    /// poisoned.
    pub fn add_app(&self, app: AppSummary) -> WorkspaceClientResult<()> {
        self.write()?.apps.push(app);
        Ok(())
    }

    /// Registers a contact of `space_id` reachable by `email`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceClientError::Transport`] when the state lock is
    /// poisoned.
    pub fn add_contact(
        &self,
        space_id: SpaceId,
        email: impl Into<String>,
        user_id: UserId,
        profile_id: ProfileId,
    ) -> WorkspaceClientResult<()> {
        self.write()?.contacts.push(StoredContact {
            space_id,
            email: email.into(),
            contact: ContactSummary {
                user_id,
                profile_id,
            },
        });
        Ok(())
    }

    /// Returns the items of an application in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceClientError::Transport`] when the state lock is
    /// poisoned.
    pub fn items(&self, app_id: AppId) -> WorkspaceClientResult<Vec<StoredItem>> {
        Ok(self
            .read()?
            .items
            .values()
            .filter(|item| item.app_id == app_id)
            .cloned()
            .collect())
    }

    /// Returns every task in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceClientError::Transport`] when the state lock is
    /// poisoned.
    pub fn tasks(&self) -> WorkspaceClientResult<Vec<RemoteTask>> {
        Ok(self.read()?.tasks.values().cloned().collect())
    }

    /// Returns how many items have been created.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceClientError::Transport`] when the state lock is
    /// poisoned.
    pub fn item_creations(&self) -> WorkspaceClientResult<usize> {
        Ok(self.read()?.item_creations)
    }

    /// Returns how many task completions have been requested.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceClientError::Transport`] when the state lock is
    /// poisoned.
    pub fn task_completions(&self) -> WorkspaceClientResult<usize> {
        Ok(self.read()?.task_completions)
    }
}

/// Every connection shares the same in-memory state, whatever the
/// endpoint or credentials.
impl WorkspaceConnector for InMemoryWorkspace {
    type Client = Self;

    fn connect(
        &self,
        _endpoint: &ApiEndpoint,
        _credentials: OAuthCredentials,
    ) -> WorkspaceClientResult<Self::Client> {
        Ok(self.clone())
    }
}

#[async_trait]
impl WorkspaceClient for InMemoryWorkspace {
    async fn find_items_by_external_id(
        &self,
        app_id: AppId,
        key: &ExternalKey,
    ) -> WorkspaceClientResult<ItemLookup> {
        let state = self.read()?;
        let item_ids: Vec<ItemId> = state
            .items
            .values()
            .filter(|item| item.app_id == app_id && &item.external_key == key)
            .map(|item| item.id)
            .collect();
        Ok(ItemLookup {
            filtered: u64::try_from(item_ids.len()).unwrap_or(u64::MAX),
            item_ids,
        })
    }

    async fn create_item(
        &self,
        app_id: AppId,
        key: &ExternalKey,
        fields: &[ItemField],
        _silent: bool,
    ) -> WorkspaceClientResult<ItemId> {
        let mut state = self.write()?;
        let id = ItemId::new(state.allocate_id());
        state.items.insert(
            id,
            StoredItem {
                id,
                app_id,
                external_key: key.clone(),
                fields: fields.to_vec(),
            },
        );
        state.item_creations += 1;
        Ok(id)
    }

    async fn update_item(
        &self,
        item_id: ItemId,
        fields: &[ItemField],
        _silent: bool,
    ) -> WorkspaceClientResult<()> {
        let mut state = self.write()?;
        let item = state
            .items
            .get_mut(&item_id)
            .ok_or_else(|| not_found("item"))?;
        for field in fields {
            item.fields
                .retain(|existing| existing.external_id() != field.external_id());
            item.fields.push(field.clone());
        }
        Ok(())
    }

    async fn find_contacts_by_email(
        &self,
        space_id: SpaceId,
        email: &str,
    ) -> WorkspaceClientResult<Vec<ContactSummary>> {
        Ok(self
            .read()?
            .contacts
            .iter()
            .filter(|stored| stored.space_id == space_id && stored.email.eq_ignore_ascii_case(email))
            .map(|stored| stored.contact)
            .collect())
    }

    async fn tasks_referencing_item(
        &self,
        item_id: ItemId,
    ) -> WorkspaceClientResult<Vec<RemoteTask>> {
        Ok(self
            .read()?
            .tasks
            .values()
            .filter(|task| task.reference_item == Some(item_id))
            .cloned()
            .collect())
    }

    async fn complete_task(&self, task_id: TaskId) -> WorkspaceClientResult<()> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&task_id)
            .ok_or_else(|| not_found("task"))?;
        task.status = TaskStatus::Completed;
        state.task_completions += 1;
        Ok(())
    }

    async fn create_task(&self, task: &NewTask) -> WorkspaceClientResult<TaskId> {
        let mut state = self.write()?;
        if !state.items.contains_key(&task.reference_item) {
            return Err(not_found("item"));
        }
        let id = TaskId::new(state.allocate_id());
        state.tasks.insert(
            id,
            RemoteTask {
                id,
                status: TaskStatus::Active,
                reference_item: Some(task.reference_item),
                responsible: Some(task.responsible),
                text: task.text.clone(),
                due_date: Some(task.due_date),
            },
        );
        Ok(id)
    }

    async fn get_space_by_url(&self, url: &str) -> WorkspaceClientResult<SpaceSummary> {
        self.read()?
            .spaces
            .get(url)
            .cloned()
            .ok_or_else(|| not_found("space"))
    }

    async fn get_app(&self, app_id: AppId) -> WorkspaceClientResult<AppSummary> {
        self.read()?
            .apps
            .iter()
            .find(|app| app.id == app_id)
            .copied()
            .ok_or_else(|| not_found("app"))
    }

    async fn list_space_apps(&self, space_id: SpaceId) -> WorkspaceClientResult<Vec<AppSummary>> {
        Ok(self
            .read()?
            .apps
            .iter()
            .filter(|app| app.space_id == space_id)
            .copied()
            .collect())
    }

    async fn system_status(&self) -> WorkspaceClientResult<SystemStatus> {
        Ok(SystemStatus {
            version: self.read()?.api_version.clone(),
        })
    }
}
