//! In-memory store using a Tokio mutex.
//!
//! Implements every store trait over one shared state so cascades and
//! uniqueness checks happen under a single lock. Suitable for tests and
//! throwaway single-process runs; nothing survives a restart.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_core::types::{CollectionId, ResourceId, UserId};
use atlas_entity::{
    Collection, CollectionChanges, CollectionFilter, CollectionSortKey, NewCollection, NewResource,
    NewUser, Resource, ResourceChanges, ResourceFilter, ResourceSortKey, User, UserRole,
};

use crate::store::{
    CollectionStore, EMAIL_TAKEN, HealthProbe, ResourceStore, USERNAME_TAKEN, UserStore,
};

#[derive(Debug, Default)]
struct InnerState {
    users: BTreeMap<UserId, User>,
    collections: BTreeMap<CollectionId, Collection>,
    resources: BTreeMap<ResourceId, Resource>,
    last_id: i64,
}

impl InnerState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }

    fn username_taken(&self, username: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.username.as_deref() == Some(username))
    }

    fn remove_collection(&mut self, id: CollectionId) -> bool {
        if self.collections.remove(&id).is_none() {
            return false;
        }
        self.resources.retain(|_, r| r.collection_id != id);
        true
    }
}

/// In-process implementation of all store traits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn find_login_candidate(&self, identifier: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        let active = || state.users.values().filter(|u| u.is_active());

        let by_email = active().find(|u| u.email.eq_ignore_ascii_case(identifier));
        let found = by_email.or_else(|| active().find(|u| u.username.as_deref() == Some(identifier)));
        Ok(found.cloned())
    }

    async fn create(&self, data: &NewUser) -> AppResult<User> {
        let mut state = self.state.lock().await;

        let email = data.email.to_lowercase();
        if state.email_taken(&email, None) {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        if let Some(username) = &data.username {
            if state.username_taken(username, None) {
                return Err(AppError::conflict(USERNAME_TAKEN));
            }
        }

        let now = Utc::now();
        let user = User {
            id: UserId(state.next_id()),
            email,
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_username(&self, id: UserId, username: Option<&str>) -> AppResult<User> {
        let mut state = self.state.lock().await;

        if let Some(username) = username {
            if state.username_taken(username, Some(id)) {
                return Err(AppError::conflict(USERNAME_TAKEN));
            }
        }

        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.username = username.map(String::from);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_role(&self, id: UserId, role: UserRole) -> AppResult<User> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.state.lock().await.users.len() as i64)
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }

        let owned: Vec<CollectionId> = state
            .collections
            .values()
            .filter(|c| c.user_id == id)
            .map(|c| c.id)
            .collect();
        for collection_id in owned {
            state.remove_collection(collection_id);
        }
        Ok(true)
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: &CollectionFilter,
    ) -> AppResult<Vec<Collection>> {
        let state = self.state.lock().await;

        let mut collections: Vec<Collection> = state
            .collections
            .values()
            .filter(|c| c.user_id == user_id)
            .filter(|c| match &filter.query {
                Some(q) => {
                    contains_ci(&c.name, q)
                        || c.description.as_deref().is_some_and(|d| contains_ci(d, q))
                }
                None => true,
            })
            .cloned()
            .collect();

        let direction = filter.sort.direction;
        collections.sort_by(|a, b| {
            let primary = match filter.sort.field {
                CollectionSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                CollectionSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            direction.apply(primary.then(a.id.cmp(&b.id)))
        });
        Ok(collections)
    }

    async fn find_by_id(&self, id: CollectionId) -> AppResult<Option<Collection>> {
        Ok(self.state.lock().await.collections.get(&id).cloned())
    }

    async fn create(&self, data: &NewCollection) -> AppResult<Collection> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&data.user_id) {
            return Err(AppError::database(format!(
                "collection owner {} does not exist",
                data.user_id
            )));
        }

        let now = Utc::now();
        let collection = Collection {
            id: CollectionId(state.next_id()),
            name: data.name.clone(),
            description: data.description.clone(),
            user_id: data.user_id,
            is_public: data.is_public,
            created_at: now,
            updated_at: now,
        };
        state.collections.insert(collection.id, collection.clone());
        Ok(collection)
    }

    async fn update(
        &self,
        id: CollectionId,
        changes: &CollectionChanges,
    ) -> AppResult<Option<Collection>> {
        let mut state = self.state.lock().await;
        Ok(state.collections.get_mut(&id).map(|collection| {
            collection.apply(changes, Utc::now());
            collection.clone()
        }))
    }

    async fn delete(&self, id: CollectionId) -> AppResult<bool> {
        Ok(self.state.lock().await.remove_collection(id))
    }
}

fn compare_resources(a: &Resource, b: &Resource, key: ResourceSortKey) -> Ordering {
    match key {
        ResourceSortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        ResourceSortKey::Status => a.status.cmp(&b.status),
        ResourceSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn list_for_collection(
        &self,
        collection_id: CollectionId,
        filter: &ResourceFilter,
    ) -> AppResult<Vec<Resource>> {
        let state = self.state.lock().await;
        let authors = |r: &Resource| r.authors.clone().unwrap_or_default();

        let mut resources: Vec<Resource> = state
            .resources
            .values()
            .filter(|r| r.collection_id == collection_id)
            .filter(|r| match &filter.query {
                Some(q) => contains_ci(&r.title, q) || contains_ci(&authors(r), q),
                None => true,
            })
            .filter(|r| filter.status.is_none_or(|s| r.status == s))
            .filter(|r| match &filter.author {
                Some(a) => contains_ci(&authors(r), a),
                None => true,
            })
            .cloned()
            .collect();

        let direction = filter.sort.direction;
        resources.sort_by(|a, b| {
            let primary = compare_resources(a, b, filter.sort.field);
            direction.apply(primary.then(a.id.cmp(&b.id)))
        });
        Ok(resources)
    }

    async fn find_by_id(&self, id: ResourceId) -> AppResult<Option<Resource>> {
        Ok(self.state.lock().await.resources.get(&id).cloned())
    }

    async fn create(&self, data: &NewResource) -> AppResult<Resource> {
        let mut state = self.state.lock().await;
        if !state.collections.contains_key(&data.collection_id) {
            return Err(AppError::database(format!(
                "parent collection {} does not exist",
                data.collection_id
            )));
        }

        let now = Utc::now();
        let resource = Resource {
            id: ResourceId(state.next_id()),
            title: data.title.clone(),
            authors: data.authors.clone(),
            url: data.url.clone(),
            status: data.status,
            last_read_date: data.last_read_date,
            collection_id: data.collection_id,
            created_at: now,
            updated_at: now,
        };
        state.resources.insert(resource.id, resource.clone());
        Ok(resource)
    }

    async fn update(
        &self,
        id: ResourceId,
        changes: &ResourceChanges,
    ) -> AppResult<Option<Resource>> {
        let mut state = self.state.lock().await;
        Ok(state.resources.get_mut(&id).map(|resource| {
            resource.apply(changes, Utc::now());
            resource.clone()
        }))
    }

    async fn delete(&self, id: ResourceId) -> AppResult<bool> {
        Ok(self.state.lock().await.resources.remove(&id).is_some())
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
