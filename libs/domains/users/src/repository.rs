use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for user persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with [`UserError::DuplicateEmail`] when the
    /// address is taken.
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// All users, id ascending.
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Merge the present fields of `input` into the stored user. The email
    /// uniqueness check only applies when the email actually changes.
    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<User>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: i64) -> UserResult<bool>;
}

/// In-memory implementation used by tests and local development.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    users: HashMap<i64, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if store.users.values().any(|u| u.email == input.email) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        store.next_id += 1;
        let user = User {
            id: store.next_id,
            name: input.name,
            email: input.email,
        };
        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        let mut users: Vec<User> = store.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        let current = store.users.get(&id).ok_or(UserError::NotFound(id))?.clone();

        if let Some(ref email) = input.email {
            let taken = store
                .users
                .values()
                .any(|u| u.id != id && &u.email == email);
            if taken && *email != current.email {
                return Err(UserError::DuplicateEmail(email.clone()));
            }
        }

        let updated = User {
            id,
            name: input.name.unwrap_or(current.name),
            email: input.email.unwrap_or(current.email),
        };
        store.users.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let mut store = self.store.write().await;
        Ok(store.users.remove(&id).is_some())
    }
}
