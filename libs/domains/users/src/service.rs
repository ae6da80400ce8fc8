use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{email_is_valid, CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Port consumed by the other domains to verify that an acting user exists.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn user_by_id(&self, id: i64) -> UserResult<Option<User>>;
}

/// Business rules for user accounts.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        if !email_is_valid(&input.email) {
            return Err(UserError::Validation(format!(
                "'{}' is not a valid email address",
                input.email
            )));
        }

        self.repository.create(input).await
    }

    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        if let Some(ref email) = input.email {
            if !email_is_valid(email) {
                return Err(UserError::Validation(format!(
                    "'{email}' is not a valid email address"
                )));
            }
        }

        self.repository.update(id, input).await
    }

    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: UserRepository> UserLookup for UserService<R> {
    async fn user_by_id(&self, id: i64) -> UserResult<Option<User>> {
        self.repository.get_by_id(id).await
    }
}
