use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::model::user::{User, UserUpdate};
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;

/// User mutations do not report a missing user as an error: the result is
/// `Ok(None)` for updates and `Ok(())` for deletes.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ServiceError>;
    async fn create_user(&self, user: User) -> Result<User, ServiceError>;
    async fn update_user(&self, id: ObjectId, update: UserUpdate) -> Result<Option<User>, ServiceError>;
    async fn add_favorite(&self, id: ObjectId, movie_id: ObjectId) -> Result<Option<User>, ServiceError>;
    async fn remove_favorite(&self, id: ObjectId, movie_id: ObjectId) -> Result<Option<User>, ServiceError>;
    async fn delete_user(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.user_repo.find_all().await?)
    }

    #[instrument(skip(self, user), fields(username = %user.username, email = %user.email))]
    async fn create_user(&self, user: User) -> Result<User, ServiceError> {
        info!("Registering new user");
        let inserted = self.user_repo.insert(user).await;
        match &inserted {
            Ok(_) => info!("User inserted successfully"),
            Err(e) => error!("Failed to insert user: {e}"),
        }
        Ok(inserted?)
    }

    #[instrument(skip(self, update), fields(id = %id))]
    async fn update_user(&self, id: ObjectId, update: UserUpdate) -> Result<Option<User>, ServiceError> {
        Ok(self.user_repo.update(id, update).await?)
    }

    #[instrument(skip(self), fields(id = %id, movie_id = %movie_id))]
    async fn add_favorite(&self, id: ObjectId, movie_id: ObjectId) -> Result<Option<User>, ServiceError> {
        Ok(self.user_repo.add_favorite(id, movie_id).await?)
    }

    #[instrument(skip(self), fields(id = %id, movie_id = %movie_id))]
    async fn remove_favorite(&self, id: ObjectId, movie_id: ObjectId) -> Result<Option<User>, ServiceError> {
        Ok(self.user_repo.remove_favorite(id, movie_id).await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_user(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.user_repo.delete(id).await?;
        info!("User deleted");
        Ok(())
    }
}
