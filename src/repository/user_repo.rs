use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::{
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::{error, info, warn};

use crate::model::user::{User, UserUpdate};
use crate::repository::repository_error::RepositoryResult;

/// Mutations return the document as it is after the write, or `None` when
/// no user has the given id.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<User>>;
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn update(&self, id: ObjectId, update: UserUpdate) -> RepositoryResult<Option<User>>;
    async fn add_favorite(&self, id: ObjectId, movie_id: ObjectId) -> RepositoryResult<Option<User>>;
    async fn remove_favorite(&self, id: ObjectId, movie_id: ObjectId) -> RepositoryResult<Option<User>>;
    /// Succeeds whether or not a document was removed.
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        MongoUserRepository { collection: db.collection::<User>(collection_name) }
    }

    /// Creates the unique indexes on `username` and `email`.
    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let unique = || IndexOptions::builder().unique(true).build();
        let indexes = vec![
            IndexModel::builder().keys(doc! { "username": 1 }).options(unique()).build(),
            IndexModel::builder().keys(doc! { "email": 1 }).options(unique()).build(),
        ];
        self.collection.create_indexes(indexes, None).await?;
        info!("User indexes ensured");
        Ok(())
    }

    async fn find_and_modify(&self, id: ObjectId, update: Document) -> RepositoryResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let user = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update, options)
            .await?;
        if user.is_none() {
            warn!("No user found for ID: {}", id);
        }
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let cursor = self.collection.find(None, None).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        info!("Fetched {} users", users.len());
        Ok(users)
    }

    #[tracing::instrument(skip(self, user), fields(username = %user.username, email = %user.email))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        if user.created_at.is_none() {
            user.created_at = Some(bson::DateTime::now());
        }
        match self.collection.insert_one(&user, None).await {
            Ok(_) => {
                info!("User inserted successfully");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(e.into())
            }
        }
    }

    #[tracing::instrument(skip(self, update), fields(id = %id))]
    async fn update(&self, id: ObjectId, update: UserUpdate) -> RepositoryResult<Option<User>> {
        if update.is_empty() {
            // `$set` with no fields is rejected by the server.
            return Ok(self.collection.find_one(doc! { "_id": id }, None).await?);
        }
        let set = bson::to_document(&update)?;
        self.find_and_modify(id, doc! { "$set": set }).await
    }

    #[tracing::instrument(skip(self), fields(id = %id, movie_id = %movie_id))]
    async fn add_favorite(&self, id: ObjectId, movie_id: ObjectId) -> RepositoryResult<Option<User>> {
        self.find_and_modify(id, doc! { "$addToSet": { "favoriteMovies": movie_id } }).await
    }

    #[tracing::instrument(skip(self), fields(id = %id, movie_id = %movie_id))]
    async fn remove_favorite(&self, id: ObjectId, movie_id: ObjectId) -> RepositoryResult<Option<User>> {
        self.find_and_modify(id, doc! { "$pull": { "favoriteMovies": movie_id } }).await
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        info!(deleted = result.deleted_count, "Delete user finished");
        Ok(())
    }
}
