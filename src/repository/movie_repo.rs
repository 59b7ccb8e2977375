use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::{error, info};

use crate::model::movie::Movie;
use crate::repository::repository_error::RepositoryResult;

#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Movie>>;
    async fn find_by_title(&self, title: &str) -> RepositoryResult<Option<Movie>>;
    async fn find_by_genre(&self, genre: &str) -> RepositoryResult<Vec<Movie>>;
    async fn find_by_director(&self, director: &str) -> RepositoryResult<Vec<Movie>>;
    async fn insert(&self, movie: Movie) -> RepositoryResult<Movie>;
}

/// Matches the flat `genre` text only. A document whose `genre` is a nested
/// structure never matches, so it cannot reach `Movie` decoding here.
pub fn genre_filter(genre: &str) -> Document {
    doc! { "genre": genre }
}

pub struct MongoMovieRepository {
    collection: Collection<Movie>,
}

impl MongoMovieRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        MongoMovieRepository { collection: db.collection::<Movie>(collection_name) }
    }

    async fn find_many(&self, filter: Option<Document>) -> RepositoryResult<Vec<Movie>> {
        let cursor = self.collection.find(filter, None).await?;
        let movies: Vec<Movie> = cursor.try_collect().await?;
        Ok(movies)
    }
}

#[async_trait]
impl MovieRepository for MongoMovieRepository {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Movie>> {
        let movies = self.find_many(None).await.map_err(|e| {
            error!("Failed to list movies: {}", e);
            e
        })?;
        info!("Fetched {} movies", movies.len());
        Ok(movies)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_title(&self, title: &str) -> RepositoryResult<Option<Movie>> {
        let movie = self.collection.find_one(doc! { "title": title }, None).await?;
        if movie.is_none() {
            info!("No movie titled {:?}", title);
        }
        Ok(movie)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_genre(&self, genre: &str) -> RepositoryResult<Vec<Movie>> {
        let movies = self.find_many(Some(genre_filter(genre))).await?;
        info!("Found {} movies in genre {:?}", movies.len(), genre);
        Ok(movies)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_director(&self, director: &str) -> RepositoryResult<Vec<Movie>> {
        let movies = self.find_many(Some(doc! { "director": director })).await?;
        info!("Found {} movies by director {:?}", movies.len(), director);
        Ok(movies)
    }

    #[tracing::instrument(skip(self, movie), fields(title = %movie.title))]
    async fn insert(&self, mut movie: Movie) -> RepositoryResult<Movie> {
        movie.id = Some(ObjectId::new());
        match self.collection.insert_one(&movie, None).await {
            Ok(_) => {
                info!("Movie created successfully");
                Ok(movie)
            }
            Err(e) => {
                error!("Failed to create movie: {}", e);
                Err(e.into())
            }
        }
    }
}
