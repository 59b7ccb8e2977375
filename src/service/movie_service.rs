use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::movie_dto::{DirectorResponse, GenreResponse};
use crate::model::movie::Movie;
use crate::repository::movie_repo::MovieRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait MovieService: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, ServiceError>;
    async fn get_movie_by_title(&self, title: &str) -> Result<Movie, ServiceError>;
    async fn create_movie(&self, movie: Movie) -> Result<Movie, ServiceError>;
    async fn get_genre(&self, genre: &str) -> Result<GenreResponse, ServiceError>;
    async fn get_director(&self, name: &str) -> Result<DirectorResponse, ServiceError>;
}

pub struct MovieServiceImpl {
    pub movie_repo: Arc<dyn MovieRepository>,
}

impl MovieServiceImpl {
    pub fn new(movie_repo: Arc<dyn MovieRepository>) -> Self {
        Self { movie_repo }
    }
}

#[async_trait]
impl MovieService for MovieServiceImpl {
    #[instrument(skip(self))]
    async fn list_movies(&self) -> Result<Vec<Movie>, ServiceError> {
        Ok(self.movie_repo.find_all().await?)
    }

    #[instrument(skip(self))]
    async fn get_movie_by_title(&self, title: &str) -> Result<Movie, ServiceError> {
        self.movie_repo
            .find_by_title(title)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Movie not found".to_string()))
    }

    #[instrument(skip(self, movie), fields(title = %movie.title))]
    async fn create_movie(&self, movie: Movie) -> Result<Movie, ServiceError> {
        let created = self.movie_repo.insert(movie).await;
        match &created {
            Ok(m) => info!(id = ?m.id, "Movie created"),
            Err(e) => error!("Failed to create movie: {e}"),
        }
        Ok(created?)
    }

    #[instrument(skip(self))]
    async fn get_genre(&self, genre: &str) -> Result<GenreResponse, ServiceError> {
        let movies = self.movie_repo.find_by_genre(genre).await.map_err(|e| {
            error!("Error fetching genre: {e}");
            ServiceError::from(e)
        })?;
        if movies.is_empty() {
            return Err(ServiceError::NotFound("Genre not found".to_string()));
        }
        Ok(GenreResponse::new(genre, movies))
    }

    #[instrument(skip(self))]
    async fn get_director(&self, name: &str) -> Result<DirectorResponse, ServiceError> {
        let movies = self.movie_repo.find_by_director(name).await?;
        if movies.is_empty() {
            return Err(ServiceError::NotFound("Director not found".to_string()));
        }
        Ok(DirectorResponse::new(name, movies))
    }
}
