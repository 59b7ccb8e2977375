use axum::{extract::{rejection::JsonRejection, Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{debug, error};

use crate::dto::movie_dto::{CreateMovieRequest, MovieResponse};
use crate::service::movie_service::{MovieService, MovieServiceImpl};
use crate::util::error::{HandlerError, ServiceError};

pub async fn list_movies_handler(
    State(service): State<Arc<MovieServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let movies = service
        .list_movies()
        .await
        .map_err(|e| HandlerError::internal(e.message()))?;
    Ok(Json(movies.into_iter().map(MovieResponse::from).collect::<Vec<_>>()))
}

pub async fn get_movie_by_title_handler(
    State(service): State<Arc<MovieServiceImpl>>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let movie = service.get_movie_by_title(&title).await?;
    Ok(Json(MovieResponse::from(movie)))
}

pub async fn create_movie_handler(
    State(service): State<Arc<MovieServiceImpl>>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload.map_err(|e| {
        debug!("[create_movie_handler] Rejected body: {}", e.body_text());
        HandlerError::bad_request(e.body_text())
    })?;
    let movie = payload.into_movie().map_err(HandlerError::validation)?;
    let created = service
        .create_movie(movie)
        .await
        .map_err(|e| HandlerError::validation(e.message()))?;
    Ok((StatusCode::CREATED, Json(MovieResponse::from(created))))
}

pub async fn get_genre_handler(
    State(service): State<Arc<MovieServiceImpl>>,
    Path(genre): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    match service.get_genre(&genre).await {
        Ok(body) => Ok(Json(body)),
        Err(ServiceError::NotFound(msg)) => Err(HandlerError::not_found(msg)),
        Err(e) => {
            error!("[get_genre_handler] {}", e);
            Err(HandlerError::internal("Server error"))
        }
    }
}

pub async fn get_director_handler(
    State(service): State<Arc<MovieServiceImpl>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let body = service.get_director(&name).await?;
    Ok(Json(body))
}
