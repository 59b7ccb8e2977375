use axum::{extract::{rejection::JsonRejection, Path, State}, http::StatusCode, response::IntoResponse, Json};
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;

const INVALID_USER_ID: &str = "Invalid user ID format";
const INVALID_USER_OR_MOVIE_ID: &str = "Invalid user or movie ID format";

fn parse_ids(id: &str, movie_id: &str) -> Result<(ObjectId, ObjectId), HandlerError> {
    match (ObjectId::parse_str(id), ObjectId::parse_str(movie_id)) {
        (Ok(id), Ok(movie_id)) => Ok((id, movie_id)),
        _ => {
            warn!(id, movie_id, "Rejected malformed id");
            Err(HandlerError::bad_request(INVALID_USER_OR_MOVIE_ID))
        }
    }
}

fn parse_user_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| {
        warn!(id, "Rejected malformed user id");
        HandlerError::bad_request(INVALID_USER_ID)
    })
}

pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let users = service
        .list_users()
        .await
        .map_err(|e| HandlerError::internal(e.message()))?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect::<Vec<_>>()))
}

pub async fn create_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload.map_err(|e| HandlerError::bad_request(e.body_text()))?;
    let user = payload.into_user().map_err(HandlerError::validation)?;
    let created = service
        .create_user(user)
        .await
        .map_err(|e| HandlerError::validation(e.message()))?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

pub async fn update_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_user_id(&id)?;
    // A request without a JSON body changes nothing.
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::MissingJsonContentType(_)) => {
            debug!("[update_user_handler] No JSON body, applying an empty update");
            UpdateUserRequest::default()
        }
        Err(e) => return Err(HandlerError::bad_request(e.body_text())),
    };
    let update = payload.into_update().map_err(HandlerError::bad_request)?;
    let updated = service
        .update_user(id, update)
        .await
        .map_err(|e| HandlerError::bad_request(e.message()))?;
    Ok(Json(updated.map(UserResponse::from)))
}

pub async fn add_favorite_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path((id, movie_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HandlerError> {
    let (id, movie_id) = parse_ids(&id, &movie_id)?;
    let user = service
        .add_favorite(id, movie_id)
        .await
        .map_err(|e| HandlerError::bad_request(e.message()))?;
    Ok(Json(user.map(UserResponse::from)))
}

pub async fn remove_favorite_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path((id, movie_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HandlerError> {
    let (id, movie_id) = parse_ids(&id, &movie_id)?;
    let user = service
        .remove_favorite(id, movie_id)
        .await
        .map_err(|e| HandlerError::bad_request(e.message()))?;
    Ok(Json(user.map(UserResponse::from)))
}

pub async fn delete_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_user_id(&id)?;
    service
        .delete_user(id)
        .await
        .map_err(|e| HandlerError::bad_request(e.message()))?;
    Ok("User deleted")
}
