use axum::{Router, routing::{get, post, put}};
use std::sync::Arc;

use crate::handler::user_handler::{
    add_favorite_handler,
    create_user_handler,
    delete_user_handler,
    list_users_handler,
    remove_favorite_handler,
    update_user_handler,
};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/{id}", put(update_user_handler).delete(delete_user_handler))
        .route(
            "/users/{id}/favorites/{movie_id}",
            post(add_favorite_handler).delete(remove_favorite_handler),
        )
        .with_state(service)
}
