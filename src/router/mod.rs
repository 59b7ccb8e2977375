pub mod movie_router;
pub mod user_router;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::service::movie_service::MovieServiceImpl;
use crate::service::user_service::UserServiceImpl;

/// Every route the service exposes, with request tracing.
pub fn app_router(movie_service: Arc<MovieServiceImpl>, user_service: Arc<UserServiceImpl>) -> Router {
    Router::new()
        .merge(movie_router::movie_router(movie_service))
        .merge(user_router::user_router(user_service))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}
