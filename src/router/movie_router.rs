use axum::{Router, routing::get};
use std::sync::Arc;

use crate::handler::movie_handler::{
    create_movie_handler,
    get_director_handler,
    get_genre_handler,
    get_movie_by_title_handler,
    list_movies_handler,
};
use crate::service::movie_service::MovieServiceImpl;

pub fn movie_router(service: Arc<MovieServiceImpl>) -> Router {
    Router::new()
        .route("/movies", get(list_movies_handler).post(create_movie_handler))
        .route("/movies/{title}", get(get_movie_by_title_handler))
        .route("/genres/{genre}", get(get_genre_handler))
        .route("/directors/{name}", get(get_director_handler))
        .with_state(service)
}
