pub mod movie_handler;
pub mod user_handler;
