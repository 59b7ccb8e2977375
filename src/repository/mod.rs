pub mod mongo_client;
pub mod movie_repo;
pub mod repository_error;
pub mod user_repo;
