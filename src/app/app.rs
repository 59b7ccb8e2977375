use axum::Router;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{AppConfig, ConfigError, MongoConfig};
use crate::repository::mongo_client;
use crate::repository::movie_repo::MongoMovieRepository;
use crate::repository::user_repo::MongoUserRepository;
use crate::router::app_router;
use crate::service::movie_service::MovieServiceImpl;
use crate::service::user_service::UserServiceImpl;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("MongoDB error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env()?;
        let db = mongo_client::connect(&mongo_config).await?;

        let movie_repo = Arc::new(MongoMovieRepository::new(&db, &mongo_config.movie_collection));
        let user_repo = Arc::new(MongoUserRepository::new(&db, &mongo_config.user_collection));
        if let Err(e) = user_repo.ensure_indexes().await {
            warn!("Could not ensure user indexes, uniqueness is not enforced: {e}");
        }

        let movie_service = Arc::new(MovieServiceImpl::new(movie_repo));
        let user_service = Arc::new(UserServiceImpl::new(user_repo));
        let router = app_router(movie_service, user_service);

        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), AppError> {
        let addr = self.config.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
