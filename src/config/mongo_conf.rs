use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_MONGO_DATABASE: &str = "MovieDB";

/// MongoDB configuration structure
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    /// Collection holding movie documents
    pub movie_collection: String,
    /// Collection holding user documents
    pub user_collection: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Load MongoDB configuration from environment variables
    ///
    /// Every variable is optional and falls back to the local development
    /// database:
    /// - MONGO_URI: connection URI (defaults to mongodb://localhost:27017)
    /// - MONGO_DATABASE: database name (defaults to MovieDB)
    /// - MONGO_USERNAME / MONGO_PASSWORD: credential, used only when both are set
    /// - MONGO_MOVIE_COLLECTION: defaults to movies
    /// - MONGO_USER_COLLECTION: defaults to users
    /// - MONGO_POOL_SIZE: connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: connection timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");

        let uri = env::var("MONGO_URI").unwrap_or_else(|_| {
            warn!("MONGO_URI not set, using default: {}", DEFAULT_MONGO_URI);
            DEFAULT_MONGO_URI.to_string()
        });
        debug!("MongoDB URI: {}", uri);

        let database = env::var("MONGO_DATABASE").unwrap_or_else(|_| {
            warn!("MONGO_DATABASE not set, using default: {}", DEFAULT_MONGO_DATABASE);
            DEFAULT_MONGO_DATABASE.to_string()
        });
        debug!("MongoDB database: {}", database);

        let username = env::var("MONGO_USERNAME").ok();
        if let Some(ref user) = username {
            debug!("MongoDB username: {}", user);
        } else {
            debug!("No MongoDB username specified");
        }

        let password = env::var("MONGO_PASSWORD").ok();
        if password.is_some() {
            debug!("MongoDB password provided");
        } else {
            debug!("No MongoDB password specified");
        }

        let movie_collection =
            env::var("MONGO_MOVIE_COLLECTION").unwrap_or_else(|_| "movies".to_string());
        let user_collection =
            env::var("MONGO_USER_COLLECTION").unwrap_or_else(|_| "users".to_string());
        debug!(
            "MongoDB collections: movies={}, users={}",
            movie_collection, user_collection
        );

        let pool_size = env::var("MONGO_POOL_SIZE")
            .unwrap_or_else(|_| {
                debug!("MONGO_POOL_SIZE not set, using default: 10");
                "10".to_string()
            })
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid MONGO_POOL_SIZE value");
                ConfigError::InvalidValue("Invalid MONGO_POOL_SIZE value".to_string())
            })?;
        debug!("MongoDB pool size: {}", pool_size);

        let connection_timeout_secs = env::var("MONGO_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| {
                debug!("MONGO_CONNECTION_TIMEOUT not set, using default: 5 seconds");
                "5".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid MONGO_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid MONGO_CONNECTION_TIMEOUT value".to_string())
            })?;
        debug!("MongoDB connection timeout: {} seconds", connection_timeout_secs);

        let config = MongoConfig {
            uri,
            database,
            username,
            password,
            movie_collection,
            user_collection,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    /// Create MongoConfig for testing
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: DEFAULT_MONGO_URI.to_string(),
            database: "MovieDB_test".to_string(),
            username: None,
            password: None,
            movie_collection: "test_movies".to_string(),
            user_collection: "test_users".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        debug!("Validating MongoDB configuration");

        if self.uri.is_empty() {
            error!("MongoDB URI is empty");
            return Err(ConfigError::ValidationError("MongoDB URI cannot be empty".to_string()));
        }

        if self.database.is_empty() {
            error!("MongoDB database is empty");
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }

        if self.movie_collection.is_empty() || self.user_collection.is_empty() {
            error!("MongoDB collection name is empty");
            return Err(ConfigError::ValidationError(
                "MongoDB collection names cannot be empty".to_string(),
            ));
        }

        if self.pool_size == 0 {
            error!("MongoDB pool size is 0");
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            error!("MongoDB connection timeout is 0");
            return Err(ConfigError::ValidationError(
                "MongoDB connection timeout must be greater than 0".to_string(),
            ));
        }

        if let Some(ref user) = self.username {
            if user.is_empty() {
                error!("MongoDB username is empty");
                return Err(ConfigError::ValidationError("MongoDB username cannot be empty if set".to_string()));
            }
        }
        if let Some(ref pass) = self.password {
            if pass.is_empty() {
                error!("MongoDB password is empty");
                return Err(ConfigError::ValidationError("MongoDB password cannot be empty if set".to_string()));
            }
        }
        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: DEFAULT_MONGO_URI.to_string(),
            database: DEFAULT_MONGO_DATABASE.to_string(),
            username: None,
            password: None,
            movie_collection: "movies".to_string(),
            user_collection: "users".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
