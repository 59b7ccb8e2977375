use mongodb::error::{ErrorKind, WriteFailure};

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Already Exists: {0}")]
    AlreadyExists(String),
    #[error("Validation Error: {0}")]
    ValidationError(String),
    #[error("Database Error: {0}")]
    DatabaseError(String),
    #[error("Connection Error: {0}")]
    ConnectionError(String),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
    /// Any other driver error
    #[error("Repository Error: {0}")]
    Generic(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    pub fn already_exists<T: Into<String>>(msg: T) -> Self {
        RepositoryError::AlreadyExists(msg.into())
    }
}

/// Server-side message of a duplicate key error, e.g.
/// `E11000 duplicate key error collection: MovieDB.users index: username_1 dup key: { ... }`.
fn duplicate_key_message(err: &mongodb::error::Error) -> Option<String> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE => Some(e.message.clone()),
        ErrorKind::Command(e) if e.code == DUPLICATE_KEY_CODE => Some(e.message.clone()),
        _ => {
            let msg = err.to_string();
            if msg.contains("E11000") {
                Some(msg)
            } else {
                None
            }
        }
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        if let Some(msg) = duplicate_key_message(&err) {
            return RepositoryError::AlreadyExists(msg);
        }
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) => RepositoryError::DatabaseError(e.message.clone()),
            ErrorKind::Write(_) => RepositoryError::DatabaseError(format!("Write error: {}", err)),
            ErrorKind::Authentication { .. } => {
                RepositoryError::ConnectionError(format!("Authentication failed: {}", err))
            }
            ErrorKind::ServerSelection { message, .. } => RepositoryError::ConnectionError(message.clone()),
            ErrorKind::Io(_) => RepositoryError::ConnectionError(format!("IO error: {}", err)),
            ErrorKind::InvalidArgument { message, .. } => RepositoryError::ValidationError(message.clone()),
            ErrorKind::BsonSerialization(_) => RepositoryError::SerializationError(err.to_string()),
            ErrorKind::BsonDeserialization(_) => RepositoryError::SerializationError(err.to_string()),
            _ => RepositoryError::Generic(Box::new(err)),
        }
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::SerializationError(format!("BSON serialization error: {}", err))
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::SerializationError(format!("BSON deserialization error: {}", err))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
