pub mod cast;
pub mod error;
pub mod logger;
pub mod validation;
