use crate::contact::ValidationError;
use thiserror::Error;

/// All the ways things can go wrong in TourEase
///
/// The favorites store never returns these; storage trouble there is
/// logged and swallowed. Everything else (config, catalog, contact) does.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] tourease_storage::StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The contact service said no; the message is meant for the user
    #[error("{0}")]
    ContactRejected(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
