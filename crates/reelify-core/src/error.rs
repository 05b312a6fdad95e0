use reelify_models::MovieId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Neither the detail fetch nor the session's cached listing had the movie
    #[error("Movie {0} could not be loaded")]
    MovieUnavailable(MovieId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
