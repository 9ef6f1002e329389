use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemasterError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Settings store error: {0}")]
    Store(String),

    #[error("Selection query error: {0}")]
    Query(String),

    #[error("Invalid link base: {0}")]
    InvalidLinkBase(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, RemasterError>;
