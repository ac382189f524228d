use thiserror::Error;

#[derive(Error, Debug)]
pub enum KokoroError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("API Error: {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("no reply received from the completion API")]
    EmptyResponse,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, KokoroError>;
