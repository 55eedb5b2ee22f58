use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReibunError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Deck name {0} not found.")]
    DeckNotFound(String),

    #[error("Note type {0} not found.")]
    ModelNotFound(String),

    #[error("Environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Model response contained no message content")]
    EmptyResponse,

    #[error("ReibunError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for ReibunError {
    fn from(error: std::io::Error) -> Self {
        ReibunError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for ReibunError {
    fn from(error: reqwest::Error) -> Self {
        ReibunError::Reqwest(Box::new(error))
    }
}
