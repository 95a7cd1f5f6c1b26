use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
