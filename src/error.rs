//! Error types for gun-http

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Adapter error: {0}")]
    Adapter(String),

    #[error("Adapter does not implement {0}")]
    Unsupported(&'static str),

    #[error("Adapter exposes no {0} capability")]
    NoCapability(&'static str),

    #[error("Invalid graph data: {0}")]
    InvalidGraph(String),

    #[error("Request body is missing")]
    MissingBody,

    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error("Invalid route pattern: {0}")]
    Route(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Route(err.to_string())
    }
}

impl From<axum::Error> for Error {
    fn from(err: axum::Error) -> Self {
        Error::Body(err.to_string())
    }
}
