use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected exactly one active page, found {active}")]
    InvariantViolation { active: usize },

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("No pages matched selector: {0}")]
    NoPages(String),

    #[error("Initialization error: {0}")]
    Init(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
