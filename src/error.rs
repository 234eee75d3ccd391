//! Error types for the celebrity quiz.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the celebrity quiz.
///
/// Answer matching itself never fails; these cover the collaborators around it.
#[derive(Error, Debug)]
pub enum Error {
    // Catalog errors
    #[error("Celebrity catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("Invalid celebrity catalog: {0}")]
    InvalidCatalog(String),

    #[error("Celebrity catalog is empty")]
    EmptyCatalog,

    #[error("Celebrity not found in catalog: {0}")]
    CelebrityNotFound(String),

    #[error("Celebrity already in catalog: {0}")]
    DuplicateCelebrity(String),

    // Quiz session errors
    #[error("A quiz is already running in channel {0}")]
    QuizAlreadyActive(String),

    #[error("No active quiz in channel {0}")]
    NoActiveQuiz(String),

    // Wikipedia errors
    #[error("Wikipedia request failed: {0}")]
    WikipediaError(String),

    #[error("Wikipedia page not found: {0}")]
    PageNotFound(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // TOML errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
