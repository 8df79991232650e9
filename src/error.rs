use thiserror::Error;

#[derive(Error, Debug)]
pub enum FractreeError {
    /// Malformed or incomplete compression envelope.
    #[error("envelope error: {0}")]
    Envelope(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Pattern registry load/save failure.
    #[error("registry error: {0}")]
    Registry(String),

    /// Propagated JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch all for unexpected internal problems.
    #[error("internal error: {0}")]
    Internal(String),
}
