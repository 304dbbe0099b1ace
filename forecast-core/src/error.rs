use thiserror::Error;

/// Ways a single fetch can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The provider answered with a structured error, e.g. an unknown city.
    #[error("provider error: {0}")]
    Provider(String),

    /// Network failure, unreadable body or unexpected JSON shape.
    #[error("fetch error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
