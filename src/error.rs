use thiserror::Error;

/// Error type for the check plugin
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Request to '{endpoint}' failed: {reason}")]
    Fetch { endpoint: String, reason: String },

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for the check plugin
pub type Result<T> = std::result::Result<T, CheckError>;

impl CheckError {
    /// Create an authentication error
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        CheckError::Auth(msg.into())
    }

    /// Create a fetch error for the given endpoint
    pub fn fetch<E: Into<String>, R: ToString>(endpoint: E, reason: R) -> Self {
        CheckError::Fetch {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        CheckError::Validation(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        CheckError::Config(msg.into())
    }
}
