use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Rejected before any request was sent
    #[error("{0}")]
    Validation(String),
    /// The quiz service answered with a non-success status
    #[error("{message}")]
    Service { status: StatusCode, message: String },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response from the quiz service: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid API base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),
    #[error("Failed to open log file: {0}")]
    Logging(#[from] tracing_appender::rolling::InitError),
}

impl ClientError {
    /// HTTP status reported by the service, when the failure came from one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }
}
