//! View state for the two tabs of the interactive shell.
//!
//! Each tab owns its state outright. Network calls are split into a `begin_*` step that
//! validates input and flags the request as in flight, and a `finish_*` step that folds the
//! result back in, so the state transitions stay independent of the HTTP client.

pub mod generate;
pub mod history;

pub use generate::{GenerateTab, Mode};
pub use history::HistoryTab;

use wq_api::ClientError;

/// Text shown inline for a failed request.
///
/// Validation and service errors already carry a user-facing message; anything else is
/// replaced by `fallback` and logged.
fn user_message(err: &ClientError, fallback: &str) -> String {
    match err {
        ClientError::Validation(message) | ClientError::Service { message, .. } => message.clone(),
        other => {
            tracing::warn!(error = %other, "request failed");
            fallback.to_string()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Generate,
    History,
}

impl Tab {
    pub const ALL: [Self; 2] = [Self::Generate, Self::History];

    pub const fn other(self) -> Self {
        match self {
            Self::Generate => Self::History,
            Self::History => Self::Generate,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Generate => "Generate Quiz",
            Self::History => "Past Quizzes",
        }
    }
}
