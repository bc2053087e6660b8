use wq_api::ClientError;
use wq_model::{HistoryEntry, Quiz};

const LOAD_FALLBACK: &str = "Unable to load quiz history.";
const DETAILS_FALLBACK: &str = "Unable to fetch quiz details.";

/// State of the "Past Quizzes" tab
#[derive(Debug, Default)]
pub struct HistoryTab {
    entries: Vec<HistoryEntry>,
    selected: Option<Quiz>,
    details_open: bool,
    error: Option<String>,
    loading: bool,
}

impl HistoryTab {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&Quiz> {
        self.selected.as_ref()
    }

    pub fn details_open(&self) -> bool {
        self.details_open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark a history load as in flight. `false` when one is already running.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    /// Replace the list with the service's, keeping its order
    pub fn finish_load(&mut self, result: Result<Vec<HistoryEntry>, ClientError>) {
        match result {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "history loaded");
                self.entries = entries;
            }
            Err(err) => {
                tracing::warn!(error = %err, "history unavailable");
                self.error = Some(LOAD_FALLBACK.to_string());
            }
        }
        self.loading = false;
    }

    /// Show the fetched quiz, or the error when it could not be fetched
    pub fn open_details(&mut self, result: Result<Quiz, ClientError>) {
        match result {
            Ok(quiz) => {
                self.selected = Some(quiz);
                self.details_open = true;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "quiz details unavailable");
                self.error = Some(DETAILS_FALLBACK.to_string());
            }
        }
    }

    pub fn close_details(&mut self) {
        self.details_open = false;
        self.selected = None;
    }
}
