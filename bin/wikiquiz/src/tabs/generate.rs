use wq_api::{ClientError, validation::validate_article_url};
use wq_model::{Quiz, UrlPreview};

use super::user_message;

const PREVIEW_FALLBACK: &str = "Could not preview URL.";
const GENERATE_FALLBACK: &str = "Could not generate quiz. Invalid URL or server error.";

/// How a generated quiz is presented
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Questions with answers and explanations
    #[default]
    Review,
    /// Interactive attempt
    Take,
}

/// State of the "Generate Quiz" tab
#[derive(Debug, Default)]
pub struct GenerateTab {
    url: String,
    quiz: Option<Quiz>,
    preview: Option<UrlPreview>,
    error: Option<String>,
    loading: bool,
    preview_loading: bool,
    mode: Mode,
}

impl GenerateTab {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn preview(&self) -> Option<&UrlPreview> {
        self.preview.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[cfg(test)]
    fn is_loading(&self) -> bool {
        self.loading
    }

    #[cfg(test)]
    fn is_preview_loading(&self) -> bool {
        self.preview_loading
    }

    /// Replace the URL being edited. A preview of the previous URL no longer applies.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.preview = None;
    }

    /// Switch between review and take mode. Only meaningful once a quiz is loaded.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.quiz.is_some() {
            self.mode = mode;
        }
    }

    /// Validate the URL and mark a preview as in flight.
    ///
    /// Returns the URL to request, or `None` when the URL is invalid (the error is set) or a
    /// request is already running.
    pub fn begin_preview(&mut self) -> Option<String> {
        if self.preview_loading || self.loading {
            return None;
        }

        match validate_article_url(&self.url) {
            Ok(url) => {
                self.preview_loading = true;
                self.error = None;
                Some(url)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub fn finish_preview(&mut self, result: Result<UrlPreview, ClientError>) {
        match result {
            Ok(preview) => self.preview = Some(preview),
            Err(err) => {
                self.error = Some(user_message(&err, PREVIEW_FALLBACK));
                self.preview = None;
            }
        }
        self.preview_loading = false;
    }

    /// Validate the URL and mark a generation as in flight, dropping the previous quiz.
    ///
    /// Returns the URL to request, or `None` when the URL is invalid (the error is set) or a
    /// generation is already running.
    pub fn begin_generate(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }

        match validate_article_url(&self.url) {
            Ok(url) => {
                self.loading = true;
                self.error = None;
                self.quiz = None;
                Some(url)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    /// Store the generated quiz and show it in review mode
    pub fn finish_generate(&mut self, url: String, result: Result<Quiz, ClientError>) {
        match result {
            Ok(quiz) => {
                tracing::info!(quiz_id = ?quiz.id, title = %quiz.title, "quiz generated");
                self.quiz = Some(quiz);
                self.mode = Mode::Review;
                self.url = url;
            }
            Err(err) => self.error = Some(user_message(&err, GENERATE_FALLBACK)),
        }
        self.loading = false;
    }
}
