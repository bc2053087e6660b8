use std::time::{Duration, Instant};

use reqwest::{
    Client, RequestBuilder, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use wq_model::{HistoryEntry, Quiz, QuizId, UrlPreview, UrlRequest};

use crate::{config::ClientConfig, error::ClientError, metrics::record_api_request};

/// The remote operations offered by the quiz service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GenerateQuiz,
    History,
    FetchQuiz,
    PreviewUrl,
}

impl Operation {
    pub const fn name(self) -> &'static str {
        match self {
            Self::GenerateQuiz => "generate_quiz",
            Self::History => "history",
            Self::FetchQuiz => "fetch_quiz",
            Self::PreviewUrl => "preview_url",
        }
    }

    /// Message used when the service fails without a usable `detail`
    pub const fn default_error(self) -> &'static str {
        match self {
            Self::GenerateQuiz => "Quiz generation failed",
            Self::History => "Failed to fetch history",
            Self::FetchQuiz => "Failed to fetch quiz",
            Self::PreviewUrl => "Failed to preview URL",
        }
    }
}

/// HTTP client for the quiz service.
///
/// Every request carries `Content-Type: application/json` and no credentials. Failures are
/// reported straight back to the caller; nothing is retried.
#[derive(Clone, Debug)]
pub struct QuizClient {
    http: Client,
    base_url: String,
}

impl QuizClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::build(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Client for `base_url` with every other setting at its default
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::new(&ClientConfig {
            api_base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    fn build(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::BaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) URL".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base address every endpoint is resolved against, without a trailing `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask the service to generate (or return its cached) quiz for an article.
    #[tracing::instrument(skip(self))]
    pub async fn generate_quiz(&self, url: &str) -> Result<Quiz, ClientError> {
        let path = "/generate_quiz";
        let body = UrlRequest {
            url: url.to_string(),
        };
        let request = self.http.post(self.endpoint(path)).json(&body);
        self.send(Operation::GenerateQuiz, path, request).await
    }

    /// List previously generated quizzes, in the order the service returns them.
    #[tracing::instrument(skip(self))]
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        let path = "/history";
        let request = self.http.get(self.endpoint(path));
        self.send(Operation::History, path, request).await
    }

    /// Fetch a stored quiz by its identifier.
    #[tracing::instrument(skip(self))]
    pub async fn quiz(&self, id: QuizId) -> Result<Quiz, ClientError> {
        let path = format!("/quiz/{id}");
        let request = self.http.get(self.endpoint(&path));
        self.send(Operation::FetchQuiz, &path, request).await
    }

    /// Fetch the title and summary of an article without generating a quiz.
    #[tracing::instrument(skip(self))]
    pub async fn preview_url(&self, url: &str) -> Result<UrlPreview, ClientError> {
        let path = "/url/preview";
        let body = UrlRequest {
            url: url.to_string(),
        };
        let request = self.http.post(self.endpoint(path)).json(&body);
        self.send(Operation::PreviewUrl, path, request).await
    }

    async fn send<T>(
        &self,
        operation: Operation,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                record_api_request(operation.name(), path, "error", start.elapsed().as_secs_f64());
                tracing::debug!(operation = operation.name(), error = %err, "quiz service unreachable");
                return Err(err.into());
            }
        };

        let status = response.status();
        let body = response.bytes().await?;
        record_api_request(
            operation.name(),
            path,
            status.as_str(),
            start.elapsed().as_secs_f64(),
        );

        if !status.is_success() {
            let message =
                error_detail(&body).unwrap_or_else(|| operation.default_error().to_string());
            tracing::debug!(operation = operation.name(), %status, %message, "quiz service request failed");
            return Err(ClientError::Service { status, message });
        }

        tracing::debug!(operation = operation.name(), %status, bytes = body.len(), "quiz service responded");
        Ok(serde_json::from_slice(&body)?)
    }
}

/// The `detail` string of an error body, if the body is JSON and carries a non-empty one
fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
