//! In-process mock of the quiz service, served over real HTTP on a loopback port.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use wq_model::{
    Difficulty, HistoryEntry, KeyEntities, Question, Quiz, QuizId, UrlPreview, UrlRequest,
};

/// A request as observed by the mock service
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Inner {
    quizzes: Vec<Quiz>,
    seen: Vec<SeenRequest>,
}

#[derive(Clone, Default)]
pub struct MockService {
    inner: Arc<Mutex<Inner>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.inner.lock().unwrap().seen.clone()
    }

    /// Router implementing the four quiz service endpoints
    pub fn router(&self) -> Router {
        Router::new()
            .route("/generate_quiz", post(generate_quiz))
            .route("/history", get(history))
            .route("/quiz/{id}", get(quiz_by_id))
            .route("/url/preview", post(preview_url))
            .layer(middleware::from_fn_with_state(self.clone(), record_request))
            .with_state(self.clone())
    }
}

/// Bind `router` on an ephemeral loopback port and return its base URL
pub async fn serve(router: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    Ok(format!("http://{addr}"))
}

/// Base URL of a port nothing is listening on
pub async fn unreachable_base_url() -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

/// Router where every endpoint fails without a `detail` string
pub fn failing_router() -> Router {
    Router::new()
        .route(
            "/generate_quiz",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
        )
        .route(
            "/history",
            get(|| async { (StatusCode::BAD_GATEWAY, Json(json!({ "error": "upstream" }))) }),
        )
        .route(
            "/quiz/{id}",
            get(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": [{ "loc": ["path", "id"], "msg": "value is not a valid integer" }] })),
                )
            }),
        )
        .route(
            "/url/preview",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "detail": "" }))) }),
        )
}

/// Router answering every endpoint with `200 OK` and a body that is not JSON
pub fn garbage_router() -> Router {
    Router::new()
        .route("/history", get(|| async { "<html>definitely not json</html>" }))
        .route(
            "/quiz/{id}",
            get(|| async { Json(json!({ "id": 1, "quiz": [{ "question": "missing options" }] })) }),
        )
}

async fn record_request(State(service): State<MockService>, req: Request, next: Next) -> Response {
    let seen = SeenRequest::from_request(&req);
    service.inner.lock().unwrap().seen.push(seen);

    next.run(req).await
}

impl SeenRequest {
    fn from_request(req: &Request) -> Self {
        let headers = req.headers();
        let header_value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            content_type: header_value(header::CONTENT_TYPE),
            authorization: header_value(header::AUTHORIZATION),
        }
    }
}

fn is_article_url(url: &str) -> bool {
    url.contains("wikipedia.org/wiki/")
}

fn invalid_url() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "detail": "Provide a valid Wikipedia article URL." })),
    )
        .into_response()
}

fn article_title(url: &str) -> String {
    url.rsplit('/').next().unwrap_or_default().replace('_', " ")
}

/// Deterministic three-question quiz for an article
pub fn sample_quiz(id: i64, url: &str) -> Quiz {
    let title = article_title(url);
    let question = |text: &str, answer: &str, difficulty| Question {
        text: text.to_string(),
        options: ["Alpha", "Beta", "Gamma", "Delta"].map(String::from).to_vec(),
        answer: answer.to_string(),
        explanation: format!("{answer} is stated in the article."),
        difficulty,
    };

    Quiz {
        id: Some(QuizId(id)),
        url: url.to_string(),
        title: title.clone(),
        summary: format!("{title} is the subject of this article."),
        key_entities: KeyEntities {
            people: vec!["Ada Lovelace".to_string()],
            organizations: vec![],
            locations: vec!["London".to_string()],
        },
        sections: vec!["History".to_string(), "Legacy".to_string()],
        questions: vec![
            question("First?", "Beta", Difficulty::Easy),
            question("Second?", "Alpha", Difficulty::Medium),
            question("Third?", "Gamma", Difficulty::Hard),
        ],
        related_topics: vec!["Computing".to_string()],
    }
}

async fn generate_quiz(
    State(service): State<MockService>,
    Json(body): Json<UrlRequest>,
) -> Response {
    if !is_article_url(&body.url) {
        return invalid_url();
    }

    let mut inner = service.inner.lock().unwrap();
    if let Some(existing) = inner.quizzes.iter().find(|q| q.url == body.url) {
        return Json(existing.clone()).into_response();
    }

    let id = inner.quizzes.len() as i64 + 1;
    let quiz = sample_quiz(id, &body.url);
    inner.quizzes.push(quiz.clone());
    Json(quiz).into_response()
}

async fn history(State(service): State<MockService>) -> Json<Vec<HistoryEntry>> {
    let inner = service.inner.lock().unwrap();
    let entries = inner
        .quizzes
        .iter()
        .rev()
        .filter_map(|quiz| {
            Some(HistoryEntry {
                id: quiz.id?,
                title: quiz.title.clone(),
                url: quiz.url.clone(),
                date_generated: None,
            })
        })
        .collect();
    Json(entries)
}

async fn quiz_by_id(State(service): State<MockService>, Path(id): Path<i64>) -> Response {
    let inner = service.inner.lock().unwrap();
    match inner.quizzes.iter().find(|q| q.id == Some(QuizId(id))) {
        Some(quiz) => Json(quiz.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Quiz not found" })),
        )
            .into_response(),
    }
}

async fn preview_url(Json(body): Json<UrlRequest>) -> Response {
    if !is_article_url(&body.url) {
        return invalid_url();
    }

    let title = article_title(&body.url);
    Json(UrlPreview {
        summary: format!("{title} is the subject of this article."),
        title,
        url: Some(body.url),
    })
    .into_response()
}
