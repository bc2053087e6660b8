//! Client-side metrics for calls to the quiz service.
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the embedding
//! application installs a recorder.

use std::sync::LazyLock;

use metrics::{counter, histogram};
use regex::Regex;

static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+").expect("numeric segment pattern is valid"));

/// Record the outcome of one request to the quiz service.
///
/// `status` is the HTTP status code, or `"error"` when no response was received.
pub fn record_api_request(operation: &str, path: &str, status: &str, duration_secs: f64) {
    let path = normalize_path(path);

    counter!(
        "api_requests_total",
        "operation" => operation.to_string(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "api_request_duration_seconds",
        "operation" => operation.to_string(),
        "path" => path
    )
    .record(duration_secs);
}

/// Replace numeric path segments with `:id` to keep label cardinality bounded
fn normalize_path(path: &str) -> String {
    NUMERIC_SEGMENT.replace_all(path, "/:id").into_owned()
}
