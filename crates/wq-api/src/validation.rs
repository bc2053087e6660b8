use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateUrl;

use crate::error::ClientError;

const MISSING_URL: &str = "Please provide a Wikipedia article URL.";
const INVALID_URL: &str = "Please provide a valid Wikipedia article URL.";

/// Host ending in `wikipedia.org` followed by a non-empty `/wiki/<article>` path
static WIKIPEDIA_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://([a-z0-9-]+\.)*wikipedia\.org/wiki/[^\s/?#][^\s]*$")
        .expect("article URL pattern is valid")
});

/// Validate a Wikipedia article URL typed by the user and return it trimmed.
///
/// Runs before any request is issued, so a rejected URL never reaches the network.
///
/// # Examples
/// ```
/// use wq_api::validation::validate_article_url;
///
/// assert!(validate_article_url(" https://en.wikipedia.org/wiki/Rust ").is_ok());
/// assert!(validate_article_url("https://example.com/wiki/Rust").is_err());
/// ```
pub fn validate_article_url(input: &str) -> Result<String, ClientError> {
    let url = input.trim();
    if url.is_empty() {
        return Err(ClientError::Validation(MISSING_URL.to_string()));
    }

    if !url.validate_url() || !WIKIPEDIA_ARTICLE.is_match(url) {
        return Err(ClientError::Validation(INVALID_URL.to_string()));
    }

    Ok(url.to_string())
}
