use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ClientError;

/// Prefix shared by every configuration variable
pub const ENV_PREFIX: &str = "WIKIQUIZ_";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Client configuration, read from `WIKIQUIZ_*` environment variables.
///
/// | Variable | Default |
/// |---|---|
/// | `WIKIQUIZ_API_BASE_URL` | `http://localhost:8000` |
/// | `WIKIQUIZ_REQUEST_TIMEOUT_SECS` | `120` |
/// | `WIKIQUIZ_ENV` | `production` |
/// | `WIKIQUIZ_LOG_DIR` | unset (log to stderr) |
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    // Must cover generation, which waits on article scraping and the LLM.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub env: Environment,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            env: Environment::default(),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ClientError> {
        Ok(envy::prefixed(ENV_PREFIX).from_env()?)
    }

    /// Same as [`ClientConfig::from_env`] but reading from explicit key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter(vars)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.env, Environment::Production);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_prefixed_overrides() {
        let config = ClientConfig::from_vars(vars(&[
            ("WIKIQUIZ_API_BASE_URL", "https://quiz.example.com/api"),
            ("WIKIQUIZ_REQUEST_TIMEOUT_SECS", "15"),
            ("WIKIQUIZ_ENV", "development"),
            ("WIKIQUIZ_LOG_DIR", "/tmp/wikiquiz"),
            ("API_BASE_URL", "http://ignored"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://quiz.example.com/api");
        assert_eq!(config.request_timeout_secs, 15);
        assert!(config.env.is_development());
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/wikiquiz")));
    }

    #[test]
    fn test_invalid_values() {
        assert!(ClientConfig::from_vars(vars(&[("WIKIQUIZ_REQUEST_TIMEOUT_SECS", "soon")])).is_err());
        assert!(ClientConfig::from_vars(vars(&[("WIKIQUIZ_ENV", "staging")])).is_err());
    }
}
