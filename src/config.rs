use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub github: GitHubSettings,
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub request_timeout: Duration,
}

/// Read-only settings shared by every GitHub fetch.
#[derive(Debug, Clone)]
pub struct GitHubSettings {
    pub token: Option<String>,
    pub base_url: String,
}

impl GitHubSettings {
    pub fn new(token: Option<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self::new(None, base_url)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self::anonymous(DEFAULT_API_BASE)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("GITHUB_TOKEN").ok();
        let base_url = env::var("GITHUB_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let anthropic_api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let llm_model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            github: GitHubSettings::new(token, base_url),
            anthropic_api_key,
            llm_model,
            request_timeout,
        })
    }

    pub fn require_anthropic_key(&self) -> Result<&str> {
        self.anthropic_api_key.as_deref().ok_or_else(|| {
            Error::Config("ANTHROPIC_API_KEY environment variable not set".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_anonymous() {
        let settings = GitHubSettings::new(Some("   ".to_string()), DEFAULT_API_BASE);
        assert!(!settings.has_token());

        let settings = GitHubSettings::new(Some("ghp_abc".to_string()), DEFAULT_API_BASE);
        assert!(settings.has_token());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let settings = GitHubSettings::anonymous("http://localhost:8080/");
        assert_eq!(settings.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_missing_llm_key() {
        let config = Config {
            github: GitHubSettings::default(),
            anthropic_api_key: None,
            llm_model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(1),
        };
        assert!(matches!(config.require_anthropic_key(), Err(Error::Config(_))));
    }
}
