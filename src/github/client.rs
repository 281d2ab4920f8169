use chrono::NaiveDate;
use reqwest::{header, Client, Response, StatusCode, Url};
use serde_json::Value;

use crate::activity::{reconstruct, today_utc};
use crate::config::GitHubSettings;
use crate::error::{Error, Result};
use crate::github::rate_limit::RateLimitSnapshot;
use crate::github::status::{status_error, Resource};
use crate::github::wire::{ApiRepository, ApiUser};
use crate::models::{ActivitySeries, Profile, Repository, Username};

/// Single-page cap for repository and event listings. No further pages are
/// requested.
pub const MAX_PAGE_ITEMS: usize = 100;

const PER_PAGE: &str = "100";

pub struct GitHubClient {
    client: Client,
    base_url: Url,
    authenticated: bool,
}

impl GitHubClient {
    pub fn new(settings: &GitHubSettings) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("gitpulse/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(token) = &settings.token {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token.trim()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            Error::Config(format!("invalid GitHub API base URL \"{}\": {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "GitHub API base URL \"{}\" cannot carry a path",
                settings.base_url
            )));
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url,
            authenticated: settings.has_token(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Base URL with `segments` appended. Each segment is percent-encoded on
    /// its own, so `/`, `?` and `#` inside a segment never leave it.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("GitHub API base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<(Response, RateLimitSnapshot)> {
        let url = self.endpoint(segments)?;
        tracing::debug!("Fetching: {}", url);

        let response = self.client.get(url).query(query).send().await?;
        let rate_limit = RateLimitSnapshot::from_headers(response.headers());
        if let Some(remaining) = rate_limit.remaining {
            tracing::debug!(remaining, "GitHub rate limit");
        }

        Ok((response, rate_limit))
    }

    /// Fetch and normalize a user's account metadata. Every failure is
    /// returned to the caller.
    pub async fn fetch_profile(&self, username: &Username) -> Result<Profile> {
        tracing::info!("Fetching profile: {}", username);
        let (response, rate_limit) = self.get(&["users", username.as_str()], &[]).await?;

        if !response.status().is_success() {
            return Err(status_error(
                Resource::Profile,
                username,
                response.status(),
                self.authenticated,
                &rate_limit,
            ));
        }

        let body = response.text().await?;
        let user: ApiUser = serde_json::from_str(&body).map_err(|e| {
            Error::MalformedResponse(format!("profile payload for {}: {}", username, e))
        })?;

        Ok(user.into())
    }

    /// Fetch up to [`MAX_PAGE_ITEMS`] owned repositories, most recently
    /// updated first.
    ///
    /// An authenticated 404 and a payload that is not a list both yield an
    /// empty list. Other failures are returned.
    pub async fn fetch_repositories(&self, username: &Username) -> Result<Vec<Repository>> {
        tracing::info!("Fetching repositories for: {}", username);
        let (response, rate_limit) = self
            .get(
                &["users", username.as_str(), "repos"],
                &[("type", "owner"), ("sort", "updated"), ("per_page", PER_PAGE)],
            )
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND && self.authenticated {
            tracing::warn!(
                "GitHub repositories not found for user \"{}\" or no public repositories accessible. Returning empty list.",
                username
            );
            return Ok(Vec::new());
        }

        if !status.is_success() {
            return Err(status_error(
                Resource::Repositories,
                username,
                status,
                self.authenticated,
                &rate_limit,
            ));
        }

        let body = response.text().await?;
        match decode_repositories(&body) {
            Ok(repos) => Ok(repos),
            Err(Error::MalformedResponse(reason)) => {
                tracing::warn!(
                    "Expected an array of repositories for {}, but received {}. Returning empty list.",
                    username,
                    reason
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Dense 365-day contribution series ending today (UTC).
    ///
    /// Never fails: any upstream problem yields an all-zero series.
    pub async fn fetch_activity(&self, username: &Username) -> ActivitySeries {
        self.fetch_activity_on(username, today_utc()).await
    }

    pub async fn fetch_activity_on(&self, username: &Username, today: NaiveDate) -> ActivitySeries {
        match self.fetch_events(username).await {
            Ok(events) => reconstruct(&events, today),
            Err(e) => {
                tracing::warn!(
                    "Could not fetch public events for {}: {}. Returning empty activity data.",
                    username,
                    e
                );
                ActivitySeries::empty(today)
            }
        }
    }

    async fn fetch_events(&self, username: &Username) -> Result<Value> {
        tracing::info!("Fetching public events for: {}", username);
        let (response, rate_limit) = self
            .get(
                &["users", username.as_str(), "events", "public"],
                &[("per_page", PER_PAGE)],
            )
            .await?;

        if !response.status().is_success() {
            return Err(status_error(
                Resource::Events,
                username,
                response.status(),
                self.authenticated,
                &rate_limit,
            ));
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("events payload: {}", e)))?;

        match payload {
            Value::Array(mut events) => {
                events.truncate(MAX_PAGE_ITEMS);
                Ok(Value::Array(events))
            }
            other => Err(Error::MalformedResponse(format!(
                "expected an array of events, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Decode a repository listing body, capped at [`MAX_PAGE_ITEMS`].
///
/// Entries that do not match the expected shape are skipped; a body that is
/// not a JSON array is a `MalformedResponse`.
fn decode_repositories(body: &str) -> Result<Vec<Repository>> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("invalid JSON ({})", e)))?;

    let Value::Array(items) = payload else {
        return Err(Error::MalformedResponse(json_kind(&payload).to_string()));
    };

    let repos = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<ApiRepository>(item) {
            Ok(repo) => Some(Repository::from(repo)),
            Err(e) => {
                tracing::warn!("Skipping malformed repository entry: {}", e);
                None
            }
        })
        .take(MAX_PAGE_ITEMS)
        .collect();

    Ok(repos)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
