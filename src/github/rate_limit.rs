use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;

/// Rate-limit headers reported on a GitHub response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimitSnapshot {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<i64>().ok())
        };

        Self {
            limit: read("x-ratelimit-limit").and_then(|v| u32::try_from(v).ok()),
            remaining: read("x-ratelimit-remaining").and_then(|v| u32::try_from(v).ok()),
            reset_at: read("x-ratelimit-reset").and_then(|v| DateTime::from_timestamp(v, 0)),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}
