use reqwest::StatusCode;

use crate::error::Error;
use crate::github::rate_limit::RateLimitSnapshot;
use crate::models::Username;

/// Which upstream listing a request was for; drives error wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Profile,
    Repositories,
    Events,
}

impl Resource {
    fn label(&self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::Repositories => "repositories",
            Resource::Events => "public events",
        }
    }

    fn token_scope(&self) -> &'static str {
        match self {
            Resource::Profile => "'user'",
            Resource::Repositories | Resource::Events => "'public_repo' or 'repo'",
        }
    }
}

/// Map a non-success status onto the error taxonomy.
///
/// `authenticated` selects the credential hint attached to 401/403 errors.
///
/// The status text in messages is the canonical reason phrase for the code,
/// not the phrase the server sent; reqwest does not surface the latter.
/// Codes without a canonical phrase read `No status text`.
pub fn status_error(
    resource: Resource,
    username: &Username,
    status: StatusCode,
    authenticated: bool,
    rate_limit: &RateLimitSnapshot,
) -> Error {
    let canonical_text = status.canonical_reason().unwrap_or("No status text");

    if status == StatusCode::NOT_FOUND && resource == Resource::Profile {
        return Error::NotFound(format!("GitHub user \"{}\" not found.", username));
    }

    let summary = format!(
        "Failed to fetch GitHub {} for {}: {} {}",
        resource.label(),
        username,
        status.as_u16(),
        canonical_text
    );

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let mut message = format!("{}.", summary);
        if authenticated {
            message.push_str(&format!(
                " This usually means the provided GITHUB_TOKEN is invalid, expired, or lacks the necessary {} scope. Please verify your token and its permissions on GitHub.",
                resource.token_scope()
            ));
        } else {
            message.push_str(
                " This may be due to GitHub API rate limits or lack of authentication. Please set a GITHUB_TOKEN to increase the limit and authenticate requests.",
            );
        }
        if rate_limit.is_exhausted() {
            match rate_limit.reset_at {
                Some(reset) => message.push_str(&format!(
                    " GitHub reports the rate limit is exhausted until {}.",
                    reset.format("%Y-%m-%d %H:%M:%S UTC")
                )),
                None => message.push_str(" GitHub reports the rate limit is exhausted."),
            }
        }
        return Error::Auth(message);
    }

    Error::Upstream(summary)
}
