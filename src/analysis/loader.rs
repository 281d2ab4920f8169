use std::time::Duration;

use chrono::NaiveDate;
use futures::future::join3;
use serde::Serialize;
use tokio::time::timeout;

use crate::activity::today_utc;
use crate::analysis::{language_distribution, top_repositories};
use crate::error::{Error, Result};
use crate::github::GitHubClient;
use crate::models::{ActivitySeries, LanguageShare, Profile, Repository, Username};

/// Everything the dashboard shows for one user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub profile: Profile,
    pub repositories: Vec<Repository>,
    pub activity: ActivitySeries,
    /// Non-fatal problems hit while loading repositories or activity.
    pub warnings: Vec<String>,
}

impl Dashboard {
    pub fn languages(&self) -> Vec<LanguageShare> {
        language_distribution(&self.repositories)
    }

    pub fn top_repositories(&self, n: usize) -> Vec<Repository> {
        top_repositories(&self.repositories, n)
    }
}

pub struct DashboardLoader {
    github: GitHubClient,
    request_timeout: Duration,
}

impl DashboardLoader {
    pub fn new(github: GitHubClient, request_timeout: Duration) -> Self {
        Self {
            github,
            request_timeout,
        }
    }

    pub fn github(&self) -> &GitHubClient {
        &self.github
    }

    /// Validate `raw_username` and load the dashboard for it.
    pub async fn load(&self, raw_username: &str) -> Result<Dashboard> {
        let username = Username::parse(raw_username)?;
        self.load_on(&username, today_utc()).await
    }

    /// Run the three fetches concurrently. Only a profile failure aborts.
    pub async fn load_on(&self, username: &Username, today: NaiveDate) -> Result<Dashboard> {
        tracing::info!("Loading dashboard for: {}", username);

        let (profile, repositories, activity) = join3(
            timeout(self.request_timeout, self.github.fetch_profile(username)),
            timeout(self.request_timeout, self.github.fetch_repositories(username)),
            timeout(
                self.request_timeout,
                self.github.fetch_activity_on(username, today),
            ),
        )
        .await;

        let profile = match profile {
            Ok(result) => result?,
            Err(_) => {
                return Err(Error::Timeout(format!(
                    "GitHub profile for {} did not respond within {:?}",
                    username, self.request_timeout
                )))
            }
        };

        let mut warnings = Vec::new();

        let repositories = match repositories {
            Ok(Ok(repos)) => repos,
            Ok(Err(e)) => {
                tracing::warn!("Repositories unavailable for {}: {}", username, e);
                warnings.push(e.to_string());
                Vec::new()
            }
            Err(_) => {
                let message = format!(
                    "GitHub repositories for {} did not respond within {:?}",
                    username, self.request_timeout
                );
                tracing::warn!("{}", message);
                warnings.push(message);
                Vec::new()
            }
        };

        let activity = match activity {
            Ok(series) => series,
            Err(_) => {
                let message = format!(
                    "GitHub public events for {} did not respond within {:?}",
                    username, self.request_timeout
                );
                tracing::warn!("{}", message);
                warnings.push(message);
                ActivitySeries::empty(today)
            }
        };

        tracing::info!(
            repositories = repositories.len(),
            contributions = activity.total_contributions(),
            "Dashboard loaded for {}",
            profile.login
        );

        Ok(Dashboard {
            profile,
            repositories,
            activity,
            warnings,
        })
    }
}
