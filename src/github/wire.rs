//! Raw GitHub REST payloads and their mapping onto the internal models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{Profile, Repository};

#[derive(Debug, Deserialize)]
pub(crate) struct ApiUser {
    pub login: String,
    pub avatar_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

impl From<ApiUser> for Profile {
    fn from(user: ApiUser) -> Self {
        Self {
            login: user.login,
            avatar_url: user.avatar_url,
            name: user.name,
            bio: user.bio,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            joined: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiRepository {
    pub name: String,
    pub html_url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl From<ApiRepository> for Repository {
    fn from(repo: ApiRepository) -> Self {
        Self {
            name: repo.name,
            url: repo.html_url,
            language: repo.language,
            stars: repo.stargazers_count,
            last_updated: repo.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_mapping() {
        let user: ApiUser = serde_json::from_value(json!({
            "login": "octocat",
            "id": 583231,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "name": "The Octocat",
            "bio": null,
            "public_repos": 8,
            "followers": 17000,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z"
        }))
        .unwrap();

        let profile = Profile::from(user);
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.name.as_deref(), Some("The Octocat"));
        assert_eq!(profile.bio, None);
        assert_eq!(profile.followers, 17000);
        assert_eq!(profile.joined.to_rfc3339(), "2011-01-25T18:44:36+00:00");
    }

    #[test]
    fn test_empty_name_is_not_null() {
        let user: ApiUser = serde_json::from_value(json!({
            "login": "octocat",
            "avatar_url": "",
            "name": "",
            "created_at": "2011-01-25T18:44:36Z"
        }))
        .unwrap();
        assert_eq!(user.name.as_deref(), Some(""));
        assert_eq!(user.bio, None);
    }

    #[test]
    fn test_repository_mapping() {
        let repo: ApiRepository = serde_json::from_value(json!({
            "name": "Hello-World",
            "html_url": "https://github.com/octocat/Hello-World",
            "language": null,
            "stargazers_count": 80,
            "updated_at": "2024-06-01T12:00:00Z"
        }))
        .unwrap();

        let repo = Repository::from(repo);
        assert_eq!(repo.url, "https://github.com/octocat/Hello-World");
        assert_eq!(repo.language, None);
        assert_eq!(repo.stars, 80);
    }

    #[test]
    fn test_negative_stars_rejected() {
        let result: Result<ApiRepository, _> = serde_json::from_value(json!({
            "name": "x",
            "html_url": "https://github.com/octocat/x",
            "language": "Rust",
            "stargazers_count": -1,
            "updated_at": "2024-06-01T12:00:00Z"
        }));
        assert!(result.is_err());
    }
}
