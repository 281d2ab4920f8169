use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gitpulse::models::{Username, SERIES_DAYS};
use gitpulse::{DashboardLoader, Error, ErrorKind, GitHubClient, GitHubSettings};

fn loader(server: &MockServer, timeout: Duration) -> DashboardLoader {
    let github = GitHubClient::new(&GitHubSettings::anonymous(server.uri())).unwrap();
    DashboardLoader::new(github, timeout)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

async fn mount_profile(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "name": null,
            "bio": "Mascot",
            "public_repos": 2,
            "followers": 1,
            "following": 0,
            "created_at": "2011-01-25T18:44:36Z"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn empty_username_rejected_before_any_request() {
    let server = MockServer::start().await;
    let result = loader(&server, Duration::from_secs(5)).load("   ").await;

    assert!(matches!(result, Err(Error::InvalidUsername(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn path_characters_in_username_rejected_before_any_request() {
    let server = MockServer::start().await;
    mount_profile(&server).await;
    let loader = loader(&server, Duration::from_secs(5));

    for raw in ["octocat#evil", "octocat?x=1", "evil/../octocat"] {
        let err = loader.load(raw).await.unwrap_err();
        assert!(matches!(err, Error::InvalidUsername(_)), "{raw}: {err}");
        assert!(err.to_string().contains(raw));
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn loads_all_three_sources() {
    let server = MockServer::start().await;
    mount_profile(&server).await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "a", "html_url": "https://github.com/octocat/a", "language": "Rust",
             "stargazers_count": 3, "updated_at": "2024-06-01T00:00:00Z"},
            {"name": "b", "html_url": "https://github.com/octocat/b", "language": "Rust",
             "stargazers_count": 9, "updated_at": "2024-05-01T00:00:00Z"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/events/public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"created_at": "2024-06-14T10:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let username = Username::parse(" octocat ").unwrap();
    let dashboard = loader(&server, Duration::from_secs(5))
        .load_on(&username, today())
        .await
        .unwrap();

    assert_eq!(dashboard.profile.login, "octocat");
    assert_eq!(dashboard.repositories.len(), 2);
    assert_eq!(dashboard.activity.len(), SERIES_DAYS);
    assert_eq!(dashboard.activity.total_contributions(), 1);
    assert!(dashboard.warnings.is_empty());

    assert_eq!(dashboard.top_repositories(1)[0].name, "b");
    let languages = dashboard.languages();
    assert_eq!(languages.len(), 1);
    assert_eq!(languages[0].repositories, 2);
}

#[tokio::test]
async fn profile_failure_aborts_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = loader(&server, Duration::from_secs(5))
        .load("ghost")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("ghost"));
}

#[tokio::test]
async fn repository_failure_does_not_abort() {
    let server = MockServer::start().await;
    mount_profile(&server).await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/events/public"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let username = Username::parse("octocat").unwrap();
    let dashboard = loader(&server, Duration::from_secs(5))
        .load_on(&username, today())
        .await
        .unwrap();

    assert!(dashboard.repositories.is_empty());
    assert_eq!(dashboard.warnings.len(), 1);
    assert!(dashboard.warnings[0].contains("500"));
    assert_eq!(dashboard.activity.len(), SERIES_DAYS);
    assert_eq!(dashboard.activity.total_contributions(), 0);
}

#[tokio::test]
async fn slow_profile_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = loader(&server, Duration::from_millis(100))
        .load("octocat")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout(_)));
    assert_eq!(err.kind(), ErrorKind::Upstream);
}

#[tokio::test]
async fn slow_activity_degrades_with_warning() {
    let server = MockServer::start().await;
    mount_profile(&server).await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/events/public"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let username = Username::parse("octocat").unwrap();
    let dashboard = loader(&server, Duration::from_millis(500))
        .load_on(&username, today())
        .await
        .unwrap();

    assert_eq!(dashboard.activity.len(), SERIES_DAYS);
    assert_eq!(dashboard.activity.last_date(), Some(today()));
    assert_eq!(dashboard.warnings.len(), 1);
    assert!(dashboard.warnings[0].contains("public events"));
}
