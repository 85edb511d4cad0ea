//! Tests for the API client

use super::*;
use crate::locator::RepoLocator;

#[test]
fn test_api_client_config_creation() {
    let github_config = ApiClientConfig::github(Some("test_token".to_string()));
    assert_eq!(github_config.base_url, "https://api.github.com");
    assert_eq!(github_config.access_token, Some("test_token".to_string()));
    assert_eq!(github_config.timeout_seconds, 30);

    let tuned = ApiClientConfig::github(None)
        .with_timeout(60)
        .with_user_agent("gitscope-test/0.0");
    assert_eq!(tuned.timeout_seconds, 60);
    assert_eq!(tuned.user_agent, "gitscope-test/0.0");
}

#[test]
fn test_github_client_creation() {
    let locator = RepoLocator::parse("rust-lang/cargo").unwrap();
    let client = GitHubClient::new(locator, ApiClientConfig::github(None));
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_http_client_creation() {
    let config = ApiClientConfig::github(None);
    let client = create_http_client(&config);
    assert!(client.is_ok());
}

#[test]
fn test_repo_entry_creation() {
    let entry = RepoEntry {
        name: "main.py".to_string(),
        path: "src/main.py".to_string(),
        entry_type: "file".to_string(),
        size: 1024,
    };

    assert_eq!(entry.name, "main.py");
    assert_eq!(entry.path, "src/main.py");
    assert_eq!(entry.entry_type, "file");
    assert_eq!(entry.size, 1024);
}

// Wire-format tests: these exercise the serde shapes against captured
// response bodies, without any network access.

#[test]
fn test_listing_deserialization() {
    let body = r#"[
        {"name": "src", "path": "src", "sha": "a1", "size": 0, "type": "dir"},
        {"name": "app.py", "path": "app.py", "sha": "b2", "size": 2048, "type": "file"}
    ]"#;

    let entries: Vec<super::github::GitHubContentEntry> =
        serde_json::from_str(body).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].entry_type, "dir");
    assert_eq!(entries[1].name, "app.py");
    assert_eq!(entries[1].size, Some(2048));
}

#[test]
fn test_commit_summary_deserialization() {
    let body = r#"[{
        "sha": "abc123",
        "author": {"login": "octocat"},
        "commit": {"author": {"name": "Octo Cat", "date": "2026-01-15T10:30:00Z"}}
    },
    {
        "sha": "def456",
        "author": null,
        "commit": {"author": {"name": "Ghost", "date": "2026-01-14T08:00:00Z"}}
    }]"#;

    let commits: Vec<super::github::GitHubCommitSummary> =
        serde_json::from_str(body).unwrap();
    assert_eq!(commits.len(), 2);
    assert_eq!(
        commits[0].author.as_ref().map(|a| a.login.as_str()),
        Some("octocat")
    );
    assert!(commits[1].author.is_none());
}

#[test]
fn test_contributor_deserialization() {
    let body = r#"[
        {"login": "octocat", "contributions": 42},
        {"contributions": 7}
    ]"#;

    let contributors: Vec<super::github::GitHubContributor> =
        serde_json::from_str(body).unwrap();
    assert_eq!(contributors.len(), 2);
    assert_eq!(contributors[0].login.as_deref(), Some("octocat"));
    assert_eq!(contributors[1].contributions, 7);
    assert!(contributors[1].login.is_none());
}
