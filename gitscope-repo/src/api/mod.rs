//! API client for accessing remote repositories
//!
//! Provides direct access to repository content, commit history, and
//! contributor data without cloning.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gitscope_core::{ErrorContext, GitScopeError, GitScopeResult};
use serde::{Deserialize, Serialize};

pub mod github;

#[cfg(test)]
mod tests;

pub use github::GitHubClient;

/// One entry of a directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoEntry {
    /// Entry name (last path segment)
    pub name: String,
    /// Path relative to the repository root
    pub path: String,
    /// Entry type as reported by the API ("file" or "dir" expected)
    pub entry_type: String,
    /// Size in bytes (0 for directories)
    pub size: u64,
}

/// Repository metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub name: String,
    pub owner: String,
    pub description: Option<String>,
    pub default_branch: String,
    /// Primary language as reported by the platform
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One commit with its changed files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    /// Platform login of the author, if the commit is linked to an account
    pub author_login: Option<String>,
    pub authored_at: DateTime<Utc>,
    /// Paths touched by this commit
    pub files: Vec<String>,
}

/// One contributor with their total contribution count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorRecord {
    pub login: String,
    pub contributions: u64,
}

/// Configuration for API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Access token for authentication
    pub access_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            access_token: None,
            timeout_seconds: 30,
            user_agent: "gitscope/0.1".to_string(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new configuration for GitHub
    pub fn github(access_token: Option<String>) -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            access_token,
            ..Default::default()
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
}

/// Trait for repository API clients
///
/// All calls are blocking from the pipeline's point of view: the analysis
/// awaits each one in sequence and never overlaps fetches.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Get repository metadata
    async fn metadata(&self) -> GitScopeResult<RepositoryMetadata>;

    /// List the immediate entries of one directory (non-recursive)
    async fn list_dir(&self, path: &str) -> GitScopeResult<Vec<RepoEntry>>;

    /// Get the decoded UTF-8 content of a file
    async fn get_text(&self, path: &str) -> GitScopeResult<String>;

    /// Get recent commits (one page), each with its changed-file list
    async fn commits_since(&self, since: DateTime<Utc>) -> GitScopeResult<Vec<CommitRecord>>;

    /// Get contributors (one page), ranked by the platform
    async fn contributors(&self) -> GitScopeResult<Vec<ContributorRecord>>;
}

/// Helper function to create an HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> GitScopeResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            GitScopeError::Repository {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?,
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| GitScopeError::Repository {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })?;

    Ok(client)
}

/// Helper function to map HTTP error responses onto the error taxonomy.
///
/// Not-found and rate-limit responses get their own variants so callers can
/// distinguish them; the analysis core recovers from all of them the same
/// way.
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    operation: &str,
) -> GitScopeError {
    let status = response.status();
    let url = response.url().clone();

    let error_body = response.text().await.unwrap_or_default();
    let reason = if error_body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        error_body
    };

    match status.as_u16() {
        404 => GitScopeError::NotFound {
            resource: url.to_string(),
            context: ErrorContext::new("api_client")
                .with_operation(operation)
                .with_suggestion("Repository or path not found or not accessible"),
        },
        403 | 429 => GitScopeError::RateLimit {
            message: format!("HTTP {} for {}: {}", status.as_u16(), url, reason),
            retry_after_ms: None,
            context: ErrorContext::new("api_client")
                .with_operation(operation)
                .with_suggestion("Check repository permissions or API rate limits")
                .with_suggestion("Provide an access token with -t/--token"),
        },
        _ => GitScopeError::Repository {
            message: format!("HTTP {} error for {}: {}", status.as_u16(), url, reason),
            source: None,
            context: ErrorContext::new("api_client")
                .with_operation(operation)
                .with_suggestion(match status.as_u16() {
                    401 => "Check your access token",
                    _ => "Check network connectivity and API status",
                }),
        },
    }
}
