//! GitHub API client implementation

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use gitscope_core::{ErrorContext, GitScopeError, GitScopeResult};
use log::{debug, info, warn};
use serde::Deserialize;

use super::{
    create_http_client, handle_response_error, ApiClientConfig, CommitRecord, ContributorRecord,
    RepoEntry, RepositoryClient, RepositoryMetadata,
};
use crate::locator::RepoLocator;

/// GitHub API client bound to one repository
pub struct GitHubClient {
    client: reqwest::Client,
    config: ApiClientConfig,
    locator: RepoLocator,
}

/// GitHub repository response
#[derive(Debug, Deserialize)]
struct GitHubRepository {
    name: String,
    description: Option<String>,
    default_branch: String,
    language: Option<String>,
    stargazers_count: Option<u64>,
    forks_count: Option<u64>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

/// GitHub contents API listing entry
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubContentEntry {
    pub(crate) name: String,
    pub(crate) path: String,
    #[serde(rename = "type")]
    pub(crate) entry_type: String,
    pub(crate) size: Option<u64>,
}

/// GitHub content response for a single file
#[derive(Debug, Deserialize)]
struct GitHubContentResponse {
    content: String,
    encoding: String,
}

/// GitHub commit list item
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubCommitSummary {
    pub(crate) sha: String,
    pub(crate) author: Option<GitHubUser>,
    pub(crate) commit: GitHubCommitInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubUser {
    pub(crate) login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubCommitInfo {
    pub(crate) author: Option<GitHubCommitAuthor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubCommitAuthor {
    pub(crate) date: DateTime<Utc>,
}

/// GitHub commit detail response (only the changed files are consumed)
#[derive(Debug, Deserialize)]
struct GitHubCommitDetail {
    files: Option<Vec<GitHubCommitFile>>,
}

#[derive(Debug, Deserialize)]
struct GitHubCommitFile {
    filename: String,
}

/// GitHub contributor list item
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubContributor {
    pub(crate) login: Option<String>,
    pub(crate) contributions: u64,
}

impl GitHubClient {
    /// Create a new GitHub API client for one repository
    pub fn new(locator: RepoLocator, config: ApiClientConfig) -> GitScopeResult<Self> {
        let client = create_http_client(&config)?;

        info!(
            "Created GitHub API client for {} ({})",
            locator, config.base_url
        );

        Ok(Self {
            client,
            config,
            locator,
        })
    }

    /// Create authorization headers
    fn create_auth_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();

        if let Some(ref token) = self.config.access_token {
            if let Ok(auth_value) =
                reqwest::header::HeaderValue::from_str(&format!("token {}", token))
            {
                headers.insert(reqwest::header::AUTHORIZATION, auth_value);
            }
        }

        // GitHub API version
        if let Ok(accept_value) =
            reqwest::header::HeaderValue::from_str("application/vnd.github.v3+json")
        {
            headers.insert(reqwest::header::ACCEPT, accept_value);
        }

        headers
    }

    /// Make a GET request to the GitHub API
    async fn get_request(&self, endpoint: &str) -> GitScopeResult<reqwest::Response> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        debug!("Making GitHub API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.create_auth_headers())
            .send()
            .await
            .map_err(|e| GitScopeError::Repository {
                message: format!("Failed to make request to GitHub API: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("get_request"),
            })?;

        if !response.status().is_success() {
            return Err(handle_response_error(response, "github_api_request").await);
        }

        Ok(response)
    }

    /// Decode base64 content from the GitHub API
    fn decode_base64_content(&self, content: &str) -> GitScopeResult<String> {
        // Remove newlines and whitespace
        let cleaned_content = content.replace(['\n', '\r', ' '], "");

        let decoded_bytes =
            BASE64
                .decode(&cleaned_content)
                .map_err(|e| GitScopeError::Repository {
                    message: format!("Failed to decode base64 content: {}", e),
                    source: Some(Box::new(e)),
                    context: ErrorContext::new("github_api_client")
                        .with_operation("decode_base64_content"),
                })?;

        String::from_utf8(decoded_bytes).map_err(|e| GitScopeError::Repository {
            message: format!("Content is not valid UTF-8: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("github_api_client")
                .with_operation("decode_base64_content"),
        })
    }
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    async fn metadata(&self) -> GitScopeResult<RepositoryMetadata> {
        info!("Fetching GitHub repository metadata for {}", self.locator);

        let endpoint = format!("repos/{}/{}", self.locator.owner, self.locator.name);
        let response = self.get_request(&endpoint).await?;

        let github_repo: GitHubRepository =
            response.json().await.map_err(|e| GitScopeError::Repository {
                message: format!("Failed to parse repository metadata: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("metadata"),
            })?;

        Ok(RepositoryMetadata {
            name: github_repo.name,
            owner: self.locator.owner.clone(),
            description: github_repo.description,
            default_branch: github_repo.default_branch,
            language: github_repo.language,
            stars: github_repo.stargazers_count.unwrap_or(0),
            forks: github_repo.forks_count.unwrap_or(0),
            created_at: github_repo.created_at,
            updated_at: github_repo.updated_at,
        })
    }

    async fn list_dir(&self, path: &str) -> GitScopeResult<Vec<RepoEntry>> {
        debug!("Listing GitHub directory {}/{}", self.locator, path);

        let endpoint = format!(
            "repos/{}/{}/contents/{}",
            self.locator.owner, self.locator.name, path
        );
        let response = self.get_request(&endpoint).await?;

        let entries: Vec<GitHubContentEntry> =
            response.json().await.map_err(|e| GitScopeError::Repository {
                message: format!("Failed to parse directory listing: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("list_dir"),
            })?;

        Ok(entries
            .into_iter()
            .map(|entry| RepoEntry {
                name: entry.name,
                path: entry.path,
                entry_type: entry.entry_type,
                size: entry.size.unwrap_or(0),
            })
            .collect())
    }

    async fn get_text(&self, path: &str) -> GitScopeResult<String> {
        debug!("Fetching GitHub file content for {}/{}", self.locator, path);

        let endpoint = format!(
            "repos/{}/{}/contents/{}",
            self.locator.owner, self.locator.name, path
        );
        let response = self.get_request(&endpoint).await?;

        let content_response: GitHubContentResponse =
            response.json().await.map_err(|e| GitScopeError::Repository {
                message: format!("Failed to parse file content response: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("get_text"),
            })?;

        if content_response.encoding != "base64" {
            return Err(GitScopeError::Repository {
                message: format!("Unexpected encoding: {}", content_response.encoding),
                source: None,
                context: ErrorContext::new("github_api_client")
                    .with_operation("get_text")
                    .with_suggestion("Expected base64 encoding from GitHub API"),
            });
        }

        self.decode_base64_content(&content_response.content)
    }

    async fn commits_since(&self, since: DateTime<Utc>) -> GitScopeResult<Vec<CommitRecord>> {
        info!(
            "Fetching GitHub commits for {} since {}",
            self.locator,
            since.to_rfc3339()
        );

        let endpoint = format!(
            "repos/{}/{}/commits?since={}&per_page=100",
            self.locator.owner,
            self.locator.name,
            since.to_rfc3339()
        );
        let response = self.get_request(&endpoint).await?;

        let summaries: Vec<GitHubCommitSummary> =
            response.json().await.map_err(|e| GitScopeError::Repository {
                message: format!("Failed to parse commit list: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("commits_since"),
            })?;

        let mut records = Vec::with_capacity(summaries.len());
        for summary in summaries {
            // The list endpoint omits changed files; fetch the detail for
            // each commit. A failing detail fetch degrades to an empty file
            // list rather than failing the whole scan.
            let files = match self.fetch_commit_files(&summary.sha).await {
                Ok(files) => files,
                Err(e) => {
                    warn!("Could not fetch files for commit {}: {}", summary.sha, e);
                    Vec::new()
                }
            };

            let authored_at = summary
                .commit
                .author
                .map(|a| a.date)
                .unwrap_or_else(Utc::now);

            records.push(CommitRecord {
                sha: summary.sha,
                author_login: summary.author.map(|u| u.login),
                authored_at,
                files,
            });
        }

        info!(
            "Retrieved {} commits from GitHub repository {}",
            records.len(),
            self.locator
        );
        Ok(records)
    }

    async fn contributors(&self) -> GitScopeResult<Vec<ContributorRecord>> {
        info!("Fetching GitHub contributors for {}", self.locator);

        let endpoint = format!(
            "repos/{}/{}/contributors?per_page=100",
            self.locator.owner, self.locator.name
        );
        let response = self.get_request(&endpoint).await?;

        let contributors: Vec<GitHubContributor> =
            response.json().await.map_err(|e| GitScopeError::Repository {
                message: format!("Failed to parse contributor list: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("contributors"),
            })?;

        Ok(contributors
            .into_iter()
            .map(|c| ContributorRecord {
                login: c.login.unwrap_or_else(|| "Unknown".to_string()),
                contributions: c.contributions,
            })
            .collect())
    }
}

impl GitHubClient {
    /// Fetch the changed-file list for one commit
    async fn fetch_commit_files(&self, sha: &str) -> GitScopeResult<Vec<String>> {
        let endpoint = format!(
            "repos/{}/{}/commits/{}",
            self.locator.owner, self.locator.name, sha
        );
        let response = self.get_request(&endpoint).await?;

        let detail: GitHubCommitDetail =
            response.json().await.map_err(|e| GitScopeError::Repository {
                message: format!("Failed to parse commit detail: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client")
                    .with_operation("fetch_commit_files"),
            })?;

        Ok(detail
            .files
            .unwrap_or_default()
            .into_iter()
            .map(|f| f.filename)
            .collect())
    }
}
