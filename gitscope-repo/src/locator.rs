//! Repository locator parsing

use gitscope_core::{ErrorContext, GitScopeError, GitScopeResult};
use url::Url;

/// Identifies one repository on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    pub owner: String,
    pub name: String,
}

impl RepoLocator {
    /// Parse a repository locator from a full URL or `owner/repo` shorthand.
    ///
    /// Accepted shapes: `https://github.com/owner/repo`, with an optional
    /// `.git` suffix, trailing slash, or `/tree/<branch>/...` tail, and the
    /// bare `owner/repo` form.
    pub fn parse(input: &str) -> GitScopeResult<Self> {
        let input = input.trim();

        if input.starts_with("http://") || input.starts_with("https://") {
            return Self::parse_url(input);
        }

        // owner/repo shorthand
        let mut segments = input.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (Some(owner), Some(name), None) => Ok(Self {
                owner: owner.to_string(),
                name: name.trim_end_matches(".git").to_string(),
            }),
            _ => Err(GitScopeError::Validation {
                message: format!("Invalid repository identifier: {}", input),
                field: Some("repo_url".to_string()),
                context: ErrorContext::new("repo_locator")
                    .with_operation("parse")
                    .with_suggestion(
                        "Use https://github.com/owner/repo or the owner/repo shorthand",
                    ),
            }),
        }
    }

    fn parse_url(input: &str) -> GitScopeResult<Self> {
        let parsed_url = Url::parse(input).map_err(|e| GitScopeError::Validation {
            message: format!("Invalid repository URL: {}", e),
            field: Some("repo_url".to_string()),
            context: ErrorContext::new("repo_locator")
                .with_operation("parse_url")
                .with_suggestion("Ensure the URL is valid and properly formatted"),
        })?;

        let segments: Vec<&str> = parsed_url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 2 {
            return Err(GitScopeError::Validation {
                message: "URL must contain owner and repository name".to_string(),
                field: Some("repo_url".to_string()),
                context: ErrorContext::new("repo_locator")
                    .with_operation("parse_url")
                    .with_suggestion("URL should be in format: https://github.com/owner/repo"),
            });
        }

        // Extra segments (e.g. /tree/main/src) are ignored.
        Ok(Self {
            owner: segments[0].to_string(),
            name: segments[1].trim_end_matches(".git").to_string(),
        })
    }
}

impl std::fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
