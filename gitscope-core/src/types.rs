//! Core configuration types

use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitScopeConfig {
    pub api: ApiConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the GitHub REST API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string sent with every request
    pub user_agent: String,
}

/// Work bounds for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// File extensions scanned for import dependencies
    pub source_extensions: Vec<String>,
    /// Files larger than this are never fetched for content
    pub max_file_size_bytes: u64,
    /// How far back the commit scan reaches
    pub commit_window_days: i64,
    /// Commits inspected in detail per run
    pub max_commits: usize,
    /// Changed files tallied per commit
    pub max_files_per_commit: usize,
    /// Contributors ranked in the report
    pub max_contributors: usize,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory for generated reports
    pub dir: String,
    /// Report format (html, json, all)
    pub format: String,
}
