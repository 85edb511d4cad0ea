//! Sequential analysis pipeline
//!
//! One pass over the repository: metadata → tree walk → dependency scan →
//! commit scan → contributor scan → insights. Every fetch is awaited in
//! order; phase failures after the metadata fetch degrade to partial data
//! instead of aborting the run.

use chrono::{DateTime, Duration, Utc};
use gitscope_core::{AnalysisConfig, GitScopeError, GitScopeResult};
use gitscope_repo::{RepositoryClient, RepositoryMetadata};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::commits::{analyze_commits, CommitActivity, CommitAnalysis};
use crate::contributors::{analyze_contributors, ContributorStats};
use crate::imports::{extract, DependencyEdge};
use crate::insights::generate_insights;
use crate::tree::{FileTreeNode, TreeBuilder};

/// Everything one analysis run produced, consumed by the report generators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub repository: RepositoryMetadata,
    pub tree: FileTreeNode,
    pub dependencies: Vec<DependencyEdge>,
    pub activity: CommitActivity,
    pub contributors: Vec<ContributorStats>,
    pub insights: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Drives the analysis phases against one repository
pub struct Analyzer<'a> {
    client: &'a dyn RepositoryClient,
    config: AnalysisConfig,
}

impl<'a> Analyzer<'a> {
    pub fn new(client: &'a dyn RepositoryClient, config: AnalysisConfig) -> Self {
        Self { client, config }
    }

    /// Run the full pipeline.
    ///
    /// A failing metadata fetch (invalid or inaccessible repository) is
    /// fatal, as is a malformed listing entry. Every other phase recovers
    /// locally so later phases still run with partial data.
    pub async fn run(&self) -> GitScopeResult<AnalysisReport> {
        let repository = self.client.metadata().await?;
        info!(
            repo = %format!("{}/{}", repository.owner, repository.name),
            "Starting repository analysis"
        );

        info!("Phase 1: analyzing file structure");
        let tree = match TreeBuilder::new(self.client).build("").await {
            Ok(tree) => tree,
            Err(e @ GitScopeError::Structure { .. }) => return Err(e),
            Err(e) => {
                warn!(error = %e, "Could not analyze file structure");
                FileTreeNode::empty_root()
            }
        };

        info!("Phase 2: building dependency graph");
        let dependencies = self.scan_dependencies(&tree).await;

        info!("Phase 3: gathering commit insights");
        let since = Utc::now() - Duration::days(self.config.commit_window_days);
        let commit_analysis = match self.client.commits_since(since).await {
            Ok(commits) => analyze_commits(
                &commits,
                self.config.max_commits,
                self.config.max_files_per_commit,
            ),
            Err(e) => {
                warn!(error = %e, "Commit analysis failed");
                CommitAnalysis::default()
            }
        };

        info!("Phase 4: analyzing contributors");
        let contributors = match self.client.contributors().await {
            Ok(records) => analyze_contributors(
                &records,
                &commit_analysis.files_by_author,
                self.config.max_contributors,
            ),
            Err(e) => {
                warn!(error = %e, "Contributor analysis failed");
                Vec::new()
            }
        };

        let insights = generate_insights(
            &repository,
            &tree,
            &dependencies,
            &commit_analysis.activity,
            &contributors,
        );

        info!(
            total_files = tree.count_files(),
            dependencies = dependencies.len(),
            commits = commit_analysis.activity.total_commits,
            contributors = contributors.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            repository,
            tree,
            dependencies,
            activity: commit_analysis.activity,
            contributors,
            insights,
            generated_at: Utc::now(),
        })
    }

    /// Fetch and scan every source file for import edges.
    ///
    /// Files over the size threshold are skipped before any content fetch;
    /// a failing fetch skips that file and the scan continues.
    async fn scan_dependencies(&self, tree: &FileTreeNode) -> Vec<DependencyEdge> {
        let mut edges = Vec::new();

        for ext in &self.config.source_extensions {
            for path in tree.files_with_extension(ext) {
                let size = tree.file_size(&path).unwrap_or(0);
                if size > self.config.max_file_size_bytes {
                    debug!(path = %path, size, "Skipping oversized source file");
                    continue;
                }

                match self.client.get_text(&path).await {
                    Ok(text) => edges.extend(extract(&text, &path)),
                    Err(e) => {
                        warn!(path = %path, error = %e, "Could not analyze source file");
                    }
                }
            }
        }

        edges
    }
}
