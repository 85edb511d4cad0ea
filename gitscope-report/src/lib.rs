//! GitScope Report - rendering analysis results
//!
//! Writes the JSON report, the static HTML pages, and the generated README
//! for one `AnalysisReport`.

mod charts;
mod html;
mod mermaid;
mod readme;
mod types;

pub use types::{JsonReport, ReportFormat, ReportSummary};

use std::path::{Path, PathBuf};

use gitscope_analysis::AnalysisReport;
use gitscope_core::{ErrorContext, GitScopeError, GitScopeResult};
use tokio::fs;
use tracing::{debug, info};

/// Writes report files for one analysis run
pub struct ReportExporter;

impl ReportExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export the report in the requested format.
    ///
    /// Creates `output_path` if needed and returns the list of written
    /// files.
    pub async fn export(
        &self,
        report: &AnalysisReport,
        format: ReportFormat,
        output_path: &Path,
    ) -> GitScopeResult<Vec<PathBuf>> {
        fs::create_dir_all(output_path)
            .await
            .map_err(|e| GitScopeError::Report {
                message: format!("Failed to create output directory: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("report_exporter")
                    .with_operation("create_output_dir")
                    .with_suggestion("Check that the output location is writable"),
            })?;

        let mut written = Vec::new();

        if format.includes_json() {
            written.push(self.export_json(report, output_path).await?);
        }
        if format.includes_html() {
            written.extend(self.export_html(report, output_path).await?);
        }

        info!(
            output = %output_path.display(),
            files = written.len(),
            "Report export complete"
        );
        Ok(written)
    }

    /// Write `analysis_report.json`
    async fn export_json(
        &self,
        report: &AnalysisReport,
        output_path: &Path,
    ) -> GitScopeResult<PathBuf> {
        let body = JsonReport {
            repository: &report.repository,
            analysis_summary: ReportSummary::from_report(report),
            insights: &report.insights,
        };

        let json = serde_json::to_string_pretty(&body)?;
        let path = output_path.join("analysis_report.json");
        fs::write(&path, json).await?;

        debug!(path = %path.display(), "Wrote JSON report");
        Ok(path)
    }

    /// Write the HTML page set plus the generated README
    async fn export_html(
        &self,
        report: &AnalysisReport,
        output_path: &Path,
    ) -> GitScopeResult<Vec<PathBuf>> {
        let summary = ReportSummary::from_report(report);

        let pages: Vec<(&str, String)> = vec![
            ("style.css", html::generate_css()),
            ("index.html", html::index_page(report, &summary)),
            ("AUTO_README.md", readme::render_auto_readme(report)),
            (
                "file_structure.html",
                html::mermaid_page(
                    &format!("{} - File Structure", report.repository.name),
                    &format!("📁 {} - File Structure", report.repository.name),
                    &mermaid::structure_diagram(&report.tree),
                ),
            ),
            (
                "dependency_graph.html",
                html::mermaid_page(
                    &format!("{} - Dependency Graph", report.repository.name),
                    &format!("🔗 {} - Dependency Graph", report.repository.name),
                    &mermaid::dependency_graph(&report.dependencies),
                ),
            ),
            (
                "language_distribution.html",
                html::mermaid_page(
                    &format!("{} - Language Distribution", report.repository.name),
                    &format!("📈 {} - Language Distribution", report.repository.name),
                    &mermaid::language_pie(&report.tree.count_by_language()),
                ),
            ),
            (
                "commit_activity.html",
                html::page(
                    &format!("{} - Commit Activity", report.repository.name),
                    &format!(
                        "<div class=\"card\"><h1>🔥 Commit Activity</h1>{}</div>",
                        charts::commit_heatmap(&report.activity)
                    ),
                ),
            ),
            (
                "contributor_analysis.html",
                html::page(
                    &format!("{} - Contributors", report.repository.name),
                    &format!(
                        "<div class=\"card\"><h1>👥 Top Contributors</h1>{}</div>",
                        charts::contributor_bars(&report.contributors)
                    ),
                ),
            ),
        ];

        let mut written = Vec::with_capacity(pages.len());
        for (file_name, content) in pages {
            let path = output_path.join(file_name);
            fs::write(&path, content).await?;
            debug!(path = %path.display(), "Wrote report page");
            written.push(path);
        }

        Ok(written)
    }
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitscope_analysis::{
        CommitActivity, ContributorStats, DependencyEdge, FileTreeNode, ImportKind,
    };
    use gitscope_repo::RepositoryMetadata;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn sample_report() -> AnalysisReport {
        let mut children = BTreeMap::new();
        children.insert(
            "app.py".to_string(),
            FileTreeNode::File {
                name: "app.py".to_string(),
                path: "app.py".to_string(),
                size: 64,
                language: "Python".to_string(),
            },
        );
        children.insert(
            "README.md".to_string(),
            FileTreeNode::File {
                name: "README.md".to_string(),
                path: "README.md".to_string(),
                size: 20,
                language: "Markdown".to_string(),
            },
        );
        let tree = FileTreeNode::Directory {
            name: String::new(),
            path: String::new(),
            children,
        };

        let mut activity = CommitActivity {
            total_commits: 3,
            ..Default::default()
        };
        activity.file_changes.insert("app.py".to_string(), 3);
        activity
            .daily_frequency
            .insert("2026-03-02".to_string(), 3);
        activity.authors.insert("alice".to_string());

        AnalysisReport {
            repository: RepositoryMetadata {
                name: "demo".to_string(),
                owner: "acme".to_string(),
                description: Some("A demo repository".to_string()),
                default_branch: "main".to_string(),
                language: Some("Python".to_string()),
                stars: 7,
                forks: 2,
                created_at: None,
                updated_at: None,
            },
            tree,
            dependencies: vec![DependencyEdge {
                from_file: "app.py".to_string(),
                to_module: "os".to_string(),
                kind: ImportKind::Direct,
            }],
            activity,
            contributors: vec![ContributorStats {
                login: "alice".to_string(),
                contributions: 12,
                files_owned: 1,
                primary_files: vec![("app.py".to_string(), 3)],
            }],
            insights: vec!["🎯 Primary language: Python".to_string()],
            generated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn export_all_writes_the_full_file_set() {
        let exporter = ReportExporter::new();
        let temp_dir = TempDir::new().unwrap();

        let written = exporter
            .export(&sample_report(), ReportFormat::All, temp_dir.path())
            .await
            .unwrap();

        for file_name in [
            "analysis_report.json",
            "index.html",
            "style.css",
            "AUTO_README.md",
            "file_structure.html",
            "dependency_graph.html",
            "language_distribution.html",
            "commit_activity.html",
            "contributor_analysis.html",
        ] {
            assert!(
                temp_dir.path().join(file_name).exists(),
                "missing {}",
                file_name
            );
        }
        assert_eq!(written.len(), 9);
    }

    #[tokio::test]
    async fn json_format_writes_only_the_json_report() {
        let exporter = ReportExporter::new();
        let temp_dir = TempDir::new().unwrap();

        exporter
            .export(&sample_report(), ReportFormat::Json, temp_dir.path())
            .await
            .unwrap();

        assert!(temp_dir.path().join("analysis_report.json").exists());
        assert!(!temp_dir.path().join("index.html").exists());
    }

    #[tokio::test]
    async fn json_report_round_trips_summary_values() {
        let exporter = ReportExporter::new();
        let temp_dir = TempDir::new().unwrap();

        exporter
            .export(&sample_report(), ReportFormat::Json, temp_dir.path())
            .await
            .unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("analysis_report.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(parsed["repository"]["name"], "demo");
        assert_eq!(parsed["analysis_summary"]["total_files"], 2);
        assert_eq!(parsed["analysis_summary"]["total_dependencies"], 1);
        assert_eq!(parsed["analysis_summary"]["active_contributors"], 1);
        assert!(parsed["insights"].as_array().unwrap().len() == 1);
    }

    #[tokio::test]
    async fn html_pages_carry_the_expected_content() {
        let exporter = ReportExporter::new();
        let temp_dir = TempDir::new().unwrap();

        exporter
            .export(&sample_report(), ReportFormat::Html, temp_dir.path())
            .await
            .unwrap();

        let index = std::fs::read_to_string(temp_dir.path().join("index.html")).unwrap();
        assert!(index.contains("demo"));
        assert!(index.contains("A demo repository"));
        assert!(index.contains("Primary language: Python"));

        let structure =
            std::fs::read_to_string(temp_dir.path().join("file_structure.html")).unwrap();
        assert!(structure.contains("graph TD"));
        assert!(structure.contains("app.py"));

        let readme = std::fs::read_to_string(temp_dir.path().join("AUTO_README.md")).unwrap();
        assert!(readme.starts_with("# demo"));
        assert!(readme.contains("Total commits analyzed: 3"));
    }
}
