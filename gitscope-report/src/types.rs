//! Report output types

use gitscope_analysis::{AnalysisReport, DependencyEdge};
use gitscope_core::{ErrorContext, GitScopeError, GitScopeResult};
use gitscope_repo::RepositoryMetadata;
use serde::Serialize;
use std::collections::HashMap;

/// Export formats supported by the report exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Static HTML pages plus the generated README
    Html,
    /// A single JSON report file
    Json,
    /// Everything
    All,
}

impl ReportFormat {
    /// Parse a format name from the CLI/config surface
    pub fn parse(value: &str) -> GitScopeResult<Self> {
        match value.to_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            "all" => Ok(ReportFormat::All),
            other => Err(GitScopeError::Config {
                message: format!("Unsupported report format: {}", other),
                source: None,
                context: ErrorContext::new("report_format")
                    .with_suggestion("Supported formats: html, json, all"),
            }),
        }
    }

    pub fn includes_json(&self) -> bool {
        matches!(self, ReportFormat::Json | ReportFormat::All)
    }

    pub fn includes_html(&self) -> bool {
        matches!(self, ReportFormat::Html | ReportFormat::All)
    }
}

/// Headline numbers of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_files: usize,
    pub total_dependencies: usize,
    pub total_commits_analyzed: usize,
    pub active_contributors: usize,
    pub most_changed_files: Vec<(String, usize)>,
}

impl ReportSummary {
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            total_files: report.tree.count_files(),
            total_dependencies: report.dependencies.len(),
            total_commits_analyzed: report.activity.total_commits,
            active_contributors: report.activity.authors.len(),
            most_changed_files: report.activity.most_changed_files(10),
        }
    }
}

/// The JSON report body
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub repository: &'a RepositoryMetadata,
    pub analysis_summary: ReportSummary,
    pub insights: &'a [String],
}

/// The `limit` most referenced modules, count-descending with alphabetical
/// tie-breaks.
pub(crate) fn top_dependencies(edges: &[DependencyEdge], limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for edge in edges {
        *counts.entry(edge.to_module.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(module, _)| module.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitscope_analysis::ImportKind;

    #[test]
    fn parses_formats() {
        assert_eq!(ReportFormat::parse("html").unwrap(), ReportFormat::Html);
        assert_eq!(ReportFormat::parse("JSON").unwrap(), ReportFormat::Json);
        assert_eq!(ReportFormat::parse("all").unwrap(), ReportFormat::All);
        assert!(ReportFormat::parse("pdf").is_err());
    }

    #[test]
    fn format_inclusion() {
        assert!(ReportFormat::All.includes_html());
        assert!(ReportFormat::All.includes_json());
        assert!(ReportFormat::Html.includes_html());
        assert!(!ReportFormat::Html.includes_json());
        assert!(!ReportFormat::Json.includes_html());
    }

    #[test]
    fn ranks_top_dependencies() {
        let edge = |module: &str| DependencyEdge {
            from_file: "a.py".to_string(),
            to_module: module.to_string(),
            kind: ImportKind::Direct,
        };
        let edges = vec![edge("os"), edge("sys"), edge("os"), edge("json")];

        let top = top_dependencies(&edges, 2);
        assert_eq!(top, vec!["os".to_string(), "json".to_string()]);
    }
}
