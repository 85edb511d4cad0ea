//! Threshold-based analysis insights

use crate::commits::CommitActivity;
use crate::contributors::ContributorStats;
use crate::imports::DependencyEdge;
use crate::tree::FileTreeNode;
use gitscope_repo::RepositoryMetadata;

/// Generate textual observations from the computed aggregates
pub fn generate_insights(
    metadata: &RepositoryMetadata,
    tree: &FileTreeNode,
    dependencies: &[DependencyEdge],
    activity: &CommitActivity,
    contributors: &[ContributorStats],
) -> Vec<String> {
    let mut insights = Vec::new();

    let total_files = tree.count_files();
    if total_files > 100 {
        insights.push("🏗️ Large codebase detected - consider modularization".to_string());
    }

    if dependencies.len() > 50 {
        insights.push("🔗 High dependency count - potential for refactoring".to_string());
    }

    if activity.total_commits > 1000 {
        insights.push("📈 Very active repository with frequent commits".to_string());
    }

    if let Some(language) = &metadata.language {
        insights.push(format!("🎯 Primary language: {}", language));
    }

    if contributors.len() > 10 {
        insights.push("👥 Large contributor base - good community engagement".to_string());
    } else if contributors.len() < 3 {
        insights.push("👤 Small contributor base - consider encouraging contributions".to_string());
    }

    insights
}
