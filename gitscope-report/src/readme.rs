//! Generated README rendering

use gitscope_analysis::{AnalysisReport, FileTreeNode};
use std::collections::BTreeMap;

use crate::types::top_dependencies;

/// Render the auto-generated repository README as Markdown
pub(crate) fn render_auto_readme(report: &AnalysisReport) -> String {
    let repo = &report.repository;

    let mut content = format!(
        "# {}\n\n{}\n\n",
        repo.name,
        repo.description
            .as_deref()
            .unwrap_or("No description available")
    );

    content.push_str("## 📊 Repository Overview\n");
    content.push_str(&format!(
        "- **Language**: {}\n",
        repo.language.as_deref().unwrap_or("Unknown")
    ));
    content.push_str(&format!("- **Stars**: {}\n", repo.stars));
    content.push_str(&format!("- **Forks**: {}\n", repo.forks));
    if let Some(created) = repo.created_at {
        content.push_str(&format!("- **Created**: {}\n", created.format("%Y-%m-%d")));
    }
    if let Some(updated) = repo.updated_at {
        content.push_str(&format!(
            "- **Last Updated**: {}\n",
            updated.format("%Y-%m-%d")
        ));
    }

    content.push_str("\n## 📁 Project Structure\n```\n");
    content.push_str(&render_text_tree(&report.tree));
    content.push_str("```\n");

    let top_deps = top_dependencies(&report.dependencies, 10);
    if !top_deps.is_empty() {
        content.push_str("\n## 🔗 Dependencies\n### Top Dependencies:\n");
        for dep in &top_deps {
            content.push_str(&format!("- {}\n", dep));
        }
    }

    if !report.contributors.is_empty() {
        content.push_str("\n## 👥 Contributors\n### Top Contributors:\n");
        for stats in report.contributors.iter().take(5) {
            content.push_str(&format!(
                "- **{}**: {} contributions\n",
                stats.login, stats.contributions
            ));
        }
    }

    content.push_str("\n## 📈 Activity\n");
    content.push_str(&format!(
        "- Total commits analyzed: {}\n",
        report.activity.total_commits
    ));
    content.push_str(&format!(
        "- Active contributors: {}\n",
        report.activity.authors.len()
    ));

    content.push_str("\n---\n*Generated by GitScope - Repository Analyzer*\n");

    content
}

/// Render the file tree as an indented text listing, directories first in
/// name order within each level.
pub(crate) fn render_text_tree(node: &FileTreeNode) -> String {
    let mut out = String::new();
    if let FileTreeNode::Directory { children, .. } = node {
        render_children(children, 0, &mut out);
    }
    out
}

fn render_children(children: &BTreeMap<String, FileTreeNode>, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    for (name, child) in children {
        match child {
            FileTreeNode::Directory { children, .. } => {
                out.push_str(&format!("{}📁 {}/\n", prefix, name));
                render_children(children, indent + 1, out);
            }
            FileTreeNode::File { language, .. } => {
                out.push_str(&format!("{}{} {}\n", prefix, file_icon(language), name));
            }
        }
    }
}

/// Emoji icon per language tag
pub(crate) fn file_icon(language: &str) -> &'static str {
    match language {
        "Python" => "🐍",
        "JavaScript" => "📜",
        "TypeScript" => "📘",
        "Java" => "☕",
        "C++" => "⚡",
        "C" => "🔧",
        "Go" => "🐹",
        "Rust" => "🦀",
        "HTML" => "🌐",
        "CSS" => "🎨",
        "Markdown" => "📝",
        "JSON" => "📋",
        "YAML" => "⚙️",
        _ => "📄",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileTreeNode {
        let mut src_children = BTreeMap::new();
        src_children.insert(
            "app.py".to_string(),
            FileTreeNode::File {
                name: "app.py".to_string(),
                path: "src/app.py".to_string(),
                size: 10,
                language: "Python".to_string(),
            },
        );

        let mut children = BTreeMap::new();
        children.insert(
            "src".to_string(),
            FileTreeNode::Directory {
                name: "src".to_string(),
                path: "src".to_string(),
                children: src_children,
            },
        );
        children.insert(
            "README.md".to_string(),
            FileTreeNode::File {
                name: "README.md".to_string(),
                path: "README.md".to_string(),
                size: 5,
                language: "Markdown".to_string(),
            },
        );

        FileTreeNode::Directory {
            name: String::new(),
            path: String::new(),
            children,
        }
    }

    #[test]
    fn renders_indented_tree() {
        let text = render_text_tree(&sample_tree());

        assert!(text.contains("📁 src/"));
        assert!(text.contains("  🐍 app.py"));
        assert!(text.contains("📝 README.md"));
    }

    #[test]
    fn unknown_language_gets_generic_icon() {
        assert_eq!(file_icon("Fortran"), "📄");
        assert_eq!(file_icon("Python"), "🐍");
    }
}
