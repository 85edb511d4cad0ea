//! Mermaid diagram generation

use std::collections::{BTreeMap, BTreeSet};

use gitscope_analysis::{DependencyEdge, FileTreeNode};

use crate::readme::file_icon;

/// Sanitize a label into a Mermaid node id
fn node_id(parent_id: &str, name: &str) -> String {
    format!("{}_{}", parent_id, name)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Render the file structure as a `graph TD` diagram
pub(crate) fn structure_diagram(tree: &FileTreeNode) -> String {
    let mut lines = vec![
        "graph TD".to_string(),
        "    root[🏠 Repository]".to_string(),
    ];

    if let FileTreeNode::Directory { children, .. } = tree {
        add_tree_nodes(children, "root", &mut lines);
    }

    lines.join("\n")
}

fn add_tree_nodes(
    children: &BTreeMap<String, FileTreeNode>,
    parent_id: &str,
    lines: &mut Vec<String>,
) {
    for (name, child) in children {
        let id = node_id(parent_id, name);
        match child {
            FileTreeNode::Directory { children, .. } => {
                lines.push(format!("    {}[📁 {}]", id, name));
                lines.push(format!("    {} --> {}", parent_id, id));
                add_tree_nodes(children, &id, lines);
            }
            FileTreeNode::File { language, .. } => {
                lines.push(format!("    {}[{} {}]", id, file_icon(language), name));
                lines.push(format!("    {} --> {}", parent_id, id));
            }
        }
    }
}

/// Render the dependency edges as a `graph LR` diagram, file stem to root
/// module, duplicates collapsed.
pub(crate) fn dependency_graph(edges: &[DependencyEdge]) -> String {
    let mut lines = vec!["graph LR".to_string()];
    let mut seen = BTreeSet::new();

    for edge in edges {
        let file_stem = file_stem(&edge.from_file);
        let module_root = edge.to_module.split('.').next().unwrap_or("");
        if file_stem.is_empty() || module_root.is_empty() {
            continue;
        }

        let line = format!(
            "    {}[{}] --> {}[{}]",
            node_id("f", file_stem),
            file_stem,
            node_id("m", module_root),
            module_root
        );
        if seen.insert(line.clone()) {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// File name without directory or extension
fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// Render the language distribution as a Mermaid `pie` chart: Unknown is
/// filtered out, the top seven languages are kept, and the rest fold into
/// "Others".
pub(crate) fn language_pie(counts: &BTreeMap<String, usize>) -> String {
    let mut ranked: Vec<(&str, usize)> = counts
        .iter()
        .filter(|(language, _)| language.as_str() != "Unknown")
        .map(|(language, count)| (language.as_str(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut lines = vec!["pie title Language Distribution".to_string()];
    if ranked.len() > 8 {
        let others: usize = ranked[7..].iter().map(|(_, count)| count).sum();
        ranked.truncate(7);
        for (language, count) in &ranked {
            lines.push(format!("    \"{}\" : {}", language, count));
        }
        if others > 0 {
            lines.push(format!("    \"Others\" : {}", others));
        }
    } else {
        for (language, count) in &ranked {
            lines.push(format!("    \"{}\" : {}", language, count));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitscope_analysis::ImportKind;

    #[test]
    fn structure_diagram_lists_nodes_and_edges() {
        let mut children = BTreeMap::new();
        children.insert(
            "app.py".to_string(),
            FileTreeNode::File {
                name: "app.py".to_string(),
                path: "app.py".to_string(),
                size: 1,
                language: "Python".to_string(),
            },
        );
        let tree = FileTreeNode::Directory {
            name: String::new(),
            path: String::new(),
            children,
        };

        let diagram = structure_diagram(&tree);
        assert!(diagram.starts_with("graph TD"));
        assert!(diagram.contains("root_app_py[🐍 app.py]"));
        assert!(diagram.contains("root --> root_app_py"));
    }

    #[test]
    fn dependency_graph_collapses_duplicates() {
        let edge = |from: &str, to: &str| DependencyEdge {
            from_file: from.to_string(),
            to_module: to.to_string(),
            kind: ImportKind::Direct,
        };
        let edges = vec![
            edge("src/app.py", "os.path"),
            edge("src/app.py", "os"),
            edge("src/util.py", "json"),
        ];

        let diagram = dependency_graph(&edges);
        // os.path and os both collapse to the os root module.
        assert_eq!(diagram.matches("--> m_os[os]").count(), 1);
        assert!(diagram.contains("f_util[util] --> m_json[json]"));
    }

    #[test]
    fn language_pie_filters_unknown_and_folds_tail() {
        let mut counts = BTreeMap::new();
        for (i, language) in [
            "Python", "Rust", "Go", "Java", "C", "C++", "Ruby", "PHP", "Swift",
        ]
        .iter()
        .enumerate()
        {
            counts.insert(language.to_string(), 20 - i);
        }
        counts.insert("Unknown".to_string(), 99);

        let pie = language_pie(&counts);
        assert!(pie.starts_with("pie title Language Distribution"));
        assert!(!pie.contains("Unknown"));
        assert!(pie.contains("\"Python\" : 20"));
        assert!(pie.contains("\"Others\" : "));
        // seven named languages plus Others
        assert_eq!(pie.lines().count(), 1 + 7 + 1);
    }
}
