//! Python import dependency extraction
//!
//! Two strategies composed by one dispatcher: a syntax-tree walk for source
//! that parses cleanly, and a line-pattern scan for everything else. The
//! fallback is deliberately imprecise (no multi-line imports, aliasing, or
//! comment handling) — report consumers tolerate noise in dependency edges.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Parser};

/// The two import-statement shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportKind {
    /// `import module`
    Direct,
    /// `from module import name`
    FromImport,
}

/// One declared module dependency
///
/// `to_module` is the raw identifier as written in source, never resolved
/// or normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from_file: String,
    pub to_module: String,
    pub kind: ImportKind,
}

/// Parse failure marker for the primary strategy
struct ParseFailure;

/// Extract import dependencies from Python source text.
///
/// Never fails: if the syntax-tree strategy cannot produce a clean parse,
/// the line-pattern fallback runs instead, and a file that matches neither
/// yields an empty sequence.
pub fn extract(source: &str, file_path: &str) -> Vec<DependencyEdge> {
    match parse_imports(source, file_path) {
        Ok(edges) => edges,
        Err(ParseFailure) => scan_import_lines(source, file_path),
    }
}

/// Primary strategy: walk a tree-sitter parse of the source.
///
/// Fails when the parser cannot be configured, produces no tree, or the
/// tree contains syntax errors — the explicit fallback triggers.
fn parse_imports(source: &str, file_path: &str) -> Result<Vec<DependencyEdge>, ParseFailure> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::language())
        .map_err(|_| ParseFailure)?;

    let tree = parser.parse(source, None).ok_or(ParseFailure)?;
    if tree.root_node().has_error() {
        return Err(ParseFailure);
    }

    let mut edges = Vec::new();
    collect_imports(tree.root_node(), source.as_bytes(), file_path, &mut edges);
    Ok(edges)
}

/// Walk every node, emitting edges for the two import constructs
fn collect_imports(node: Node, source: &[u8], file_path: &str, edges: &mut Vec<DependencyEdge>) {
    match node.kind() {
        "import_statement" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                let module = match child.kind() {
                    "dotted_name" => Some(child),
                    "aliased_import" => child.child_by_field_name("name"),
                    _ => None,
                };
                if let Some(module) = module {
                    if let Ok(text) = module.utf8_text(source) {
                        edges.push(DependencyEdge {
                            from_file: file_path.to_string(),
                            to_module: text.to_string(),
                            kind: ImportKind::Direct,
                        });
                    }
                }
            }
        }
        "import_from_statement" => {
            if let Some(module) = node.child_by_field_name("module_name") {
                // One edge per module, not per imported name. A relative
                // module keeps only its named part; a bare `from . import x`
                // has none and yields nothing.
                let dotted = match module.kind() {
                    "dotted_name" => Some(module),
                    "relative_import" => {
                        let mut cursor = module.walk();
                        let found = module
                            .named_children(&mut cursor)
                            .find(|c| c.kind() == "dotted_name");
                        found
                    }
                    _ => None,
                };
                if let Some(dotted) = dotted {
                    if let Ok(text) = dotted.utf8_text(source) {
                        edges.push(DependencyEdge {
                            from_file: file_path.to_string(),
                            to_module: text.to_string(),
                            kind: ImportKind::FromImport,
                        });
                    }
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_imports(child, source, file_path, edges);
    }
}

/// Fallback strategy: line-oriented pattern matching.
///
/// Each line is scanned independently; the first matching pattern wins and
/// unmatched lines produce nothing.
fn scan_import_lines(source: &str, file_path: &str) -> Vec<DependencyEdge> {
    let direct = Regex::new(r"^\s*import\s+([^\s#]+)").expect("import pattern");
    let from_import = Regex::new(r"^\s*from\s+([^\s#]+)\s+import").expect("from-import pattern");

    let mut edges = Vec::new();
    for line in source.lines() {
        let (module, kind) = if let Some(captures) = direct.captures(line) {
            (captures.get(1), ImportKind::Direct)
        } else if let Some(captures) = from_import.captures(line) {
            (captures.get(1), ImportKind::FromImport)
        } else {
            continue;
        };

        if let Some(module) = module {
            edges.push(DependencyEdge {
                from_file: file_path.to_string(),
                to_module: module.as_str().to_string(),
                kind,
            });
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modules(edges: &[DependencyEdge]) -> Vec<(&str, ImportKind)> {
        edges
            .iter()
            .map(|e| (e.to_module.as_str(), e.kind))
            .collect()
    }

    #[test]
    fn extracts_direct_and_from_imports() {
        let source = "import os\nfrom collections import defaultdict\n";
        let edges = extract(source, "app.py");

        assert_eq!(
            modules(&edges),
            vec![
                ("os", ImportKind::Direct),
                ("collections", ImportKind::FromImport),
            ]
        );
        assert!(edges.iter().all(|e| e.from_file == "app.py"));
    }

    #[test]
    fn emits_one_edge_per_imported_module() {
        let edges = extract("import os, sys\n", "app.py");
        assert_eq!(
            modules(&edges),
            vec![("os", ImportKind::Direct), ("sys", ImportKind::Direct)]
        );
    }

    #[test]
    fn keeps_raw_dotted_module_names() {
        let edges = extract("import os.path\nfrom urllib.parse import urlencode\n", "a.py");
        assert_eq!(
            modules(&edges),
            vec![
                ("os.path", ImportKind::Direct),
                ("urllib.parse", ImportKind::FromImport),
            ]
        );
    }

    #[test]
    fn aliased_imports_use_the_module_name() {
        let edges = extract("import numpy as np\n", "a.py");
        assert_eq!(modules(&edges), vec![("numpy", ImportKind::Direct)]);
    }

    #[test]
    fn from_import_emits_one_edge_regardless_of_names() {
        let edges = extract("from collections import defaultdict, Counter\n", "a.py");
        assert_eq!(modules(&edges), vec![("collections", ImportKind::FromImport)]);
    }

    #[test]
    fn bare_relative_import_yields_nothing() {
        let edges = extract("from . import helpers\n", "pkg/mod.py");
        assert!(edges.is_empty());
    }

    #[test]
    fn named_relative_import_keeps_the_named_part() {
        let edges = extract("from .helpers import run\n", "pkg/mod.py");
        assert_eq!(modules(&edges), vec![("helpers", ImportKind::FromImport)]);
    }

    #[test]
    fn imports_inside_functions_are_found() {
        let source = "def main():\n    import json\n    return json.dumps({})\n";
        let edges = extract(source, "a.py");
        assert_eq!(modules(&edges), vec![("json", ImportKind::Direct)]);
    }

    #[test]
    fn broken_source_falls_back_to_line_scan() {
        let source = "import sys\nthis is not ((( python\n";
        let edges = extract(source, "broken.py");

        assert_eq!(modules(&edges), vec![("sys", ImportKind::Direct)]);
    }

    #[test]
    fn fallback_tags_from_lines_as_from_import() {
        let source = "from os import path\nimport re\n)))broken(((\n";
        let edges = extract(source, "broken.py");

        assert_eq!(
            modules(&edges),
            vec![("os", ImportKind::FromImport), ("re", ImportKind::Direct)]
        );
    }

    #[test]
    fn empty_text_yields_empty_sequence() {
        assert!(extract("", "empty.py").is_empty());
    }

    #[test]
    fn fallback_scan_matches_line_starts_only() {
        let edges = scan_import_lines("    import os\nx = 'import fake'\n", "a.py");
        assert_eq!(modules(&edges), vec![("os", ImportKind::Direct)]);
    }
}
