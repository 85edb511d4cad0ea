//! Repository file tree construction
//!
//! Recursively walks remote directory listings into an in-memory tree.
//! Listing failures below the root degrade to childless directories so one
//! unreachable subtree never aborts the whole analysis.

use std::collections::BTreeMap;

use futures::future::BoxFuture;
use futures::FutureExt;
use gitscope_core::{structure_error, GitScopeResult};
use gitscope_repo::{RepoEntry, RepositoryClient};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::language::detect_language;

/// One node of the repository file tree.
///
/// A node's variant never changes after construction; the whole tree is
/// built in one pass and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileTreeNode {
    Directory {
        name: String,
        path: String,
        children: BTreeMap<String, FileTreeNode>,
    },
    File {
        name: String,
        path: String,
        size: u64,
        language: String,
    },
}

impl FileTreeNode {
    pub fn name(&self) -> &str {
        match self {
            FileTreeNode::Directory { name, .. } => name,
            FileTreeNode::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            FileTreeNode::Directory { path, .. } => path,
            FileTreeNode::File { path, .. } => path,
        }
    }

    /// An empty root directory (used when the whole walk is unavailable)
    pub fn empty_root() -> Self {
        FileTreeNode::Directory {
            name: String::new(),
            path: String::new(),
            children: BTreeMap::new(),
        }
    }

    /// Recursive count of file nodes
    pub fn count_files(&self) -> usize {
        match self {
            FileTreeNode::File { .. } => 1,
            FileTreeNode::Directory { children, .. } => {
                children.values().map(FileTreeNode::count_files).sum()
            }
        }
    }

    /// Paths of all files whose name ends with `ext`, case-insensitively,
    /// in depth-first pre-order.
    pub fn files_with_extension(&self, ext: &str) -> Vec<String> {
        let ext = ext.to_lowercase();
        let mut paths = Vec::new();
        self.collect_files_with_extension(&ext, &mut paths);
        paths
    }

    fn collect_files_with_extension(&self, ext: &str, paths: &mut Vec<String>) {
        match self {
            FileTreeNode::File { name, path, .. } => {
                if name.to_lowercase().ends_with(ext) {
                    paths.push(path.clone());
                }
            }
            FileTreeNode::Directory { children, .. } => {
                for child in children.values() {
                    child.collect_files_with_extension(ext, paths);
                }
            }
        }
    }

    /// Recursive tally of files per detected language
    pub fn count_by_language(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        self.tally_languages(&mut counts);
        counts
    }

    fn tally_languages(&self, counts: &mut BTreeMap<String, usize>) {
        match self {
            FileTreeNode::File { language, .. } => {
                *counts.entry(language.clone()).or_insert(0) += 1;
            }
            FileTreeNode::Directory { children, .. } => {
                for child in children.values() {
                    child.tally_languages(counts);
                }
            }
        }
    }

    /// Pre-order `(path, kind)` pairs for every node in the tree
    pub fn path_list(&self) -> Vec<(String, &'static str)> {
        let mut pairs = Vec::new();
        self.collect_paths(&mut pairs);
        pairs
    }

    fn collect_paths(&self, pairs: &mut Vec<(String, &'static str)>) {
        match self {
            FileTreeNode::File { path, .. } => pairs.push((path.clone(), "file")),
            FileTreeNode::Directory { path, children, .. } => {
                pairs.push((path.clone(), "dir"));
                for child in children.values() {
                    child.collect_paths(pairs);
                }
            }
        }
    }

    /// Size of the file at `path`, if the tree contains it
    pub fn file_size(&self, path: &str) -> Option<u64> {
        let mut node = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match node {
                FileTreeNode::Directory { children, .. } => {
                    node = children.get(segment)?;
                }
                FileTreeNode::File { .. } => return None,
            }
        }
        match node {
            FileTreeNode::File { size, .. } => Some(*size),
            FileTreeNode::Directory { .. } => None,
        }
    }
}

/// Builds a `FileTreeNode` tree from remote directory listings
pub struct TreeBuilder<'a> {
    client: &'a dyn RepositoryClient,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(client: &'a dyn RepositoryClient) -> Self {
        Self { client }
    }

    /// Build the tree rooted at `path` (use `""` for the repository root).
    ///
    /// A failure to list `path` itself propagates; failures for nested
    /// directories are recovered locally as childless directory nodes. An
    /// entry whose type is neither `file` nor `dir` is a fatal
    /// `Structure` error.
    pub async fn build(&self, path: &str) -> GitScopeResult<FileTreeNode> {
        let listing = self.client.list_dir(path).await?;
        let children = self.build_children(listing).await?;

        let name = path.rsplit('/').next().unwrap_or("").to_string();
        Ok(FileTreeNode::Directory {
            name,
            path: path.to_string(),
            children,
        })
    }

    fn build_children(
        &self,
        entries: Vec<RepoEntry>,
    ) -> BoxFuture<'_, GitScopeResult<BTreeMap<String, FileTreeNode>>> {
        async move {
            let mut children = BTreeMap::new();

            for entry in entries {
                let node = match entry.entry_type.as_str() {
                    "dir" => match self.client.list_dir(&entry.path).await {
                        Ok(listing) => FileTreeNode::Directory {
                            name: entry.name.clone(),
                            path: entry.path,
                            children: self.build_children(listing).await?,
                        },
                        Err(e) => {
                            // Local recovery: keep the directory, drop the
                            // unreachable subtree.
                            warn!(path = %entry.path, error = %e, "Could not list directory");
                            FileTreeNode::Directory {
                                name: entry.name.clone(),
                                path: entry.path,
                                children: BTreeMap::new(),
                            }
                        }
                    },
                    "file" => FileTreeNode::File {
                        name: entry.name.clone(),
                        language: detect_language(&entry.name).to_string(),
                        path: entry.path,
                        size: entry.size,
                    },
                    other => {
                        return Err(structure_error!(
                            format!("Unexpected entry type '{}' for {}", other, entry.path),
                            "tree_builder"
                        ));
                    }
                };

                children.insert(entry.name, node);
            }

            Ok(children)
        }
        .boxed()
    }
}
