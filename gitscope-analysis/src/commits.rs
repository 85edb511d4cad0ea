//! Commit history aggregation

use std::collections::{BTreeMap, BTreeSet, HashMap};

use gitscope_repo::CommitRecord;
use serde::{Deserialize, Serialize};

/// Aggregated commit activity for one analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitActivity {
    /// Number of commits fetched for the window
    pub total_commits: usize,
    /// Change count per file path
    pub file_changes: HashMap<String, usize>,
    /// Commit count per day ("YYYY-MM-DD")
    pub daily_frequency: BTreeMap<String, usize>,
    /// Distinct author logins seen in the inspected commits
    pub authors: BTreeSet<String>,
}

impl CommitActivity {
    /// The `limit` most frequently changed files, count-descending with
    /// path-ascending tie-breaks so report output is stable.
    pub fn most_changed_files(&self, limit: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .file_changes
            .iter()
            .map(|(path, count)| (path.clone(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }
}

/// Commit aggregation output: the activity summary plus the per-author file
/// lists the contributor analyzer consumes.
#[derive(Debug, Clone, Default)]
pub struct CommitAnalysis {
    pub activity: CommitActivity,
    pub files_by_author: HashMap<String, Vec<String>>,
}

/// Aggregate fetched commits.
///
/// `total_commits` counts every record; the detailed tally inspects at most
/// `max_commits` records and `max_files_per_commit` files each — the hard
/// caps that bound the work per run. Commits without a linked account tally
/// under `"Unknown"`.
pub fn analyze_commits(
    commits: &[CommitRecord],
    max_commits: usize,
    max_files_per_commit: usize,
) -> CommitAnalysis {
    let mut analysis = CommitAnalysis {
        activity: CommitActivity {
            total_commits: commits.len(),
            ..Default::default()
        },
        ..Default::default()
    };

    for commit in commits.iter().take(max_commits) {
        let author = commit
            .author_login
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        analysis.activity.authors.insert(author.clone());

        let date_key = commit.authored_at.format("%Y-%m-%d").to_string();
        *analysis.activity.daily_frequency.entry(date_key).or_insert(0) += 1;

        for file in commit.files.iter().take(max_files_per_commit) {
            *analysis
                .activity
                .file_changes
                .entry(file.clone())
                .or_insert(0) += 1;

            analysis
                .files_by_author
                .entry(author.clone())
                .or_default()
                .push(file.clone());
        }
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn commit(sha: &str, author: Option<&str>, day: u32, files: &[&str]) -> CommitRecord {
        CommitRecord {
            sha: sha.to_string(),
            author_login: author.map(String::from),
            authored_at: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn aggregates_frequency_files_and_authors() {
        let commits = vec![
            commit("a", Some("alice"), 1, &["src/app.py", "README.md"]),
            commit("b", Some("bob"), 1, &["src/app.py"]),
            commit("c", Some("alice"), 2, &["src/util.py"]),
        ];

        let analysis = analyze_commits(&commits, 100, 10);
        let activity = &analysis.activity;

        assert_eq!(activity.total_commits, 3);
        assert_eq!(activity.daily_frequency.get("2026-03-01"), Some(&2));
        assert_eq!(activity.daily_frequency.get("2026-03-02"), Some(&1));
        assert_eq!(activity.file_changes.get("src/app.py"), Some(&2));
        assert_eq!(activity.authors.len(), 2);
        assert_eq!(
            analysis.files_by_author.get("alice").map(Vec::len),
            Some(3)
        );
    }

    #[test]
    fn missing_author_tallies_as_unknown() {
        let commits = vec![commit("a", None, 5, &["orphan.py"])];
        let analysis = analyze_commits(&commits, 100, 10);

        assert!(analysis.activity.authors.contains("Unknown"));
        assert!(analysis.files_by_author.contains_key("Unknown"));
    }

    #[test]
    fn caps_bound_the_detailed_tally() {
        let many_files: Vec<String> = (0..25).map(|i| format!("f{}.py", i)).collect();
        let many_refs: Vec<&str> = many_files.iter().map(String::as_str).collect();

        let commits: Vec<CommitRecord> = (0..5)
            .map(|i| commit(&format!("c{}", i), Some("alice"), 1 + i as u32, &many_refs))
            .collect();

        let analysis = analyze_commits(&commits, 2, 10);

        // Five fetched, two inspected, ten files each.
        assert_eq!(analysis.activity.total_commits, 5);
        let inspected: usize = analysis.activity.daily_frequency.values().sum();
        assert_eq!(inspected, 2);
        let file_touches: usize = analysis.activity.file_changes.values().sum();
        assert_eq!(file_touches, 20);
    }

    #[test]
    fn most_changed_files_is_stable() {
        let commits = vec![
            commit("a", Some("alice"), 1, &["b.py", "a.py"]),
            commit("b", Some("alice"), 2, &["b.py", "c.py"]),
        ];
        let analysis = analyze_commits(&commits, 100, 10);

        let ranked = analysis.activity.most_changed_files(10);
        assert_eq!(ranked[0], ("b.py".to_string(), 2));
        // Ties resolve alphabetically.
        assert_eq!(ranked[1].0, "a.py");
        assert_eq!(ranked[2].0, "c.py");
    }

    #[test]
    fn empty_input_produces_empty_activity() {
        let analysis = analyze_commits(&[], 100, 10);
        assert_eq!(analysis.activity.total_commits, 0);
        assert!(analysis.activity.file_changes.is_empty());
        assert!(analysis.activity.most_changed_files(10).is_empty());
    }
}
