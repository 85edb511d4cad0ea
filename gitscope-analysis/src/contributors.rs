//! Contributor aggregation

use std::collections::HashMap;

use gitscope_repo::ContributorRecord;
use serde::{Deserialize, Serialize};

/// Per-contributor statistics for the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorStats {
    pub login: String,
    /// Lifetime contribution count as reported by the platform
    pub contributions: u64,
    /// Distinct files this contributor touched in the commit window
    pub files_owned: usize,
    /// The five most-touched files with their touch counts
    pub primary_files: Vec<(String, usize)>,
}

/// Rank contributors, keeping the first `max` records in platform order and
/// joining each with the file ownership observed during the commit scan.
pub fn analyze_contributors(
    records: &[ContributorRecord],
    files_by_author: &HashMap<String, Vec<String>>,
    max: usize,
) -> Vec<ContributorStats> {
    records
        .iter()
        .take(max)
        .map(|record| {
            let touched = files_by_author
                .get(&record.login)
                .map(Vec::as_slice)
                .unwrap_or_default();

            let mut touch_counts: HashMap<&str, usize> = HashMap::new();
            for file in touched {
                *touch_counts.entry(file.as_str()).or_insert(0) += 1;
            }

            let files_owned = touch_counts.len();

            let mut primary_files: Vec<(String, usize)> = touch_counts
                .into_iter()
                .map(|(file, count)| (file.to_string(), count))
                .collect();
            primary_files.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            primary_files.truncate(5);

            ContributorStats {
                login: record.login.clone(),
                contributions: record.contributions,
                files_owned,
                primary_files,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(login: &str, contributions: u64) -> ContributorRecord {
        ContributorRecord {
            login: login.to_string(),
            contributions,
        }
    }

    #[test]
    fn joins_platform_records_with_commit_ownership() {
        let records = vec![record("alice", 40), record("bob", 12)];

        let mut files_by_author = HashMap::new();
        files_by_author.insert(
            "alice".to_string(),
            vec![
                "src/app.py".to_string(),
                "src/app.py".to_string(),
                "src/util.py".to_string(),
            ],
        );

        let stats = analyze_contributors(&records, &files_by_author, 20);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].login, "alice");
        assert_eq!(stats[0].files_owned, 2);
        assert_eq!(stats[0].primary_files[0], ("src/app.py".to_string(), 2));

        // bob appears with no observed files
        assert_eq!(stats[1].files_owned, 0);
        assert!(stats[1].primary_files.is_empty());
    }

    #[test]
    fn respects_the_contributor_cap() {
        let records: Vec<ContributorRecord> =
            (0..30).map(|i| record(&format!("user{}", i), 1)).collect();

        let stats = analyze_contributors(&records, &HashMap::new(), 20);
        assert_eq!(stats.len(), 20);
        // platform order preserved
        assert_eq!(stats[0].login, "user0");
    }

    #[test]
    fn primary_files_keeps_top_five() {
        let records = vec![record("alice", 1)];

        let mut files_by_author = HashMap::new();
        let mut touched = Vec::new();
        for i in 0..8 {
            for _ in 0..=i {
                touched.push(format!("f{}.py", i));
            }
        }
        files_by_author.insert("alice".to_string(), touched);

        let stats = analyze_contributors(&records, &files_by_author, 20);
        assert_eq!(stats[0].files_owned, 8);
        assert_eq!(stats[0].primary_files.len(), 5);
        assert_eq!(stats[0].primary_files[0], ("f7.py".to_string(), 8));
    }
}
