//! Static HTML charts (commit heatmap, contributor bars)

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use gitscope_analysis::{CommitActivity, ContributorStats};

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Render the commit activity as a weekday × ISO-week heatmap table
pub(crate) fn commit_heatmap(activity: &CommitActivity) -> String {
    // (iso week, weekday index) -> commit count
    let mut cells: BTreeMap<(u32, usize), usize> = BTreeMap::new();
    let mut weeks: Vec<u32> = Vec::new();

    for (date_key, count) in &activity.daily_frequency {
        let Ok(date) = NaiveDate::parse_from_str(date_key, "%Y-%m-%d") else {
            continue;
        };
        let week = date.iso_week().week();
        let weekday = date.weekday().num_days_from_monday() as usize;
        *cells.entry((week, weekday)).or_insert(0) += count;
        if !weeks.contains(&week) {
            weeks.push(week);
        }
    }
    weeks.sort_unstable();

    if weeks.is_empty() {
        return "<p>No commit activity recorded for the analysis window.</p>".to_string();
    }

    let max_count = cells.values().copied().max().unwrap_or(1).max(1);

    let mut html = String::from("<table class=\"heatmap\">\n<tr><th></th>");
    for week in &weeks {
        html.push_str(&format!("<th>W{}</th>", week));
    }
    html.push_str("</tr>\n");

    for (weekday_idx, weekday) in WEEKDAYS.iter().enumerate() {
        html.push_str(&format!("<tr><th>{}</th>", weekday));
        for week in &weeks {
            let count = cells.get(&(*week, weekday_idx)).copied().unwrap_or(0);
            // bucket 0..=4 scaled against the busiest day
            let bucket = if count == 0 {
                0
            } else {
                1 + (count * 3) / max_count
            };
            html.push_str(&format!(
                "<td class=\"heat-{}\">{}</td>",
                bucket.min(4),
                count
            ));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");

    html
}

/// Render the top contributors as a CSS bar chart
pub(crate) fn contributor_bars(contributors: &[ContributorStats]) -> String {
    if contributors.is_empty() {
        return "<p>No contributor data available.</p>".to_string();
    }

    let top: Vec<&ContributorStats> = contributors.iter().take(10).collect();
    let max_contributions = top
        .iter()
        .map(|c| c.contributions)
        .max()
        .unwrap_or(1)
        .max(1);

    let mut html = String::from("<div class=\"bar-chart\">\n");
    for stats in top {
        let width = (stats.contributions * 100) / max_contributions;
        html.push_str(&format!(
            "<div class=\"bar-row\"><span class=\"bar-label\">{}</span>\
             <div class=\"bar\" style=\"width: {}%\">{}</div></div>\n",
            stats.login, width, stats.contributions
        ));
    }
    html.push_str("</div>\n");

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heatmap_buckets_by_intensity() {
        let mut activity = CommitActivity::default();
        activity
            .daily_frequency
            .insert("2026-03-02".to_string(), 6); // Monday, W10
        activity
            .daily_frequency
            .insert("2026-03-03".to_string(), 1); // Tuesday, W10
        activity
            .daily_frequency
            .insert("2026-03-09".to_string(), 3); // Monday, W11

        let html = commit_heatmap(&activity);
        assert!(html.contains("<th>W10</th>"));
        assert!(html.contains("<th>W11</th>"));
        assert!(html.contains("heat-4\">6<"));
        assert!(html.contains("heat-0\">0<"));
    }

    #[test]
    fn heatmap_handles_empty_activity() {
        let html = commit_heatmap(&CommitActivity::default());
        assert!(html.contains("No commit activity"));
    }

    #[test]
    fn bars_scale_against_the_top_contributor() {
        let stats = |login: &str, contributions: u64| ContributorStats {
            login: login.to_string(),
            contributions,
            files_owned: 0,
            primary_files: vec![],
        };

        let html = contributor_bars(&[stats("alice", 50), stats("bob", 25)]);
        assert!(html.contains("width: 100%"));
        assert!(html.contains("width: 50%"));
        assert!(html.contains("alice"));
    }

    #[test]
    fn bars_handle_empty_input() {
        assert!(contributor_bars(&[]).contains("No contributor data"));
    }
}
