//! HTML page assembly

use gitscope_analysis::AnalysisReport;

use crate::readme::render_text_tree;
use crate::types::{top_dependencies, ReportSummary};

/// Shared stylesheet for every generated page
pub(crate) fn generate_css() -> String {
    r#"
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    margin: 0;
    background: #f8f9fa;
    color: #333;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 20px;
}

.header {
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    padding: 30px;
    border-radius: 12px;
    margin-bottom: 30px;
    text-align: center;
}

.card {
    background: white;
    padding: 25px;
    margin-bottom: 25px;
    border-radius: 12px;
    box-shadow: 0 4px 6px rgba(0,0,0,0.1);
}

.stat-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 20px;
}

.stat-item {
    text-align: center;
    padding: 20px;
    background: #f8f9fa;
    border-radius: 8px;
}

.stat-number {
    font-size: 2em;
    font-weight: bold;
    color: #667eea;
    display: block;
}

.stat-label {
    color: #666;
    margin-top: 5px;
}

.insights {
    background: #e8f5e8;
    border-left: 4px solid #28a745;
    padding: 20px;
}

.insight-item {
    margin: 10px 0;
    padding: 8px 0;
}

.files-list {
    max-height: 300px;
    overflow-y: auto;
    background: #f8f9fa;
    padding: 15px;
    border-radius: 8px;
}

.nav {
    background: white;
    padding: 15px;
    border-radius: 8px;
    margin-bottom: 20px;
}

.nav a {
    margin-right: 15px;
    color: #667eea;
    text-decoration: none;
    font-weight: 500;
}

.nav a:hover {
    text-decoration: underline;
}

.mermaid {
    text-align: center;
}

table.heatmap {
    border-collapse: collapse;
}

table.heatmap th, table.heatmap td {
    padding: 6px 10px;
    text-align: center;
    font-size: 0.85em;
}

.heat-0 { background: #ebedf0; }
.heat-1 { background: #9be9a8; }
.heat-2 { background: #40c463; }
.heat-3 { background: #30a14e; color: white; }
.heat-4 { background: #216e39; color: white; }

.bar-chart {
    display: flex;
    flex-direction: column;
    gap: 8px;
}

.bar-row {
    display: flex;
    align-items: center;
}

.bar-label {
    width: 160px;
    text-align: right;
    padding-right: 10px;
    font-size: 0.9em;
}

.bar {
    background: steelblue;
    color: white;
    padding: 4px 8px;
    border-radius: 4px;
    min-width: 2em;
    font-size: 0.85em;
}

h1, h2, h3 { color: #333; }
.header h1, .header p { color: white; }
"#
    .to_string()
}

/// Wrap a body in the shared page chrome
pub(crate) fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <div class="container">
        <div class="nav">
            <a href="index.html">🏠 Overview</a>
        </div>
{}
    </div>
</body>
</html>"#,
        title, body
    )
}

/// Wrap a Mermaid diagram in a page that loads the renderer
pub(crate) fn mermaid_page(title: &str, heading: &str, diagram: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{}</title>
    <link rel="stylesheet" href="style.css">
    <script src="https://cdnjs.cloudflare.com/ajax/libs/mermaid/10.6.1/mermaid.min.js"></script>
</head>
<body>
    <div class="container">
        <div class="nav">
            <a href="index.html">🏠 Overview</a>
        </div>
        <div class="card">
            <h1>{}</h1>
            <div class="mermaid">
{}
            </div>
        </div>
    </div>
    <script>
        mermaid.initialize({{startOnLoad:true, theme: 'default'}});
    </script>
</body>
</html>"#,
        title, heading, diagram
    )
}

/// The main report page
pub(crate) fn index_page(report: &AnalysisReport, summary: &ReportSummary) -> String {
    let repo = &report.repository;

    let stats = format!(
        r#"<div class="stat-grid">
    <div class="stat-item"><span class="stat-number">{}</span><div class="stat-label">Total Files</div></div>
    <div class="stat-item"><span class="stat-number">{}</span><div class="stat-label">Dependencies</div></div>
    <div class="stat-item"><span class="stat-number">{}</span><div class="stat-label">Commits Analyzed</div></div>
    <div class="stat-item"><span class="stat-number">{}</span><div class="stat-label">Active Contributors</div></div>
</div>"#,
        summary.total_files,
        summary.total_dependencies,
        summary.total_commits_analyzed,
        summary.active_contributors
    );

    let dependencies_section = if report.dependencies.is_empty() {
        "<p>No dependencies detected or analysis unavailable.</p>".to_string()
    } else {
        let items: String = top_dependencies(&report.dependencies, 10)
            .iter()
            .map(|dep| format!("        <li><code>{}</code></li>\n", dep))
            .collect();
        format!(
            "<p><a href=\"dependency_graph.html\">📊 View Dependency Graph</a></p>\n\
             <h3>Top Dependencies:</h3>\n    <ul>\n{}    </ul>",
            items
        )
    };

    let changed_files_section = if summary.most_changed_files.is_empty() {
        String::new()
    } else {
        let items: String = summary
            .most_changed_files
            .iter()
            .map(|(file, changes)| {
                format!("        <li><code>{}</code> - {} changes</li>\n", file, changes)
            })
            .collect();
        format!(
            "<h3>Most Frequently Changed Files:</h3>\n    <ol>\n{}    </ol>",
            items
        )
    };

    let insights: String = report
        .insights
        .iter()
        .map(|insight| format!("        <div class=\"insight-item\">{}</div>\n", insight))
        .collect();

    let body = format!(
        r#"<div class="header">
    <h1>🔍 {name}</h1>
    <p>{description}</p>
    <p><strong>{language}</strong> • ⭐ {stars} • 🍴 {forks}</p>
</div>

<div class="card">
    <h2>📊 Repository Overview</h2>
    {stats}
</div>

<div class="card">
    <h2>📁 File Structure</h2>
    <p><a href="file_structure.html">🎨 View Interactive Diagram</a></p>
    <div class="files-list"><pre>{tree}</pre></div>
</div>

<div class="card">
    <h2>🔗 Dependencies Analysis</h2>
    {dependencies}
</div>

<div class="card">
    <h2>📈 Repository Activity</h2>
    {changed_files}
    <p><a href="commit_activity.html">🔥 View Commit Heatmap</a></p>
    <p><a href="language_distribution.html">📊 View Language Distribution</a></p>
    <p><a href="contributor_analysis.html">👥 View Contributor Analysis</a></p>
</div>

<div class="card">
    <h2>💡 Analysis Insights</h2>
    <div class="insights">
{insights}    </div>
</div>

<div class="card">
    <h2>📋 Generated Files</h2>
    <ul>
        <li><a href="AUTO_README.md">📝 Auto-generated README</a></li>
        <li><a href="analysis_report.json">📊 Detailed JSON Report</a></li>
        <li><a href="file_structure.html">🌳 Interactive File Structure</a></li>
        <li><a href="dependency_graph.html">🔗 Dependency Graph</a></li>
        <li><a href="commit_activity.html">🔥 Commit Heatmap</a></li>
        <li><a href="language_distribution.html">📈 Language Distribution</a></li>
        <li><a href="contributor_analysis.html">👥 Contributor Analysis</a></li>
    </ul>
</div>"#,
        name = repo.name,
        description = repo
            .description
            .as_deref()
            .unwrap_or("No description available"),
        language = repo.language.as_deref().unwrap_or("Unknown"),
        stars = repo.stars,
        forks = repo.forks,
        stats = stats,
        tree = render_text_tree(&report.tree),
        dependencies = dependencies_section,
        changed_files = changed_files_section,
        insights = insights,
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Analysis Report</title>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <div class="container">
{}
    </div>
</body>
</html>"#,
        repo.name, body
    )
}
