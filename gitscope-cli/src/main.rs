//! GitScope CLI - repository analyzer and report generator
//!
//! Analyzes one GitHub repository via the REST API and renders static
//! HTML/JSON reports. Running with no arguments drops into an interactive
//! prompt sequence instead of parsing flags.

use clap::Parser;
use dialoguer::Input;
use std::path::PathBuf;
use tracing::info;

use gitscope_analysis::{AnalysisReport, Analyzer};
use gitscope_core::{
    init_logging, log_operation_error, log_operation_start, log_operation_success, ErrorContext,
    GitScopeConfig, GitScopeError, GitScopeResult, LoggingConfig,
};
use gitscope_repo::{ApiClientConfig, GitHubClient, RepoLocator};
use gitscope_report::{ReportExporter, ReportFormat, ReportSummary};

#[derive(Parser)]
#[command(name = "gitscope")]
#[command(about = "Repository analyzer and report generator")]
#[command(version = "0.1.0")]
struct Cli {
    /// GitHub repository URL or owner/repo shorthand
    repo_url: String,

    /// GitHub personal access token (falls back to GITHUB_TOKEN)
    #[arg(short, long)]
    token: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Output format
    #[arg(long, default_value = "all", value_parser = ["html", "json", "all"])]
    format: String,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Inputs of one analysis run, from flags or interactive prompts
struct RunRequest {
    repo_url: String,
    token: Option<String>,
    output: PathBuf,
    format: String,
    config_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Zero arguments means interactive mode; clap would reject the missing
    // positional otherwise.
    let interactive = std::env::args().len() == 1;

    let result = if interactive {
        run_interactive().await
    } else {
        run_from_args().await
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            if let Some(context) = e.context() {
                for suggestion in &context.recovery_suggestions {
                    eprintln!("   💡 {}", suggestion);
                }
            }
            std::process::exit(1);
        }
    }
}

async fn run_from_args() -> GitScopeResult<()> {
    let cli = Cli::parse();

    let mut logging_config = LoggingConfig::default();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }
    init_logging(&logging_config).map_err(|e| GitScopeError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli").with_operation("init_logging"),
    })?;

    info!("Starting GitScope v{}", env!("CARGO_PKG_VERSION"));

    run(RunRequest {
        repo_url: cli.repo_url,
        token: cli.token,
        output: cli.output,
        format: cli.format,
        config_path: cli.config,
    })
    .await
}

async fn run_interactive() -> GitScopeResult<()> {
    init_logging(&LoggingConfig::default()).map_err(|e| GitScopeError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli").with_operation("init_logging"),
    })?;

    println!("🎯 GitScope - Interactive Mode");
    println!("========================================");

    let token: String = Input::new()
        .with_prompt("GitHub personal access token (optional, press Enter to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    let token = if token.trim().is_empty() {
        println!("⚠️ Running without token - API rate limits may apply");
        None
    } else {
        Some(token.trim().to_string())
    };

    println!("\n📝 Repository Input:");
    println!("  • https://github.com/owner/repo");
    println!("  • owner/repo");

    let repo_url: String = Input::new()
        .with_prompt("Repository URL or owner/repo")
        .default("microsoft/vscode".to_string())
        .interact_text()
        .map_err(prompt_error)?;

    let output: String = Input::new()
        .with_prompt("Output directory")
        .default("output".to_string())
        .interact_text()
        .map_err(prompt_error)?;

    println!("\n🚀 Starting analysis of {}...", repo_url);

    run(RunRequest {
        repo_url,
        token,
        output: PathBuf::from(output),
        format: "all".to_string(),
        config_path: None,
    })
    .await
}

fn prompt_error(e: dialoguer::Error) -> GitScopeError {
    GitScopeError::Config {
        message: format!("Failed to get user input: {}", e),
        source: Some(Box::new(e)),
        context: ErrorContext::new("cli").with_operation("interactive_prompt"),
    }
}

async fn run(request: RunRequest) -> GitScopeResult<()> {
    log_operation_start!("analyze_repository", repo = %request.repo_url);

    let config = load_config(request.config_path.as_ref())?;
    config.validate()?;

    let format = ReportFormat::parse(&request.format)?;
    let locator = RepoLocator::parse(&request.repo_url)?;

    let token = request
        .token
        .or_else(|| std::env::var("GITHUB_TOKEN").ok());
    let api_config = ApiClientConfig::github(token)
        .with_timeout(config.api.timeout_seconds)
        .with_user_agent(&config.api.user_agent);

    println!("🔍 Analyzing repository: {}", locator);

    let client = GitHubClient::new(locator, api_config)?;
    let analyzer = Analyzer::new(&client, config.analysis.clone());

    let report = analyzer.run().await.map_err(|e| {
        log_operation_error!("analyze_repository", e, repo = %request.repo_url);
        e
    })?;

    let exporter = ReportExporter::new();
    let written = exporter.export(&report, format, &request.output).await?;

    println!("\n🎉 Analysis Complete!");
    println!("📁 Results saved to: {}/", request.output.display());
    if format.includes_html() {
        println!(
            "🌐 Open {}/index.html to view the complete report",
            request.output.display()
        );
    }

    print_summary(&report);

    log_operation_success!("analyze_repository",
        repo = %request.repo_url,
        files_written = written.len()
    );
    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    let summary = ReportSummary::from_report(report);

    println!("\n📋 Quick Summary:");
    println!("  • Repository: {}", report.repository.name);
    println!("  • Total Files: {}", summary.total_files);
    println!("  • Dependencies: {}", summary.total_dependencies);
    println!("  • Commits Analyzed: {}", summary.total_commits_analyzed);
    println!("  • Contributors: {}", summary.active_contributors);

    if !report.insights.is_empty() {
        println!("\n💡 Key Insights:");
        for insight in report.insights.iter().take(3) {
            println!("  • {}", insight);
        }
    }
}

/// Load configuration from an explicit path or the default locations
fn load_config(config_path: Option<&PathBuf>) -> GitScopeResult<GitScopeConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return GitScopeConfig::from_file(path);
    }

    let default_paths = [
        dirs::config_dir().map(|d| d.join("gitscope").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".gitscope").join("config.toml")),
        Some(PathBuf::from("gitscope.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return GitScopeConfig::from_file(path);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(GitScopeConfig::default())
}
