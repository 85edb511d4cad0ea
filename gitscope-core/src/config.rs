//! Configuration loading and validation

use crate::error::{ErrorContext, GitScopeError, GitScopeResult};
use crate::types::{AnalysisConfig, ApiConfig, GitScopeConfig, OutputConfig};

use std::path::Path;

impl Default for GitScopeConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://api.github.com".to_string(),
                timeout_seconds: 30,
                user_agent: "gitscope/0.1".to_string(),
            },
            analysis: AnalysisConfig {
                source_extensions: vec![".py".to_string()],
                max_file_size_bytes: 1_000_000,
                commit_window_days: 180,
                max_commits: 100,
                max_files_per_commit: 10,
                max_contributors: 20,
            },
            output: OutputConfig {
                dir: "output".to_string(),
                format: "all".to_string(),
            },
        }
    }
}

impl GitScopeConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> GitScopeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GitScopeError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: GitScopeConfig =
            toml::from_str(&content).map_err(|e| GitScopeError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GitScopeResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| GitScopeError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| GitScopeError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> GitScopeResult<()> {
        if self.api.timeout_seconds == 0 {
            return Err(GitScopeError::Config {
                message: "API timeout_seconds must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set api.timeout_seconds to a positive value"),
            });
        }

        if self.analysis.max_file_size_bytes == 0 {
            return Err(GitScopeError::Config {
                message: "Analysis max_file_size_bytes must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set analysis.max_file_size_bytes to a positive value"),
            });
        }

        if self.analysis.source_extensions.is_empty() {
            return Err(GitScopeError::Config {
                message: "At least one source extension is required".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set analysis.source_extensions, e.g. [\".py\"]"),
            });
        }

        match self.output.format.as_str() {
            "html" | "json" | "all" => {}
            other => {
                return Err(GitScopeError::Config {
                    message: format!("Unknown output format: {}", other),
                    source: None,
                    context: ErrorContext::new("config")
                        .with_operation("validate")
                        .with_suggestion("Supported formats: html, json, all"),
                });
            }
        }

        Ok(())
    }
}
