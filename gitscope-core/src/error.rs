//! Unified error handling
//!
//! Structured error types with context, recovery suggestions, and proper
//! error chaining.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type GitScopeResult<T> = Result<T, GitScopeError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where the error originated
    pub component: String,
    /// Operation being performed when the error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the GitScope system
#[derive(Error, Debug)]
pub enum GitScopeError {
    #[error("Repository error: {message}")]
    Repository {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    /// A directory listing entry whose shape the tree walker cannot
    /// interpret. Fatal: aborts the whole analysis run.
    #[error("Malformed listing entry: {message}")]
    Structure {
        message: String,
        context: ErrorContext,
    },

    #[error("Analysis error: {message}")]
    Analysis {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Report error: {message}")]
    Report {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },

    #[error("Resource not found: {resource}")]
    NotFound {
        resource: String,
        context: ErrorContext,
    },

    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after_ms: Option<u64>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GitScopeError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            GitScopeError::Repository { context, .. } => Some(context),
            GitScopeError::Structure { context, .. } => Some(context),
            GitScopeError::Analysis { context, .. } => Some(context),
            GitScopeError::Report { context, .. } => Some(context),
            GitScopeError::Config { context, .. } => Some(context),
            GitScopeError::Validation { context, .. } => Some(context),
            GitScopeError::NotFound { context, .. } => Some(context),
            GitScopeError::RateLimit { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Whether a failed remote call may succeed if reissued later.
    ///
    /// The analysis pipeline never retries; this only informs log levels and
    /// the suggestions printed at the top level.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GitScopeError::Repository { .. } | GitScopeError::RateLimit { .. }
        )
    }

    /// Log the error with the appropriate level
    pub fn log(&self) {
        if self.is_recoverable() {
            warn!(
                error_id = ?self.context().map(|c| &c.error_id),
                error = %self,
                "Recoverable error occurred"
            );
        } else {
            error!(
                error_id = ?self.context().map(|c| &c.error_id),
                error = %self,
                "Error occurred"
            );
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! repository_error {
    ($msg:expr, $component:expr) => {
        $crate::GitScopeError::Repository {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::GitScopeError::Repository {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component),
        }
    };
}

#[macro_export]
macro_rules! structure_error {
    ($msg:expr, $component:expr) => {
        $crate::GitScopeError::Structure {
            message: $msg.to_string(),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("The remote listing returned an entry shape this tool does not understand"),
        }
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        $crate::GitScopeError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file"),
        }
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr, $field:expr, $component:expr) => {
        $crate::GitScopeError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check the field value and format"),
        }
    };
}

#[macro_export]
macro_rules! not_found_error {
    ($resource:expr, $component:expr) => {
        $crate::GitScopeError::NotFound {
            resource: $resource.to_string(),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Verify the resource path or URL")
                .with_suggestion("Check if the resource exists and is accessible"),
        }
    };
}
