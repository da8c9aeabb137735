//! Unified Error Type System
//!
//! Centralized error types for the collector, the source set builder and the
//! generator bridge.
//!
//! ## Error Kinds
//!
//! - **Conflict**: Modules disagree on a core argument (cache root)
//! - **Empty**: No module produced a usable configuration
//! - **Generator**: The external generator failed or timed out
//! - **Missing**: A required property has no value
//!
//! Every variant is fatal to the aggregation step. Nothing is retried.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Render an optional cache root for error messages
fn display_root(root: &Option<PathBuf>) -> String {
    match root {
        Some(path) => path.display().to_string(),
        None => "<unset>".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum DocfoldError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // -------------------------------------------------------------------------
    // Aggregation Errors
    // -------------------------------------------------------------------------
    /// Two modules disagree on the shared generator cache root
    #[error(
        "Module configurations differ on core argument cacheRoot: module '{module}' has {}, expected {}",
        display_root(found),
        display_root(expected)
    )]
    ConfigurationConflict {
        module: String,
        expected: Option<PathBuf>,
        found: Option<PathBuf>,
    },

    /// Nothing to aggregate
    #[error("No module produced a documentation configuration (requested: {})", requested.join(", "))]
    EmptyAggregationSet { requested: Vec<String> },

    /// The enforced configuration cell was written twice
    #[error("Enforced configuration has already been published")]
    AlreadyPublished,

    #[error("Cannot query the value of property '{property}' because it has no value available")]
    MissingValue { property: String },

    // -------------------------------------------------------------------------
    // Generator Errors
    // -------------------------------------------------------------------------
    #[error("Generator invocation failed: {0}")]
    GeneratorInvocation(String),

    #[error("Generator timed out after {duration:?}")]
    GeneratorTimeout { duration: Duration },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Discovery failed for module '{module}': {message}")]
    Discovery { module: String, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DocfoldError>;

impl DocfoldError {
    /// Create a missing value error for a named property
    pub fn missing(property: impl Into<String>) -> Self {
        Self::MissingValue {
            property: property.into(),
        }
    }

    /// Create a discovery error with module context
    pub fn discovery(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Discovery {
            module: module.into(),
            message: message.into(),
        }
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| DocfoldError::Config(format!("{}: {}", context.into(), e)))
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| DocfoldError::Config(format!("{}: {}", f().into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_names_both_values() {
        let err = DocfoldError::ConfigurationConflict {
            module: "io".to_string(),
            expected: Some(PathBuf::from("/cache")),
            found: Some(PathBuf::from("/other")),
        };
        let message = err.to_string();
        assert!(message.contains("cacheRoot"));
        assert!(message.contains("/cache"));
        assert!(message.contains("/other"));
        assert!(message.contains("'io'"));
    }

    #[test]
    fn test_missing_value_message() {
        let err = DocfoldError::missing("url");
        assert_eq!(
            err.to_string(),
            "Cannot query the value of property 'url' because it has no value available"
        );
    }

    #[test]
    fn test_empty_set_lists_requested() {
        let err = DocfoldError::EmptyAggregationSet {
            requested: vec!["core".to_string(), "io".to_string()],
        };
        assert!(err.to_string().contains("core, io"));
    }

    #[test]
    fn test_with_context() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = res.with_context("reading module file").unwrap_err();
        assert_eq!(err.to_string(), "Config error: reading module file: gone");
    }
}
