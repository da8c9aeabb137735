//! Module and aggregate configuration types
//!
//! A `ModuleConfiguration` is what one module's configuration task produced.
//! An `AggregateConfiguration` is the single merged result handed to the
//! generator.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::source_set::SourceSet;

/// Generator configuration produced for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfiguration {
    #[serde(default)]
    pub source_sets: Vec<SourceSet>,
    #[serde(default)]
    pub plugins_classpath: Vec<PathBuf>,
    #[serde(default)]
    pub cache_root: Option<PathBuf>,
}

impl ModuleConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cache_root = Some(root.into());
        self
    }

    pub fn with_source_set(mut self, source_set: SourceSet) -> Self {
        self.source_sets.push(source_set);
        self
    }

    pub fn with_plugin(mut self, path: impl Into<PathBuf>) -> Self {
        self.plugins_classpath.push(path.into());
        self
    }
}

/// Merged configuration for a single generator invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateConfiguration {
    #[serde(rename = "outputDir")]
    pub output_dir: PathBuf,
    pub cache_root: Option<PathBuf>,
    pub source_sets: Vec<SourceSet>,
    pub plugins_classpath: Vec<PathBuf>,
}

impl AggregateConfiguration {
    /// Number of source sets across all aggregated modules
    pub fn source_set_count(&self) -> usize {
        self.source_sets.len()
    }
}
