//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/docfold/) and project (.docfold/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{generator, layout};
use crate::naming::ContainerNames;
use crate::types::{DocfoldError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Aggregation settings
    pub collector: CollectorConfig,

    /// External generator settings
    pub generator: GeneratorConfig,

    /// Feature flags
    pub features: FeatureFlags,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            collector: CollectorConfig::default(),
            generator: GeneratorConfig::default(),
            features: FeatureFlags::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `DocfoldError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.generator.command.trim().is_empty() {
            return Err(DocfoldError::Config(
                "Generator command must not be empty".to_string(),
            ));
        }

        if self.generator.timeout_secs == 0 {
            return Err(DocfoldError::Config(
                "Generator timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.collector.format.trim().is_empty() {
            return Err(DocfoldError::Config(
                "Collector format must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Collector Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Modules to aggregate. Empty means every discovered module.
    pub modules: Vec<String>,

    /// Aggregate output directory (relative to the project root)
    pub output_dir: PathBuf,

    /// Per-module tasks to collect from. Empty means the format's default task.
    pub task_names: Vec<String>,

    /// Output format, used to derive task and classpath names
    pub format: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            output_dir: PathBuf::from(layout::DEFAULT_OUTPUT_DIR),
            task_names: Vec::new(),
            format: generator::DEFAULT_FORMAT.to_string(),
        }
    }
}

impl CollectorConfig {
    /// Task names to collect from, falling back to the format's task
    pub fn effective_task_names(&self) -> Vec<String> {
        if self.task_names.is_empty() {
            vec![ContainerNames::new(&self.format).task()]
        } else {
            self.task_names.clone()
        }
    }
}

// =============================================================================
// Generator Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Executable to run
    pub command: String,

    /// Arguments placed before the configuration file path
    pub args: Vec<String>,

    /// Invocation timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: generator::DEFAULT_COMMAND.to_string(),
            args: Vec::new(),
            timeout_secs: generator::DEFAULT_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Feature Flags
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FeatureFlags {
    /// Use v2 mode instead of the deprecated classic mode
    pub enable_v2: bool,

    /// Hide the v2 notice
    pub suppress_v2_message: bool,

    /// Enable experimental K2 analysis in the generator
    pub enable_k2_analysis: bool,

    /// Hide the K2 notice
    pub suppress_k2_message: bool,
}

// =============================================================================
// Tests
// =============================================================================
