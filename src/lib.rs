//! docfold - Multi-Module Documentation Collector
//!
//! Collects the documentation-generator configurations produced for each
//! module of a project, checks that they agree, merges them and runs the
//! generator exactly once with the merged inputs.
//!
//! ## Core Features
//!
//! - **Conflict-Checked Merge**: modules must share one generator cache root
//! - **Ordered Aggregation**: source sets concatenated, plugin classpaths unioned
//! - **Single Publication**: generator tasks read one enforced configuration
//! - **Module Specs**: `docfold.toml` per module, validated into source sets
//!
//! ## Quick Start
//!
//! ```ignore
//! use docfold::{CollectRequest, CollectorTask, FsDiscovery, ProcessGenerator};
//!
//! let collector = CollectorTask::new(request, Arc::new(FsDiscovery::new(&root)))
//!     .with_generator("html", Arc::new(ProcessGenerator::new(&config.generator)));
//! let report = collector.execute().await?;
//! ```
//!
//! ## Modules
//!
//! - [`collector`]: aggregation, discovery, enforced configuration, tasks
//! - [`builder`]: module spec files and source set validation
//! - [`generator`]: generator abstraction and process backend
//! - [`config`]: layered configuration

pub mod builder;
pub mod cli;
pub mod collector;
pub mod config;
pub mod constants;
pub mod features;
pub mod generator;
pub mod naming;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{CollectorConfig, Config, ConfigLoader, FeatureFlags, GeneratorConfig};

// Error Types
pub use types::error::{DocfoldError, Result, ResultExt};

// Domain Types
pub use types::{AggregateConfiguration, ModuleConfiguration, ModuleId, SourceSet, SourceSetId};

// =============================================================================
// Collector Re-exports
// =============================================================================

pub use collector::{
    CollectOutcome, CollectReport, CollectRequest, CollectorTask, EnforcedConfiguration,
    FsDiscovery, GeneratorTask, InMemoryDiscovery, ModuleDiscovery, aggregate, collect,
};

// =============================================================================
// Generator & Builder Re-exports
// =============================================================================

pub use builder::{ModuleSpec, SourceSetBuilder, SourceSetSpec};
pub use features::PluginFeatures;
pub use generator::{Generator, GeneratorResult, ProcessGenerator};
pub use naming::ContainerNames;
