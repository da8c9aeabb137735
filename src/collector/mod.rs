//! Module Configuration Collector
//!
//! Aggregates the configurations produced by each module's configuration task
//! into one generator run.
//!
//! ## Modules
//!
//! - `aggregate`: the conflict-checked merge
//! - `discovery`: finding modules and their produced configurations
//! - `enforced`: single-assignment handle shared with generator tasks
//! - `task`: collector and generator tasks

pub mod aggregate;
pub mod discovery;
pub mod enforced;
pub mod task;

pub use aggregate::{CollectOutcome, CollectRequest, aggregate, collect};
pub use discovery::{FsDiscovery, InMemoryDiscovery, ModuleDiscovery, configuration_path};
pub use enforced::EnforcedConfiguration;
pub use task::{CollectReport, CollectorTask, GeneratorTask};
