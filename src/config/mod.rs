//! Configuration
//!
//! `collector`, `generator` and `features` sections, resolved through
//! [`ConfigLoader`] from defaults, global and project files, then the
//! environment. Command-line flags override the result per command.

mod loader;
mod types;

pub use loader::{ConfigLayer, ConfigLoader};
pub use types::{CollectorConfig, Config, FeatureFlags, GeneratorConfig};
