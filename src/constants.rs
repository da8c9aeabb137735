//! Global Constants
//!
//! Centralized constants for paths, naming and tuning.

/// Filesystem layout constants
pub mod layout {
    /// Module spec file expected at the root of every documented module
    pub const MODULE_FILE: &str = "docfold.toml";

    /// Per-module build directory holding produced configurations
    pub const BUILD_DIR: &str = "build/docfold";

    /// File name of a produced module configuration
    pub const CONFIGURATION_FILE: &str = "configuration.json";

    /// Default aggregate output directory, relative to the project root
    pub const DEFAULT_OUTPUT_DIR: &str = "build/docfold/collector";

    /// Directory (inside the output dir) receiving the merged generator input
    pub const GENERATOR_INPUT_DIR: &str = ".docfold";

    /// Project-level data directory
    pub const PROJECT_DIR: &str = ".docfold";
}

/// Generator invocation constants
pub mod generator {
    /// Default generator command
    pub const DEFAULT_COMMAND: &str = "dokka-cli";

    /// Default generator timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

    /// Default output format
    pub const DEFAULT_FORMAT: &str = "html";
}

/// Source set defaults
pub mod source_set {
    /// JDK version used for linking when a source set does not declare one
    pub const DEFAULT_JDK_VERSION: u32 = 8;

    /// Appended to an external documentation URL to locate its package list
    pub const PACKAGE_LIST_FILE: &str = "package-list";
}

/// Container and task naming
pub mod naming {
    /// Prefix of every task and classpath container name
    pub const BASE_NAME: &str = "docfold";

    /// Base name of the plugins classpath container
    pub const PLUGINS_CLASSPATH_BASE: &str = "docfoldPlugin";
}
