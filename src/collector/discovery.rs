//! Module Discovery
//!
//! How the collector finds modules and the configurations their tasks produced.
//! The host environment supplies a [`ModuleDiscovery`]; docfold ships a
//! filesystem implementation and an in-memory one.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::layout::{BUILD_DIR, CONFIGURATION_FILE, MODULE_FILE};
use crate::types::{DocfoldError, ModuleConfiguration, ModuleId, Result};

/// Module discovery collaborator
pub trait ModuleDiscovery: Send + Sync {
    /// All modules of the project
    fn list_subprojects(&self) -> Result<Vec<ModuleId>>;

    /// The configuration produced for `module` by the first of `task_names`
    /// that has one, or `None` if no task produced a configuration.
    fn find_configuration(
        &self,
        module: &ModuleId,
        task_names: &[String],
    ) -> Result<Option<ModuleConfiguration>>;
}

/// Where the configuration task `task_name` writes its result for a module
pub fn configuration_path(module_dir: &Path, task_name: &str) -> PathBuf {
    module_dir
        .join(BUILD_DIR)
        .join(task_name)
        .join(CONFIGURATION_FILE)
}

// =============================================================================
// Filesystem Discovery
// =============================================================================

/// Discovers modules as sub-directories of the project root holding a
/// `docfold.toml`
#[derive(Debug, Clone)]
pub struct FsDiscovery {
    project_root: PathBuf,
}

impl FsDiscovery {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn module_dir(&self, module: &ModuleId) -> PathBuf {
        self.project_root.join(module.as_str())
    }
}

impl ModuleDiscovery for FsDiscovery {
    fn list_subprojects(&self) -> Result<Vec<ModuleId>> {
        let mut modules = Vec::new();

        for entry in fs::read_dir(&self.project_root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() || !path.join(MODULE_FILE).is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                modules.push(ModuleId::new(name));
            }
        }

        // read_dir order is platform dependent
        modules.sort();
        debug!("Discovered {} modules", modules.len());
        Ok(modules)
    }

    fn find_configuration(
        &self,
        module: &ModuleId,
        task_names: &[String],
    ) -> Result<Option<ModuleConfiguration>> {
        let module_dir = self.module_dir(module);

        for task_name in task_names {
            let path = configuration_path(&module_dir, task_name);
            if !path.is_file() {
                continue;
            }

            debug!("Reading {} configuration from {}", module, path.display());
            let content = fs::read_to_string(&path)?;
            let configuration = serde_json::from_str(&content).map_err(|e| {
                DocfoldError::discovery(
                    module.as_str(),
                    format!("invalid configuration {}: {}", path.display(), e),
                )
            })?;
            return Ok(Some(configuration));
        }

        Ok(None)
    }
}

// =============================================================================
// In-Memory Discovery
// =============================================================================

/// Discovery over configurations held in memory, keyed by module then task
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiscovery {
    modules: IndexMap<ModuleId, HashMap<String, ModuleConfiguration>>,
}

impl InMemoryDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module that has no produced configuration
    pub fn with_module(mut self, module: impl Into<ModuleId>) -> Self {
        self.modules.entry(module.into()).or_default();
        self
    }

    /// Register a configuration produced by `task_name` for `module`
    pub fn with_configuration(
        mut self,
        module: impl Into<ModuleId>,
        task_name: impl Into<String>,
        configuration: ModuleConfiguration,
    ) -> Self {
        self.modules
            .entry(module.into())
            .or_default()
            .insert(task_name.into(), configuration);
        self
    }
}

impl ModuleDiscovery for InMemoryDiscovery {
    fn list_subprojects(&self) -> Result<Vec<ModuleId>> {
        Ok(self.modules.keys().cloned().collect())
    }

    fn find_configuration(
        &self,
        module: &ModuleId,
        task_names: &[String],
    ) -> Result<Option<ModuleConfiguration>> {
        let Some(tasks) = self.modules.get(module) else {
            return Ok(None);
        };
        Ok(task_names
            .iter()
            .find_map(|name| tasks.get(name))
            .cloned())
    }
}
