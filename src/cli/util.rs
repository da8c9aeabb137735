//! CLI Common Utilities
//!
//! Shared context loading for CLI commands.

use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigLoader};
use crate::features::PluginFeatures;
use crate::types::{DocfoldError, Result};

/// Command execution context
///
/// Resolved project root plus the configuration loaded for it.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Project root directory
    pub project_root: PathBuf,
    /// Loaded configuration
    pub config: Config,
}

impl CommandContext {
    /// Load context for `project` (defaults to the current directory)
    pub fn load(project: Option<&Path>) -> Result<Self> {
        let project_root = match project {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().map_err(DocfoldError::Io)?,
        };

        if !project_root.is_dir() {
            return Err(DocfoldError::Config(format!(
                "Project directory does not exist: {}",
                project_root.display()
            )));
        }

        let config = ConfigLoader::load(&project_root)?;
        Ok(Self {
            project_root,
            config,
        })
    }

    /// Feature service for this process
    pub fn features(&self) -> &'static PluginFeatures {
        PluginFeatures::shared(&self.config.features)
    }

    /// Output directory, resolved against the project root
    pub fn output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        let dir = override_dir.unwrap_or(&self.config.collector.output_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.project_root.join(dir)
        }
    }
}
