//! Config Command
//!
//! Manage docfold configuration.
//!
//! Usage:
//!   docfold config show [-g] [-f json]
//!   docfold config path
//!   docfold config init [-g] [--force]

use std::path::Path;

use crate::collector::{FsDiscovery, ModuleDiscovery};
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show configuration
pub fn show(project_root: &Path, global: bool, format: &str) -> Result<()> {
    if global {
        match ConfigLoader::global_config_path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)?;
                println!("# Global Config: {}\n", path.display());
                println!("{}", content);
            }
            Some(_) => {
                println!("No global config found.");
                println!("Run 'docfold config init --global' to create one.");
            }
            None => println!("Cannot determine global config directory."),
        }
    } else {
        ConfigLoader::show_config(project_root, format == "json")?;
    }
    Ok(())
}

/// Show configuration paths
pub fn path(project_root: &Path) -> Result<()> {
    ConfigLoader::show_path(project_root);
    Ok(())
}

/// Initialize global configuration
pub fn init_global(force: bool) -> Result<()> {
    let dir = ConfigLoader::init_global(force)?;
    println!("✓ Initialized global configuration");
    println!("  Directory: {}", dir.display());
    Ok(())
}

/// Initialize project configuration, listing the modules found today
pub fn init_project(project_root: &Path, force: bool) -> Result<()> {
    let modules: Vec<String> = FsDiscovery::new(project_root)
        .list_subprojects()?
        .into_iter()
        .map(|m| m.into_inner())
        .collect();

    let dir = ConfigLoader::init_project(project_root, &modules, force)?;
    println!("✓ Initialized project configuration");
    println!("  Directory: {}", dir.display());
    println!(
        "  Config:    {}",
        ConfigLoader::project_config_path(project_root).display()
    );
    if !modules.is_empty() {
        println!("  Modules:   {}", modules.join(", "));
    }
    Ok(())
}
