//! Configuration Loader (Figment-based)
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. Global file (`$XDG_CONFIG_HOME/docfold/config.toml`)
//! 3. Project file (`<project>/.docfold/config.toml`)
//! 4. `DOCFOLD_*` environment variables, `__` between section and key
//!
//! CLI flags are applied on top by the commands themselves.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::layout;
use crate::types::{DocfoldError, Result};

const ENV_PREFIX: &str = "DOCFOLD_";
const CONFIG_FILE: &str = "config.toml";

/// A file-backed configuration layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub name: &'static str,
    pub path: PathBuf,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Effective configuration for a project
    pub fn load(project_root: &Path) -> Result<Config> {
        Self::load_with_env_prefix(project_root, ENV_PREFIX)
    }

    fn load_with_env_prefix(project_root: &Path, prefix: &str) -> Result<Config> {
        let figment = Self::layers(project_root)
            .into_iter()
            .filter(|layer| layer.path.exists())
            .fold(
                Figment::new().merge(Serialized::defaults(Config::default())),
                |figment, layer| {
                    debug!("Merging {} config from {}", layer.name, layer.path.display());
                    figment.merge(Toml::file(&layer.path))
                },
            )
            // DOCFOLD_GENERATOR__TIMEOUT_SECS -> generator.timeout_secs
            .merge(Env::prefixed(prefix).split("__").lowercase(true));

        Self::finish(figment)
    }

    /// Defaults overlaid with a single file, ignoring every other layer
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Self::finish(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(path)),
        )
    }

    fn finish(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .map_err(|e| DocfoldError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Locations
    // =========================================================================

    /// File layers in merge order. The global layer is absent when neither
    /// `XDG_CONFIG_HOME` nor `HOME` is set.
    pub fn layers(project_root: &Path) -> Vec<ConfigLayer> {
        let mut layers = Vec::with_capacity(2);
        if let Some(path) = Self::global_config_path() {
            layers.push(ConfigLayer {
                name: "global",
                path,
            });
        }
        layers.push(ConfigLayer {
            name: "project",
            path: Self::project_config_path(project_root),
        });
        layers
    }

    /// `~/.config/docfold/` unless `XDG_CONFIG_HOME` points elsewhere
    pub fn global_dir() -> Option<PathBuf> {
        let base = match env::var_os("XDG_CONFIG_HOME") {
            Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
            _ => PathBuf::from(env::var_os("HOME")?).join(".config"),
        };
        Some(base.join("docfold"))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        Some(Self::global_dir()?.join(CONFIG_FILE))
    }

    pub fn project_dir(project_root: &Path) -> PathBuf {
        project_root.join(layout::PROJECT_DIR)
    }

    pub fn project_config_path(project_root: &Path) -> PathBuf {
        Self::project_dir(project_root).join(CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Print every layer and whether its file exists
    pub fn show_path(project_root: &Path) {
        println!("Configuration layers (later wins):");
        println!();
        println!("  defaults  (built in)");
        for layer in Self::layers(project_root) {
            let mark = if layer.path.exists() { "✓" } else { "✗" };
            println!("  {:<9} {} {}", layer.name, mark, layer.path.display());
        }
        println!("  env       {}<SECTION>__<KEY>", ENV_PREFIX);
    }

    /// Print the merged configuration as TOML, or JSON when asked
    pub fn show_config(project_root: &Path, as_json: bool) -> Result<()> {
        let config = Self::load(project_root)?;
        let rendered = if as_json {
            serde_json::to_string_pretty(&config)?
        } else {
            toml::to_string_pretty(&config).map_err(|e| DocfoldError::Config(e.to_string()))?
        };
        println!("{}", rendered);
        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the global template. Returns the global config directory.
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let dir = Self::global_dir().ok_or_else(|| {
            DocfoldError::Config("Cannot determine global config directory".to_string())
        })?;
        write_template(&dir.join(CONFIG_FILE), &global_template(), force)?;
        Ok(dir)
    }

    /// Write the project template listing `modules`. Returns the project
    /// config directory.
    pub fn init_project(project_root: &Path, modules: &[String], force: bool) -> Result<PathBuf> {
        write_template(
            &Self::project_config_path(project_root),
            &project_template(modules),
            force,
        )?;
        Ok(Self::project_dir(project_root))
    }
}

/// Write `content` unless the file exists and `force` is off.
/// Returns whether the file was written.
fn write_template(path: &Path, content: &str, force: bool) -> Result<bool> {
    if path.exists() && !force {
        info!("Config exists, leaving it untouched: {}", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!("Wrote config: {}", path.display());
    Ok(true)
}

fn global_template() -> String {
    r#"# docfold global configuration
# Project files (.docfold/config.toml) override these values.

version = "1.0"

[generator]
command = "dokka-cli"
timeout_secs = 600

[features]
enable_v2 = false
"#
    .to_string()
}

fn project_template(modules: &[String]) -> String {
    let modules = modules
        .iter()
        .map(|m| format!("\"{}\"", m))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"# docfold project configuration

version = "1.0"

[collector]
# Modules to aggregate (folded in directory order); empty means every module with a docfold.toml
modules = [{}]
output_dir = "{}"
format = "html"
"#,
        modules,
        layout::DEFAULT_OUTPUT_DIR
    )
}
