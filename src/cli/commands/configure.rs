//! Configure Command
//!
//! Run the per-module configuration task: build each module's configuration
//! from its `docfold.toml` and write it where `collect` reads it.

use crate::builder::configure_module;
use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::collector::{FsDiscovery, ModuleDiscovery};
use crate::naming::ContainerNames;
use crate::types::{DocfoldError, ModuleId, Result};

pub fn run(ctx: &CommandContext, modules: Vec<String>, task: Option<String>) -> Result<()> {
    let output = Output::new();
    let discovery = FsDiscovery::new(&ctx.project_root);
    let available = discovery.list_subprojects()?;

    let targets: Vec<ModuleId> = if modules.is_empty() {
        available
    } else {
        modules
            .into_iter()
            .map(ModuleId::from)
            .map(|id| {
                if available.contains(&id) {
                    Ok(id)
                } else {
                    Err(DocfoldError::discovery(
                        id.as_str(),
                        "no docfold.toml in module directory",
                    ))
                }
            })
            .collect::<Result<Vec<_>>>()?
    };

    let task_name =
        task.unwrap_or_else(|| ContainerNames::new(&ctx.config.collector.format).task());

    if targets.is_empty() {
        output.warning("No modules found (looking for */docfold.toml)");
        return Ok(());
    }

    for module in &targets {
        let path = configure_module(&ctx.project_root, module, &task_name)?;
        output.success(&format!("{} → {}", module, path.display()));
    }
    Ok(())
}
