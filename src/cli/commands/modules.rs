//! Modules Command
//!
//! List the project's modules and which tasks have produced a configuration.

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::collector::{FsDiscovery, ModuleDiscovery, configuration_path};
use crate::types::Result;

pub fn run(ctx: &CommandContext, format: &str) -> Result<()> {
    let discovery = FsDiscovery::new(&ctx.project_root);
    let task_names = ctx.config.collector.effective_task_names();
    let modules = discovery.list_subprojects()?;

    let rows: Vec<(String, Vec<String>)> = modules
        .iter()
        .map(|module| {
            let module_dir = discovery.module_dir(module);
            let configured = task_names
                .iter()
                .filter(|task| configuration_path(&module_dir, task).is_file())
                .cloned()
                .collect();
            (module.to_string(), configured)
        })
        .collect();

    if format == "json" {
        let json: Vec<_> = rows
            .iter()
            .map(|(module, tasks)| serde_json::json!({ "module": module, "configured": tasks }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    let output = Output::new();
    output.section("Modules");
    if rows.is_empty() {
        output.warning("No modules found (looking for */docfold.toml)");
        return Ok(());
    }
    for (module, tasks) in &rows {
        output.module_row(module, tasks);
    }
    Ok(())
}
