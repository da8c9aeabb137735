//! Collect Command
//!
//! Aggregate module configurations and run the generator once.
//!
//! Usage:
//!   docfold collect [--module core --module io] [--output dir] [--task name] [--dry-run]

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::collector::{CollectOutcome, CollectRequest, CollectorTask, FsDiscovery, ModuleDiscovery};
use crate::generator::ProcessGenerator;
use crate::types::Result;

/// Options for the collect command
#[derive(Debug, Default)]
pub struct CollectOptions {
    pub modules: Vec<String>,
    pub output: Option<PathBuf>,
    pub tasks: Vec<String>,
    pub dry_run: bool,
    pub json: bool,
}

/// Build the collect request: CLI values override configuration. With no
/// modules configured anywhere, every discovered module is requested.
fn build_request(
    ctx: &CommandContext,
    options: &CollectOptions,
    discovery: &dyn ModuleDiscovery,
) -> Result<CollectRequest> {
    let modules = if !options.modules.is_empty() {
        options.modules.clone()
    } else if !ctx.config.collector.modules.is_empty() {
        ctx.config.collector.modules.clone()
    } else {
        debug!("No modules configured, collecting every discovered module");
        discovery
            .list_subprojects()?
            .into_iter()
            .map(|m| m.into_inner())
            .collect()
    };

    let task_names = if options.tasks.is_empty() {
        ctx.config.collector.effective_task_names()
    } else {
        options.tasks.clone()
    };

    Ok(CollectRequest {
        modules,
        output_dir: ctx.output_dir(options.output.as_deref()),
        task_names,
    })
}

pub async fn run(ctx: &CommandContext, options: CollectOptions) -> Result<()> {
    let output = Output::new();
    // Resolving flags up front logs their notices before collection starts
    let generator_env = ctx.features().generator_env();

    let discovery: Arc<dyn ModuleDiscovery> = Arc::new(FsDiscovery::new(&ctx.project_root));
    let request = build_request(ctx, &options, discovery.as_ref())?;

    let generator = generator_env
        .into_iter()
        .fold(ProcessGenerator::new(&ctx.config.generator), |generator, (key, value)| {
            generator.with_env(key, value)
        });

    let collector = CollectorTask::new(request, discovery)
        .with_generator(ctx.config.collector.format.clone(), Arc::new(generator));

    if options.dry_run {
        let outcome = collector.plan()?;
        if options.json {
            println!("{}", serde_json::to_string_pretty(&outcome.configuration)?);
        } else {
            print_outcome(&output, &outcome);
            output.info("Dry run: generator not invoked");
        }
        return Ok(());
    }

    let report = collector.execute().await?;
    if options.json {
        let results: Vec<_> = report.results.iter().map(|(_, r)| r).collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    print_outcome(&output, &report.outcome);
    for (task, result) in &report.results {
        output.success(&format!(
            "{}: documentation written to {} in {:.1}s",
            task,
            result.output_dir.display(),
            result.duration.as_secs_f64()
        ));
    }
    Ok(())
}

fn print_outcome(output: &Output, outcome: &CollectOutcome) {
    let configuration = &outcome.configuration;
    output.section("Aggregate configuration");
    let included: Vec<&str> = outcome.included_modules.iter().map(|m| m.as_str()).collect();
    output.field("Modules", included.join(", "));
    output.field("Output", configuration.output_dir.display());
    match &configuration.cache_root {
        Some(root) => output.field("Cache root", root.display()),
        None => output.field("Cache root", "(none)"),
    }
    output.field("Source sets", configuration.source_set_count());
    output.field("Plugins", configuration.plugins_classpath.len());

    for name in &outcome.unmatched_modules {
        output.warning(&format!("'{}' is not a module of this project", name));
    }
    for module in &outcome.modules_without_configuration {
        output.warning(&format!(
            "'{}' has no configuration; run 'docfold configure' first",
            module
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::InMemoryDiscovery;
    use crate::config::Config;
    use tempfile::TempDir;

    #[test]
    fn test_request_precedence() {
        let root = TempDir::new().unwrap();
        let mut ctx = CommandContext {
            project_root: root.path().to_path_buf(),
            config: Config::default(),
        };
        let discovery = InMemoryDiscovery::new().with_module("a").with_module("b");

        let all = build_request(&ctx, &CollectOptions::default(), &discovery).unwrap();
        assert_eq!(all.modules, vec!["a", "b"]);
        assert_eq!(all.task_names, vec!["docfoldHtml"]);

        ctx.config.collector.modules = vec!["b".to_string()];
        let configured = build_request(&ctx, &CollectOptions::default(), &discovery).unwrap();
        assert_eq!(configured.modules, vec!["b"]);

        let options = CollectOptions {
            modules: vec!["a".to_string()],
            tasks: vec!["docfoldGfm".to_string()],
            output: Some(PathBuf::from("site")),
            ..CollectOptions::default()
        };
        let explicit = build_request(&ctx, &options, &discovery).unwrap();
        assert_eq!(explicit.modules, vec!["a"]);
        assert_eq!(explicit.task_names, vec!["docfoldGfm"]);
        assert_eq!(explicit.output_dir, root.path().join("site"));
    }
}
