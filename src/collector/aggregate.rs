//! Configuration Aggregator
//!
//! Folds per-module configurations into one [`AggregateConfiguration`].
//!
//! ## Merge Rules
//!
//! - Cache roots must agree across modules. An unset root matches anything
//!   and the first concrete root becomes the aggregate's.
//! - Source sets are concatenated in module order, never deduplicated.
//! - Plugin classpaths are unioned, keeping first-seen order.

use indexmap::IndexSet;
use std::path::PathBuf;

use tracing::{debug, info, instrument};

use super::discovery::ModuleDiscovery;
use crate::types::{AggregateConfiguration, DocfoldError, ModuleConfiguration, ModuleId, Result};

/// What to aggregate
#[derive(Debug, Clone)]
pub struct CollectRequest {
    /// Module names to include. Selects modules; order comes from discovery.
    pub modules: Vec<String>,
    /// Destination of the combined output
    pub output_dir: PathBuf,
    /// Per-module tasks to collect from
    pub task_names: Vec<String>,
}

/// Aggregate plus diagnostics about modules that did not take part
#[derive(Debug, Clone)]
pub struct CollectOutcome {
    pub configuration: AggregateConfiguration,
    /// Modules that contributed, in subproject order
    pub included_modules: Vec<ModuleId>,
    /// Requested names that match no subproject
    pub unmatched_modules: Vec<String>,
    /// Matched modules whose tasks produced no configuration
    pub modules_without_configuration: Vec<ModuleId>,
}

/// Merge module configurations, in the given order, into one.
///
/// Fails with `EmptyAggregationSet` when there is nothing to merge and with
/// `ConfigurationConflict` when two modules name different cache roots.
pub fn aggregate(
    output_dir: PathBuf,
    configurations: &[(ModuleId, ModuleConfiguration)],
) -> Result<AggregateConfiguration> {
    let Some((_, first)) = configurations.first() else {
        return Err(DocfoldError::EmptyAggregationSet {
            requested: Vec::new(),
        });
    };

    let mut cache_root = first.cache_root.clone();
    let mut source_sets = Vec::new();
    let mut plugins_classpath: IndexSet<PathBuf> = IndexSet::new();

    for (module, configuration) in configurations {
        match (&cache_root, &configuration.cache_root) {
            (Some(expected), Some(found)) if expected != found => {
                return Err(DocfoldError::ConfigurationConflict {
                    module: module.to_string(),
                    expected: Some(expected.clone()),
                    found: Some(found.clone()),
                });
            }
            (None, Some(found)) => {
                debug!(
                    "Adopting cache root {} from module {}",
                    found.display(),
                    module
                );
                cache_root = Some(found.clone());
            }
            _ => {}
        }

        source_sets.extend(configuration.source_sets.iter().cloned());
        plugins_classpath.extend(configuration.plugins_classpath.iter().cloned());
    }

    Ok(AggregateConfiguration {
        output_dir,
        cache_root,
        source_sets,
        plugins_classpath: plugins_classpath.into_iter().collect(),
    })
}

/// Resolve requested modules, gather their configurations and aggregate them
#[instrument(skip(discovery), fields(modules = request.modules.len()))]
pub fn collect(request: &CollectRequest, discovery: &dyn ModuleDiscovery) -> Result<CollectOutcome> {
    let requested: IndexSet<&str> = request.modules.iter().map(String::as_str).collect();
    let available = discovery.list_subprojects()?;

    // Subproject order drives the fold; the request only selects
    let unmatched_modules: Vec<String> = requested
        .iter()
        .filter(|name| !available.iter().any(|m| m.as_str() == **name))
        .map(|name| {
            debug!("Skipping '{}': no such module", name);
            name.to_string()
        })
        .collect();
    let resolved: Vec<ModuleId> = available
        .into_iter()
        .filter(|m| requested.contains(m.as_str()))
        .collect();

    let mut configurations = Vec::new();
    let mut modules_without_configuration = Vec::new();
    for module in resolved {
        match discovery.find_configuration(&module, &request.task_names)? {
            Some(configuration) => configurations.push((module, configuration)),
            None => {
                debug!("Module {} produced no configuration", module);
                modules_without_configuration.push(module);
            }
        }
    }

    if configurations.is_empty() {
        return Err(DocfoldError::EmptyAggregationSet {
            requested: request.modules.clone(),
        });
    }

    let configuration = aggregate(request.output_dir.clone(), &configurations)?;
    let included_modules = configurations.into_iter().map(|(id, _)| id).collect();

    info!(
        source_sets = configuration.source_sets.len(),
        plugins = configuration.plugins_classpath.len(),
        "Aggregated module configurations"
    );

    Ok(CollectOutcome {
        configuration,
        included_modules,
        unmatched_modules,
        modules_without_configuration,
    })
}

// =============================================================================
// Tests
// =============================================================================
