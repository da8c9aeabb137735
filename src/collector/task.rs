//! Collector and generator tasks
//!
//! The collector task resolves modules, aggregates their configurations,
//! publishes the result into its [`EnforcedConfiguration`], then runs every
//! generator task bound to that handle exactly once.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::aggregate::{CollectOutcome, CollectRequest, collect};
use super::discovery::ModuleDiscovery;
use super::enforced::EnforcedConfiguration;
use crate::generator::{GeneratorResult, SharedGenerator};
use crate::types::{DocfoldError, Result};

/// A generator invocation reading the enforced configuration
pub struct GeneratorTask {
    name: String,
    enforced: EnforcedConfiguration,
    generator: SharedGenerator,
}

impl GeneratorTask {
    /// Bind a generator to a configuration handle. The handle is usually
    /// still empty at this point.
    pub fn new(
        name: impl Into<String>,
        enforced: EnforcedConfiguration,
        generator: SharedGenerator,
    ) -> Self {
        Self {
            name: name.into(),
            enforced,
            generator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the generator with the published configuration
    pub async fn run(&self) -> Result<GeneratorResult> {
        let configuration = self.enforced.get()?;
        info!(
            task = %self.name,
            generator = self.generator.name(),
            "Invoking generator with {} source sets",
            configuration.source_sets.len()
        );
        self.generator.invoke(configuration).await
    }
}

/// Result of a full collector run
#[derive(Debug)]
pub struct CollectReport {
    pub outcome: CollectOutcome,
    /// One entry per generator task, in registration order
    pub results: Vec<(String, GeneratorResult)>,
}

/// Aggregates module configurations and drives the generator tasks
pub struct CollectorTask {
    request: CollectRequest,
    discovery: Arc<dyn ModuleDiscovery>,
    enforced: EnforcedConfiguration,
    tasks: Vec<GeneratorTask>,
}

impl CollectorTask {
    pub fn new(request: CollectRequest, discovery: Arc<dyn ModuleDiscovery>) -> Self {
        Self {
            request,
            discovery,
            enforced: EnforcedConfiguration::new(),
            tasks: Vec::new(),
        }
    }

    /// Handle that will receive the aggregate
    pub fn enforced(&self) -> EnforcedConfiguration {
        self.enforced.clone()
    }

    pub fn request(&self) -> &CollectRequest {
        &self.request
    }

    /// Register a generator task bound to this collector's handle
    pub fn with_generator(mut self, name: impl Into<String>, generator: SharedGenerator) -> Self {
        let task = GeneratorTask::new(name, self.enforced(), generator);
        self.tasks.push(task);
        self
    }

    /// Aggregate without publishing or invoking anything
    pub fn plan(&self) -> Result<CollectOutcome> {
        let outcome = collect(&self.request, self.discovery.as_ref())?;
        log_skipped(&outcome);
        Ok(outcome)
    }

    /// Aggregate, publish, then run every generator task once
    #[instrument(skip(self), fields(tasks = self.tasks.len()))]
    pub async fn execute(self) -> Result<CollectReport> {
        if self.tasks.is_empty() {
            return Err(DocfoldError::Config(
                "No generator task registered with the collector".to_string(),
            ));
        }

        let outcome = self.plan()?;
        self.enforced.publish(outcome.configuration.clone())?;

        let mut results = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            let result = task.run().await?;
            results.push((task.name().to_string(), result));
        }

        Ok(CollectReport { outcome, results })
    }
}

fn log_skipped(outcome: &CollectOutcome) {
    if !outcome.unmatched_modules.is_empty() {
        info!(
            "Ignoring modules that are not part of the project: {}",
            outcome.unmatched_modules.join(", ")
        );
    }
    if !outcome.modules_without_configuration.is_empty() {
        let names: Vec<&str> = outcome
            .modules_without_configuration
            .iter()
            .map(|m| m.as_str())
            .collect();
        warn!(
            "Modules without a documentation configuration: {}",
            names.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::discovery::InMemoryDiscovery;
    use crate::generator::Generator;
    use crate::types::{AggregateConfiguration, ModuleConfiguration, SourceSet};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;

    const TASK: &str = "docfoldHtml";

    /// Records every configuration it is invoked with
    #[derive(Default)]
    struct RecordingGenerator {
        calls: Mutex<Vec<AggregateConfiguration>>,
        fail: bool,
    }

    #[async_trait]
    impl Generator for RecordingGenerator {
        fn name(&self) -> &str {
            "recording"
        }

        async fn invoke(&self, configuration: &AggregateConfiguration) -> Result<GeneratorResult> {
            self.calls.lock().unwrap().push(configuration.clone());
            if self.fail {
                return Err(DocfoldError::GeneratorInvocation("boom".to_string()));
            }
            Ok(GeneratorResult {
                output_dir: configuration.output_dir.clone(),
                exit_code: Some(0),
                duration: Duration::ZERO,
                finished_at: Utc::now(),
            })
        }
    }

    fn discovery() -> Arc<dyn ModuleDiscovery> {
        Arc::new(
            InMemoryDiscovery::new()
                .with_configuration(
                    "core",
                    TASK,
                    ModuleConfiguration::new()
                        .with_cache_root("/cache")
                        .with_source_set(SourceSet::new("core", "main"))
                        .with_plugin("p1"),
                )
                .with_configuration(
                    "io",
                    TASK,
                    ModuleConfiguration::new()
                        .with_cache_root("/cache")
                        .with_source_set(SourceSet::new("io", "main"))
                        .with_plugin("p1")
                        .with_plugin("p2"),
                ),
        )
    }

    fn request(modules: &[&str]) -> CollectRequest {
        CollectRequest {
            modules: modules.iter().map(|s| s.to_string()).collect(),
            output_dir: PathBuf::from("/out"),
            task_names: vec![TASK.to_string()],
        }
    }

    #[tokio::test]
    async fn test_every_task_sees_the_same_configuration_once() {
        let first = Arc::new(RecordingGenerator::default());
        let second = Arc::new(RecordingGenerator::default());

        let collector = CollectorTask::new(request(&["core", "io"]), discovery())
            .with_generator("html", first.clone())
            .with_generator("html-mirror", second.clone());
        let enforced = collector.enforced();

        let report = collector.execute().await.unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].0, "html");

        let published = enforced.get().unwrap();
        let first_calls = first.calls.lock().unwrap();
        let second_calls = second.calls.lock().unwrap();
        assert_eq!(first_calls.len(), 1);
        assert_eq!(second_calls.len(), 1);
        assert_eq!(&first_calls[0], published);
        assert_eq!(&second_calls[0], published);
        assert_eq!(published.source_sets.len(), 2);
    }

    #[tokio::test]
    async fn test_task_before_publication_fails() {
        let generator = Arc::new(RecordingGenerator::default());
        let task = GeneratorTask::new("early", EnforcedConfiguration::new(), generator.clone());

        let err = task.run().await.unwrap_err();
        assert!(matches!(err, DocfoldError::MissingValue { .. }));
        assert!(generator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_conflict_aborts_before_publication() {
        let discovery: Arc<dyn ModuleDiscovery> = Arc::new(
            InMemoryDiscovery::new()
                .with_configuration("a", TASK, ModuleConfiguration::new().with_cache_root("/x"))
                .with_configuration("b", TASK, ModuleConfiguration::new().with_cache_root("/y")),
        );
        let generator = Arc::new(RecordingGenerator::default());
        let collector =
            CollectorTask::new(request(&["a", "b"]), discovery).with_generator("html", generator.clone());
        let enforced = collector.enforced();

        let err = collector.execute().await.unwrap_err();
        assert!(matches!(err, DocfoldError::ConfigurationConflict { .. }));
        assert!(!enforced.is_published());
        assert!(generator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        let generator = Arc::new(RecordingGenerator {
            fail: true,
            ..RecordingGenerator::default()
        });
        let err = CollectorTask::new(request(&["core"]), discovery())
            .with_generator("html", generator.clone())
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err, DocfoldError::GeneratorInvocation(_)));
        assert_eq!(generator.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_generator_task_is_error() {
        let err = CollectorTask::new(request(&["core"]), discovery())
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err, DocfoldError::Config(_)));
    }

    #[test]
    fn test_plan_does_not_publish() {
        let collector = CollectorTask::new(request(&["io", "core"]), discovery());
        let outcome = collector.plan().unwrap();
        assert_eq!(outcome.configuration.source_sets[0].source_set_id.scope_id, "core");
        assert!(!collector.enforced().is_published());
    }
}
