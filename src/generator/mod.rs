//! Generator Abstraction
//!
//! The documentation generator is an external collaborator. docfold hands it
//! one aggregate configuration and reports what happened.
//!
//! Invocation is single-shot: failures propagate to the caller unchanged and
//! are never retried.

mod process;

pub use process::ProcessGenerator;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::types::{AggregateConfiguration, Result};

/// Outcome of a successful generator run
#[derive(Debug, Clone, Serialize)]
pub struct GeneratorResult {
    /// Where the generator wrote its output
    pub output_dir: PathBuf,
    /// Process exit code, when the generator is a process
    pub exit_code: Option<i32>,
    /// Wall-clock duration of the run
    pub duration: Duration,
    pub finished_at: DateTime<Utc>,
}

#[async_trait]
pub trait Generator: Send + Sync {
    /// Generator name for logging
    fn name(&self) -> &str;

    /// Run the generator once with the merged configuration
    async fn invoke(&self, configuration: &AggregateConfiguration) -> Result<GeneratorResult>;
}

pub type SharedGenerator = Arc<dyn Generator>;
