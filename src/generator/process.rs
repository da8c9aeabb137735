//! Process Generator
//!
//! Runs the generator as a child process. The aggregate configuration is
//! written as JSON inside the output directory and its path is passed as the
//! last argument.

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::{Generator, GeneratorResult};
use crate::config::GeneratorConfig;
use crate::constants::layout::{CONFIGURATION_FILE, GENERATOR_INPUT_DIR};
use crate::types::{AggregateConfiguration, DocfoldError, Result};

/// Generator backed by an external command
pub struct ProcessGenerator {
    command: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    timeout: Duration,
}

impl ProcessGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            env: Vec::new(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the generator input written for an output directory
    pub fn input_path(output_dir: &Path) -> PathBuf {
        output_dir.join(GENERATOR_INPUT_DIR).join(CONFIGURATION_FILE)
    }

    /// Write the generator input. Returns its path and the directories
    /// created for it, outermost first.
    fn write_input(configuration: &AggregateConfiguration) -> Result<(PathBuf, Vec<PathBuf>)> {
        let path = Self::input_path(&configuration.output_dir);
        let mut created: Vec<PathBuf> = path
            .ancestors()
            .skip(1)
            .take_while(|dir| !dir.exists())
            .map(Path::to_path_buf)
            .collect();
        created.reverse();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, serde_json::to_string_pretty(configuration)?)?;
        Ok((path, created))
    }

    /// Remove the input and any directory created for it that is still empty
    fn discard_input(input: &Path, created: &[PathBuf]) {
        if let Err(e) = std::fs::remove_file(input) {
            warn!("Failed to remove {}: {}", input.display(), e);
        }
        for dir in created.iter().rev() {
            // Fails when the generator left output behind, which is kept
            if std::fs::remove_dir(dir).is_err() {
                debug!("Keeping non-empty {}", dir.display());
                break;
            }
        }
    }

    async fn run(&self, input: &Path) -> Result<Option<i32>> {
        debug!(
            "Executing generator {} {:?} {}",
            self.command,
            self.args,
            input.display()
        );

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg(input)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| {
            DocfoldError::GeneratorInvocation(format!(
                "Failed to spawn '{}': {}. Is it installed?",
                self.command, e
            ))
        })?;

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| DocfoldError::GeneratorTimeout {
                duration: self.timeout,
            })?
            .map_err(|e| DocfoldError::GeneratorInvocation(format!("Execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("'{}' exited with {}", self.command, output.status)
            } else {
                format!(
                    "'{}' exited with {}: {}",
                    self.command,
                    output.status,
                    stderr.trim()
                )
            };
            return Err(DocfoldError::GeneratorInvocation(message));
        }

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!(target: "docfold::generator", "{}", line);
        }

        Ok(output.status.code())
    }
}

#[async_trait]
impl Generator for ProcessGenerator {
    fn name(&self) -> &str {
        &self.command
    }

    async fn invoke(&self, configuration: &AggregateConfiguration) -> Result<GeneratorResult> {
        let start = Instant::now();
        let (input, created) = Self::write_input(configuration)?;

        match self.run(&input).await {
            Ok(exit_code) => {
                let duration = start.elapsed();
                info!(
                    "Generator '{}' finished in {:.1}s",
                    self.command,
                    duration.as_secs_f64()
                );
                Ok(GeneratorResult {
                    output_dir: configuration.output_dir.clone(),
                    exit_code,
                    duration,
                    finished_at: Utc::now(),
                })
            }
            Err(e) => {
                Self::discard_input(&input, &created);
                Err(e)
            }
        }
    }
}
