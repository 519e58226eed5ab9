//! Default step runner.
//!
//! Interprets a `pipeline` body as an ordered list of steps and executes
//! them one at a time, stopping at the first failure:
//!
//! ```yaml
//! pipeline:
//!   - id: announce
//!     operator: log
//!     params:
//!       message: "ingest starting"
//!   - id: ingest
//!     operator: shell
//!     params:
//!       command: ./ingest.sh
//!       args: ["--incremental"]
//! ```
//!
//! This is one collaborator implementation behind the [`RunnerFactory`]
//! seam, not a step-semantics contract; the dispatcher never looks inside
//! the body and any other factory can be injected in its place.

use flint_core::error::{FlintError, Result};
use flint_core::traits::{CapabilityFuture, PipelineRunner, RunnerFactory};
use serde::Deserialize;
use std::sync::Arc;

/// One step of a pipeline body.
#[derive(Debug, Deserialize)]
struct StepDefinition {
    /// Optional step identifier, used in logs and errors.
    #[serde(default)]
    id: Option<String>,
    /// Operator name (`log` or `shell`).
    operator: String,
    /// Operator parameters.
    #[serde(default)]
    params: serde_yaml::Value,
}

impl StepDefinition {
    fn label(&self, index: usize) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}#{}", self.operator, index))
    }

    fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }

    async fn execute(&self) -> std::result::Result<(), String> {
        match self.operator.as_str() {
            "log" => {
                let message = self.param_str("message").unwrap_or_default();
                match self.param_str("level").unwrap_or("info") {
                    "trace" => tracing::trace!("{}", message),
                    "debug" => tracing::debug!("{}", message),
                    "info" => tracing::info!("{}", message),
                    "warn" => tracing::warn!("{}", message),
                    "error" => tracing::error!("{}", message),
                    other => return Err(format!("unknown log level '{}'", other)),
                }
                Ok(())
            }
            "shell" => self.execute_shell().await,
            other => Err(format!("unknown operator '{}'", other)),
        }
    }

    async fn execute_shell(&self) -> std::result::Result<(), String> {
        let command = self
            .param_str("command")
            .ok_or("shell step requires a 'command' parameter")?;

        let args: Vec<String> = self
            .params
            .get("args")
            .and_then(|v| v.as_sequence())
            .map(|seq| {
                seq.iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut cmd = tokio::process::Command::new(command);
        cmd.args(&args);
        if let Some(cwd) = self.param_str("cwd") {
            cmd.current_dir(cwd);
        }

        let output = cmd
            .output()
            .await
            .map_err(|e| format!("failed to spawn '{}': {}", command, e))?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.trim().is_empty() {
                tracing::debug!(command = command, stdout = %stdout.trim(), "shell step output");
            }
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(format!(
                "'{}' exited with {}: {}",
                command,
                output.status,
                stderr.trim()
            ))
        }
    }
}

/// The default pipeline runner.
pub struct StepRunner {
    steps: Vec<StepDefinition>,
}

impl StepRunner {
    /// Parse a pipeline body into a runner.
    pub fn from_body(body: &serde_yaml::Value) -> Result<Self> {
        let steps: Vec<StepDefinition> =
            serde_yaml::from_value(body.clone()).map_err(|e| FlintError::ConfigValue {
                field: "pipeline".to_string(),
                cause: format!("body is not a list of steps: {}", e),
            })?;

        Ok(Self { steps })
    }

    /// Number of steps in this pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

impl PipelineRunner for StepRunner {
    fn run<'a>(&'a self) -> CapabilityFuture<'a, ()> {
        Box::pin(async move {
            for (index, step) in self.steps.iter().enumerate() {
                let label = step.label(index);
                tracing::info!(step = %label, operator = %step.operator, "running step");

                step.execute()
                    .await
                    .map_err(|cause| FlintError::ExecutionFailed { step: label, cause })?;
            }
            Ok(())
        })
    }
}

/// Factory for [`StepRunner`]s.
pub struct StepRunnerFactory;

impl StepRunnerFactory {
    /// A shareable factory instance.
    pub fn shared() -> Arc<dyn RunnerFactory> {
        Arc::new(Self)
    }
}

impl RunnerFactory for StepRunnerFactory {
    fn create(&self, body: &serde_yaml::Value) -> Result<Box<dyn PipelineRunner>> {
        Ok(Box::new(StepRunner::from_body(body)?))
    }
}
