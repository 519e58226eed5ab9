//! Pipeline runner contract.

use crate::error::Result;
use super::CapabilityFuture;

/// Executes a pipeline body to completion.
///
/// Execution is synchronous from the caller's point of view: the future
/// resolves only once every step has finished, with failure surfaced as an
/// error.
pub trait PipelineRunner: Send + Sync {
    /// Run the pipeline to completion.
    fn run<'a>(&'a self) -> CapabilityFuture<'a, ()>;
}

/// Factory creating runners from a pipeline body.
///
/// The body is opaque to the dispatcher; only the factory and the runners
/// it creates interpret it.
pub trait RunnerFactory: Send + Sync {
    /// Create a runner for `body`.
    fn create(&self, body: &serde_yaml::Value) -> Result<Box<dyn PipelineRunner>>;
}
