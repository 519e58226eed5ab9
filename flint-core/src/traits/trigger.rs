//! Event trigger contract and related types.

use crate::error::Result;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

/// A boxed future returned by capability operations.
pub type CapabilityFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Callback invoked once per activation of a trigger or scheduled job.
///
/// Hosts build it to load the owning definition from disk and run its
/// `pipeline` body to completion; plugins only invoke it. A trigger that
/// awaits the returned future serializes runs for its own pipeline; firings
/// of distinct listeners or jobs are never serialized against each other.
pub type ActivationCallback = Arc<dyn Fn() -> CapabilityFuture<'static, ()> + Send + Sync>;

/// Construction input for every capability instance: the definition block's
/// `config` mapping plus the path of the owning pipeline definition.
#[derive(Debug, Clone)]
pub struct CapabilityConfig {
    /// Type-specific parameters, opaque to the dispatcher.
    pub params: serde_yaml::Value,
    /// Path of the pipeline definition this capability activates.
    pub pipeline_path: PathBuf,
}

impl CapabilityConfig {
    /// Create a new capability config.
    pub fn new(params: serde_yaml::Value, pipeline_path: impl Into<PathBuf>) -> Self {
        Self {
            params,
            pipeline_path: pipeline_path.into(),
        }
    }

    /// Get a string parameter.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }

    /// Get an integer parameter.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.params.get(key).and_then(|v| v.as_i64())
    }

    /// Get a boolean parameter.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.params.get(key).and_then(|v| v.as_bool())
    }

    /// A short display name for the owning pipeline, derived from its path.
    pub fn pipeline_name(&self) -> String {
        self.pipeline_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.pipeline_path.display().to_string())
    }
}

/// An event trigger: watches for an external signal and activates its
/// pipeline on each detection.
///
/// Instances are started on their own detached task by the listener host
/// and run for the remainder of the process lifetime. The detection
/// mechanism is opaque to the host; the only enforced behavior is that the
/// trigger invokes `on_event` once per detected event.
pub trait EventTrigger: Send + Sync {
    /// Begin listening.
    ///
    /// The returned future runs for the lifetime of the listener and
    /// resolves only if the underlying source fails or is exhausted.
    fn start<'a>(&'a self, on_event: ActivationCallback) -> CapabilityFuture<'a, ()>;
}

/// Factory creating event trigger instances from configuration.
pub trait EventTriggerFactory: Send + Sync {
    /// Create a new trigger instance.
    fn create(&self, config: &CapabilityConfig) -> Result<Box<dyn EventTrigger>>;
}
