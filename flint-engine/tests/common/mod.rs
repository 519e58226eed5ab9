//! Shared fakes for the integration suite.

#![allow(dead_code)]

use flint_core::error::{FlintError, Result};
use flint_core::traits::{
    ActivationCallback, CapabilityConfig, CapabilityFuture, EventTrigger, EventTriggerFactory,
    FireRule, JobBoard, PipelineRunner, RunnerFactory, Scheduler, SchedulerFactory,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Runner that counts executions instead of doing work.
pub struct CountingRunner {
    runs: Arc<AtomicUsize>,
    fail: bool,
}

impl PipelineRunner for CountingRunner {
    fn run<'a>(&'a self) -> CapabilityFuture<'a, ()> {
        Box::pin(async move {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(FlintError::ExecutionFailed {
                    step: "counting".to_string(),
                    cause: "configured to fail".to_string(),
                })
            } else {
                Ok(())
            }
        })
    }
}

/// Runner factory handing out [`CountingRunner`]s over a shared counter.
pub struct CountingRunnerFactory {
    /// Total runs across all runners created by this factory.
    pub runs: Arc<AtomicUsize>,
    /// Whether created runners fail their runs.
    pub fail: bool,
}

impl CountingRunnerFactory {
    pub fn new() -> Self {
        Self {
            runs: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            runs: Arc::new(AtomicUsize::new(0)),
            fail: true,
        }
    }

    pub fn run_count(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl RunnerFactory for CountingRunnerFactory {
    fn create(&self, _body: &serde_yaml::Value) -> Result<Box<dyn PipelineRunner>> {
        Ok(Box::new(CountingRunner {
            runs: Arc::clone(&self.runs),
            fail: self.fail,
        }))
    }
}

/// Trigger whose start future never resolves.
pub struct PendingTrigger;

impl EventTrigger for PendingTrigger {
    fn start<'a>(&'a self, _on_event: ActivationCallback) -> CapabilityFuture<'a, ()> {
        Box::pin(std::future::pending())
    }
}

/// Factory for [`PendingTrigger`]s, recording every construction.
pub struct PendingTriggerFactory {
    /// Number of triggers created.
    pub constructed: Arc<AtomicUsize>,
    /// The configuration of the most recent construction.
    pub last_config: Arc<Mutex<Option<CapabilityConfig>>>,
}

impl PendingTriggerFactory {
    pub fn new() -> Self {
        Self {
            constructed: Arc::new(AtomicUsize::new(0)),
            last_config: Arc::new(Mutex::new(None)),
        }
    }
}

impl EventTriggerFactory for PendingTriggerFactory {
    fn create(&self, config: &CapabilityConfig) -> Result<Box<dyn EventTrigger>> {
        self.constructed.fetch_add(1, Ordering::SeqCst);
        *self.last_config.lock().unwrap() = Some(config.clone());
        Ok(Box::new(PendingTrigger))
    }
}

/// Scheduler capability registering one interval job with a fixed period.
pub struct FastIntervalScheduler {
    every: Duration,
}

impl Scheduler for FastIntervalScheduler {
    fn register(&self, board: &mut dyn JobBoard) -> Result<()> {
        board.add_job("fast_interval", FireRule::Interval { every: self.every });
        Ok(())
    }
}

/// Factory for [`FastIntervalScheduler`]s.
pub struct FastIntervalFactory {
    /// Period used by every created scheduler.
    pub every: Duration,
}

impl SchedulerFactory for FastIntervalFactory {
    fn create(&self, _config: &CapabilityConfig) -> Result<Box<dyn Scheduler>> {
        Ok(Box::new(FastIntervalScheduler { every: self.every }))
    }
}

/// Write a definition file into `dir` and return its path.
pub fn write_definition(dir: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, yaml).unwrap();
    path
}
