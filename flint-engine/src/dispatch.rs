//! Activation dispatcher.
//!
//! The dispatcher is invoked once per discovered pipeline definition. It
//! classifies each definition into exactly one activation mode and performs
//! the corresponding action:
//!
//! - `event` block → a detached listener on the [`ListenerHost`]
//! - `scheduler` block → a job on the shared [`JobScheduler`]
//! - neither → the `pipeline` body runs immediately, blocking registration
//!
//! After all definitions are registered, [`Dispatcher::start`] enters the
//! scheduler's run loop (a log-only no-op when no jobs were registered).

use crate::listener::ListenerHost;
use crate::schedule::JobScheduler;
use flint_core::definition::{Activation, PipelineDefinition, TriggerBlock};
use flint_core::error::{FlintError, Result};
use flint_core::registry::{SchedulerRegistry, TriggerRegistry};
use flint_core::traits::{ActivationCallback, CapabilityConfig, RunnerFactory};
use std::path::Path;
use std::sync::Arc;

/// The activation dispatcher.
///
/// Owns its registries, runner factory, listener host and shared scheduler
/// outright; all collaborators are injected at construction so tests can
/// substitute fakes. The registration phase is sequential (`&mut self`),
/// which is what makes lock-free accumulation into the scheduler sound.
pub struct Dispatcher {
    /// Event trigger factories, read-only after construction.
    triggers: TriggerRegistry,
    /// Scheduler factories, read-only after construction.
    schedulers: SchedulerRegistry,
    /// Creates runners for pipeline bodies.
    runner: Arc<dyn RunnerFactory>,
    /// Host for detached event listeners.
    listeners: ListenerHost,
    /// Shared temporal scheduler, fed during registration.
    scheduler: JobScheduler,
}

impl Dispatcher {
    /// Create a dispatcher over the given registries and runner factory.
    ///
    /// The registries must be fully populated before the first
    /// [`register_pipeline`](Self::register_pipeline) call.
    pub fn new(
        triggers: TriggerRegistry,
        schedulers: SchedulerRegistry,
        runner: Arc<dyn RunnerFactory>,
    ) -> Self {
        Self {
            triggers,
            schedulers,
            runner,
            listeners: ListenerHost::new(),
            scheduler: JobScheduler::new(),
        }
    }

    /// Register one pipeline definition.
    ///
    /// Loads and classifies the definition at `path`, then either starts a
    /// listener, records a scheduled job, or runs the pipeline body to
    /// completion before returning. Configuration and lookup errors surface
    /// here for all three modes; an immediate-mode execution failure also
    /// propagates to the caller.
    pub async fn register_pipeline(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let definition = PipelineDefinition::load(path)?;

        if definition.has_conflicting_blocks() {
            tracing::warn!(
                pipeline = %path.display(),
                "definition has both 'event' and 'scheduler' blocks; \
                 'event' wins and 'scheduler' is ignored"
            );
        }

        match definition.activation() {
            Some(Activation::Event(block)) => self.start_listener(block, path),
            Some(Activation::Scheduled(block)) => self.register_job(block, path),
            Some(Activation::Immediate(body)) => {
                tracing::info!(pipeline = %path.display(), "starting pipeline");
                let runner = self.runner.create(body)?;
                runner.run().await
            }
            None => Err(FlintError::InvalidDefinition {
                path: path.to_path_buf(),
                cause: "definition has none of 'event', 'scheduler' or 'pipeline'".to_string(),
            }),
        }
    }

    /// Start the shared scheduler's run loop.
    ///
    /// Must be called exactly once, after all registrations. Blocks the
    /// calling task for the process lifetime when jobs exist; returns
    /// immediately otherwise. Event listeners keep running either way.
    pub async fn start(self) -> Result<()> {
        self.scheduler.run().await
    }

    /// Number of event listeners started so far.
    pub fn listener_count(&self) -> usize {
        self.listeners.spawned()
    }

    /// Number of scheduled jobs registered so far.
    pub fn job_count(&self) -> usize {
        self.scheduler.job_count()
    }

    fn start_listener(&self, block: &TriggerBlock, path: &Path) -> Result<()> {
        let factory =
            self.triggers
                .lookup(&block.type_name)
                .ok_or_else(|| FlintError::UnknownTrigger {
                    type_name: block.type_name.clone(),
                })?;

        let config = CapabilityConfig::new(block.config.clone(), path);
        let trigger = factory.create(&config)?;

        tracing::info!(
            pipeline = %path.display(),
            trigger = %block.type_name,
            "event listener registered"
        );

        self.listeners.spawn(
            trigger,
            activation_callback(Arc::clone(&self.runner), path),
            path,
        );
        Ok(())
    }

    fn register_job(&mut self, block: &TriggerBlock, path: &Path) -> Result<()> {
        let factory =
            self.schedulers
                .lookup(&block.type_name)
                .ok_or_else(|| FlintError::UnknownScheduler {
                    type_name: block.type_name.clone(),
                })?;

        let config = CapabilityConfig::new(block.config.clone(), path);
        let capability = factory.create(&config)?;

        let callback = activation_callback(Arc::clone(&self.runner), path);
        capability.register(&mut self.scheduler.board(callback))?;

        tracing::info!(
            pipeline = %path.display(),
            scheduler = %block.type_name,
            "scheduled job registered"
        );
        Ok(())
    }
}

/// Build the callback a listener or scheduled job invokes once per
/// activation.
///
/// The callback re-loads the definition at `path` and runs its current
/// `pipeline` body to completion, so edits to the file take effect on the
/// next firing. Failures are reported here, with the pipeline path
/// attached, before being handed back to the invoking plugin.
pub fn activation_callback(runner: Arc<dyn RunnerFactory>, path: &Path) -> ActivationCallback {
    let path = path.to_path_buf();
    Arc::new(move || {
        let runner = Arc::clone(&runner);
        let path = path.clone();
        Box::pin(async move {
            let result = run_once(runner, &path).await;
            if let Err(e) = &result {
                tracing::error!(
                    pipeline = %path.display(),
                    error = %e,
                    "pipeline run failed"
                );
            }
            result
        })
    })
}

async fn run_once(factory: Arc<dyn RunnerFactory>, path: &Path) -> Result<()> {
    let definition = PipelineDefinition::load(path)?;
    let body = definition.body(path)?;
    let runner = factory.create(body)?;
    runner.run().await
}
