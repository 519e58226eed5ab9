//! `flint run` - register definitions, then activate.

use anyhow::{Context, Result};
use flint_engine::dispatch::Dispatcher;
use flint_engine::runner::StepRunnerFactory;
use std::path::PathBuf;

/// Register each definition in order, then enter the scheduler's run loop.
///
/// Registration fails fast: a bad definition (or a failed immediate-mode
/// run) aborts before later files are touched. With scheduled jobs present
/// this blocks until the process is terminated; with only immediate and
/// event-triggered pipelines it returns once event listeners are up, which
/// for a foreground tool means the listeners die with the process shortly
/// after. That mirrors the daemon-style contract: keeping the process alive
/// is the caller's job.
pub async fn run(files: &[PathBuf]) -> Result<()> {
    let (triggers, schedulers) = flint_plugins::standard_registries();
    let mut dispatcher = Dispatcher::new(triggers, schedulers, StepRunnerFactory::shared());

    for file in files {
        dispatcher
            .register_pipeline(file)
            .await
            .with_context(|| format!("failed to register '{}'", file.display()))?;
    }

    dispatcher.start().await?;
    Ok(())
}
