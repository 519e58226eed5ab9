//! Built-in capabilities for FLINT.
//!
//! This crate provides the standard library of trigger and scheduler
//! implementations:
//!
//! - [`FileWatchTrigger`] - filesystem event watcher (`file_watch`)
//! - [`ManualTrigger`] - programmatic firing for tests and demos (`manual`)
//! - [`IntervalScheduler`] - fixed-period jobs (`interval`)
//! - [`CronScheduler`] - cron-expression jobs (`cron`)
//!
//! [`install_standard`] registers all of them; it is the default
//! implementation of the extension-loading collaborator that populates the
//! capability registries before dispatch begins.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod schedulers;
pub mod triggers;

pub use schedulers::{
    CronScheduler, CronSchedulerFactory, IntervalScheduler, IntervalSchedulerFactory,
};
pub use triggers::{
    FileWatchTrigger, FileWatchTriggerFactory, FireHandle, ManualTrigger, ManualTriggerFactory,
};

use flint_core::registry::{SchedulerRegistry, TriggerRegistry};
use std::sync::Arc;

/// Install the standard capabilities into the given registries.
pub fn install_standard(triggers: &mut TriggerRegistry, schedulers: &mut SchedulerRegistry) {
    triggers.register("file_watch", Arc::new(FileWatchTriggerFactory));
    triggers.register("manual", Arc::new(ManualTriggerFactory));
    schedulers.register("interval", Arc::new(IntervalSchedulerFactory));
    schedulers.register("cron", Arc::new(CronSchedulerFactory));
}

/// Build a pair of registries holding the standard capabilities.
pub fn standard_registries() -> (TriggerRegistry, SchedulerRegistry) {
    let mut triggers = TriggerRegistry::new();
    let mut schedulers = SchedulerRegistry::new();
    install_standard(&mut triggers, &mut schedulers);
    (triggers, schedulers)
}
