//! Scheduler implementations.
//!
//! Schedulers translate a definition's `scheduler` block into firing rules
//! on the shared temporal scheduler. They hold no runtime state of their
//! own: once registered, the shared scheduler owns the jobs.

mod cron;
mod interval;

pub use cron::{CronScheduler, CronSchedulerFactory};
pub use interval::{IntervalScheduler, IntervalSchedulerFactory};
