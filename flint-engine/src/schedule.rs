//! Shared temporal scheduler.
//!
//! A single [`JobScheduler`] accumulates jobs across all registration calls
//! and is entered into its run loop exactly once, after registration is
//! complete. Registration happens through `&mut self`, so the sequential
//! registration phase needs no locking; the run loop then owns the jobs
//! outright.

use chrono::{DateTime, Utc};
use flint_core::error::Result;
use flint_core::traits::{ActivationCallback, FireRule, JobBoard};
use std::sync::Arc;
use std::time::Duration;

/// A job held by the scheduler.
struct Job {
    /// Display name, derived from the owning pipeline.
    name: String,
    /// When the job fires.
    rule: FireRule,
    /// Invoked once per firing.
    callback: ActivationCallback,
    /// Next firing, computed when the run loop starts.
    next: Option<DateTime<Utc>>,
}

/// The shared temporal scheduler.
pub struct JobScheduler {
    jobs: Vec<Job>,
}

/// Registration shim handed to scheduler capabilities: every job added
/// through it is associated with the owning pipeline's activation callback.
pub struct Board<'a> {
    jobs: &'a mut Vec<Job>,
    callback: ActivationCallback,
}

impl JobBoard for Board<'_> {
    fn add_job(&mut self, name: &str, rule: FireRule) {
        tracing::debug!(job = name, rule = %rule, "job added to scheduler");
        self.jobs.push(Job {
            name: name.to_string(),
            rule,
            callback: Arc::clone(&self.callback),
            next: None,
        });
    }
}

impl JobScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// A registration board that associates added jobs with `callback`.
    pub fn board(&mut self, callback: ActivationCallback) -> Board<'_> {
        Board {
            jobs: &mut self.jobs,
            callback,
        }
    }

    /// Number of registered jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the scheduler holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Enter the run loop.
    ///
    /// With zero jobs this returns immediately. Otherwise it owns the
    /// calling task for as long as any job has a future firing — for
    /// interval jobs, the remainder of the process lifetime. Each due job's
    /// callback is spawned onto the runtime, so callbacks may overlap with
    /// each other and with later firings; a callback failure is reported by
    /// the callback itself and never stops the loop.
    pub async fn run(mut self) -> Result<()> {
        if self.jobs.is_empty() {
            tracing::info!("no scheduled jobs to run");
            return Ok(());
        }

        tracing::info!(jobs = self.jobs.len(), "starting scheduler");

        let now = Utc::now();
        for job in &mut self.jobs {
            job.next = job.rule.next_fire(now);
            match job.next {
                Some(at) => tracing::debug!(job = %job.name, next = %at, "first firing computed"),
                None => tracing::warn!(job = %job.name, "rule yields no firings, job dropped"),
            }
        }
        self.jobs.retain(|job| job.next.is_some());

        while !self.jobs.is_empty() {
            // Earliest pending firing across all jobs.
            let due = self
                .jobs
                .iter()
                .filter_map(|job| job.next)
                .min()
                .expect("non-empty scheduler has a next firing");

            let now = Utc::now();
            if due > now {
                let wait = (due - now).to_std().unwrap_or(Duration::ZERO);
                tokio::time::sleep(wait).await;
            }

            let now = Utc::now();
            for job in &mut self.jobs {
                let Some(at) = job.next else { continue };
                if at > now {
                    continue;
                }

                tracing::info!(job = %job.name, scheduled = %at, "job fired");

                let callback = Arc::clone(&job.callback);
                let name = job.name.clone();
                tokio::spawn(async move {
                    if callback().await.is_err() {
                        // Already reported by the activation callback.
                        tracing::debug!(job = %name, "scheduled run failed, scheduler continues");
                    }
                });

                job.next = job.rule.next_fire(now);
            }
            self.jobs.retain(|job| job.next.is_some());
        }

        tracing::info!("all scheduled jobs exhausted");
        Ok(())
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}
