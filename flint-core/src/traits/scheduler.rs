//! Scheduler contract and firing rules.

use crate::error::{FlintError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// When a scheduled job fires.
#[derive(Debug, Clone)]
pub enum FireRule {
    /// Fire at a fixed interval. The first firing is one period after the
    /// scheduler's run loop starts.
    Interval {
        /// Period between firings.
        every: Duration,
    },
    /// Fire according to a cron expression.
    Cron {
        /// The parsed schedule.
        schedule: cron::Schedule,
        /// Original expression (for display).
        expression: String,
    },
}

impl FireRule {
    /// Build an interval rule, rejecting zero-length periods.
    pub fn interval(every: Duration) -> Result<Self> {
        if every.is_zero() {
            return Err(FlintError::ConfigValue {
                field: "interval".to_string(),
                cause: "interval period must be greater than zero".to_string(),
            });
        }
        Ok(Self::Interval { every })
    }

    /// Parse a cron rule from a 6-field expression (`sec min hour day month
    /// weekday`).
    pub fn cron(expression: &str) -> Result<Self> {
        let schedule = cron::Schedule::from_str(expression).map_err(|e| FlintError::ConfigValue {
            field: "expression".to_string(),
            cause: format!("invalid cron expression '{}': {}", expression, e),
        })?;

        Ok(Self::Cron {
            schedule,
            expression: expression.to_string(),
        })
    }

    /// The next firing strictly after `after`, or `None` if the rule has no
    /// further firings.
    pub fn next_fire(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Interval { every } => chrono::Duration::from_std(*every)
                .ok()
                .map(|period| after + period),
            Self::Cron { schedule, .. } => schedule.after(&after).next(),
        }
    }
}

impl fmt::Display for FireRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval { every } => write!(f, "every {:?}", every),
            Self::Cron { expression, .. } => write!(f, "cron '{}'", expression),
        }
    }
}

/// Registration surface the shared temporal scheduler exposes to scheduler
/// capabilities.
///
/// Jobs added through a board are associated by the host with the owning
/// pipeline's activation callback; capabilities only supply the firing rule.
pub trait JobBoard {
    /// Add a job firing according to `rule`.
    fn add_job(&mut self, name: &str, rule: FireRule);
}

/// A scheduler capability: translates its configuration into one or more
/// jobs on the shared temporal scheduler.
///
/// Instances are constructed once per `scheduler` block and discarded after
/// [`register`](Self::register); the shared scheduler owns the jobs from
/// then on.
pub trait Scheduler: Send + Sync {
    /// Register this capability's jobs on `board`.
    fn register(&self, board: &mut dyn JobBoard) -> Result<()>;
}

/// Factory creating scheduler instances from configuration.
pub trait SchedulerFactory: Send + Sync {
    /// Create a new scheduler instance.
    fn create(&self, config: &super::CapabilityConfig) -> Result<Box<dyn Scheduler>>;
}
