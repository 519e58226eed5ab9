//! Fixed-interval scheduler.

use flint_core::error::{FlintError, Result};
use flint_core::traits::{CapabilityConfig, FireRule, JobBoard, Scheduler, SchedulerFactory};
use std::time::Duration;

/// Fixed-interval scheduler.
///
/// # Configuration
///
/// ```yaml
/// scheduler:
///   type: interval
///   config:
///     seconds: 30
/// ```
///
/// # Parameters
///
/// - `seconds`, `minutes`, `hours` - period components, summed; at least
///   one must be present and the total must be positive
///
/// The first firing is one full period after the scheduler's run loop
/// starts.
pub struct IntervalScheduler {
    /// Job name (derived from the owning pipeline's file name).
    name: String,
    /// Period between firings.
    every: Duration,
}

impl IntervalScheduler {
    /// Create a new interval scheduler.
    pub fn new(name: impl Into<String>, every: Duration) -> Result<Self> {
        if every.is_zero() {
            return Err(FlintError::ConfigValue {
                field: "interval".to_string(),
                cause: "interval period must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            name: name.into(),
            every,
        })
    }

    /// Create from configuration.
    pub fn from_config(config: &CapabilityConfig) -> Result<Self> {
        let mut total: i64 = 0;
        for (field, factor) in [("seconds", 1), ("minutes", 60), ("hours", 3600)] {
            if let Some(value) = config.get_i64(field) {
                if value < 0 {
                    return Err(FlintError::ConfigValue {
                        field: field.to_string(),
                        cause: format!("must not be negative, got {}", value),
                    });
                }
                total += value * factor;
            }
        }

        if total == 0 {
            return Err(FlintError::ConfigValue {
                field: "interval".to_string(),
                cause: "at least one of 'seconds', 'minutes' or 'hours' must be positive"
                    .to_string(),
            });
        }

        Self::new(config.pipeline_name(), Duration::from_secs(total as u64))
    }

    /// The configured period.
    pub fn period(&self) -> Duration {
        self.every
    }
}

impl Scheduler for IntervalScheduler {
    fn register(&self, board: &mut dyn JobBoard) -> Result<()> {
        board.add_job(&self.name, FireRule::interval(self.every)?);
        Ok(())
    }
}

/// Factory for interval schedulers.
pub struct IntervalSchedulerFactory;

impl SchedulerFactory for IntervalSchedulerFactory {
    fn create(&self, config: &CapabilityConfig) -> Result<Box<dyn Scheduler>> {
        Ok(Box::new(IntervalScheduler::from_config(config)?))
    }
}
