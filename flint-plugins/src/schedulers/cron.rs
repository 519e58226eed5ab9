//! Cron-expression scheduler.

use flint_core::error::{FlintError, Result};
use flint_core::traits::{CapabilityConfig, FireRule, JobBoard, Scheduler, SchedulerFactory};

/// Cron-expression scheduler.
///
/// # Configuration
///
/// ```yaml
/// scheduler:
///   type: cron
///   config:
///     expression: "0 0 2 * * *"   # every day at 02:00
/// ```
///
/// # Parameters
///
/// - `expression` (alias `schedule`) - 6-field cron expression
///   (`sec min hour day month weekday`), required
///
/// The expression is parsed at registration time, so a malformed schedule
/// fails the registration call rather than the first firing.
#[derive(Debug)]
pub struct CronScheduler {
    /// Job name (derived from the owning pipeline's file name).
    name: String,
    /// The parsed firing rule.
    rule: FireRule,
}

impl CronScheduler {
    /// Create a new cron scheduler from an expression.
    pub fn new(name: impl Into<String>, expression: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            rule: FireRule::cron(expression)?,
        })
    }

    /// Create from configuration.
    pub fn from_config(config: &CapabilityConfig) -> Result<Self> {
        let expression = config
            .get_string("expression")
            .or_else(|| config.get_string("schedule"))
            .ok_or_else(|| FlintError::ConfigValue {
                field: "expression".to_string(),
                cause: "cron scheduler requires an 'expression' parameter".to_string(),
            })?;

        Self::new(config.pipeline_name(), expression)
    }
}

impl Scheduler for CronScheduler {
    fn register(&self, board: &mut dyn JobBoard) -> Result<()> {
        board.add_job(&self.name, self.rule.clone());
        Ok(())
    }
}

/// Factory for cron schedulers.
pub struct CronSchedulerFactory;

impl SchedulerFactory for CronSchedulerFactory {
    fn create(&self, config: &CapabilityConfig) -> Result<Box<dyn Scheduler>> {
        Ok(Box::new(CronScheduler::from_config(config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> CapabilityConfig {
        CapabilityConfig::new(serde_yaml::from_str(yaml).unwrap(), "pipelines/nightly.yaml")
    }

    #[test]
    fn from_config_parses_expression() {
        let scheduler = CronScheduler::from_config(&config("expression: '0 0 2 * * *'\n")).unwrap();
        assert_eq!(scheduler.name, "nightly");
        assert!(matches!(scheduler.rule, FireRule::Cron { .. }));
    }

    #[test]
    fn from_config_accepts_schedule_alias() {
        let scheduler =
            CronScheduler::from_config(&config("schedule: '0 30 9 * * Mon-Fri'\n")).unwrap();
        assert!(matches!(scheduler.rule, FireRule::Cron { .. }));
    }

    #[test]
    fn from_config_missing_expression() {
        let result = CronScheduler::from_config(&config("{}"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), "E103");
    }

    #[test]
    fn from_config_invalid_expression() {
        let result = CronScheduler::from_config(&config("expression: 'every tuesday'\n"));
        assert!(result.is_err());
    }
}
