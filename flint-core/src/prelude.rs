//! Prelude for convenient imports.
//!
//! ```
//! use flint_core::prelude::*;
//! ```

pub use crate::definition::{Activation, PipelineDefinition, TriggerBlock};
pub use crate::error::{FlintError, Result};
pub use crate::registry::{CapabilityRegistry, SchedulerRegistry, TriggerRegistry};
pub use crate::traits::{
    ActivationCallback, CapabilityConfig, CapabilityFuture, EventTrigger, EventTriggerFactory,
    FireRule, JobBoard, PipelineRunner, RunnerFactory, Scheduler, SchedulerFactory,
};
