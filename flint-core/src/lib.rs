//! FLINT Core Library
//!
//! Foundational types, traits and errors for the FLINT pipeline-activation
//! dispatcher.
//!
//! # Overview
//!
//! FLINT takes YAML pipeline definitions and activates each one in exactly
//! one of three modes: immediately, in response to an external event, or on
//! a recurring schedule. This crate defines the pieces every other FLINT
//! crate builds on:
//!
//! - **Definition**: the parsed shape of a pipeline definition document
//! - **Capability traits**: the contracts event triggers, schedulers and
//!   pipeline runners implement
//! - **Registries**: identifier-to-factory maps for pluggable capabilities
//! - **Errors**: the coded error taxonomy shared across the workspace
//!
//! # Example
//!
//! ```
//! use flint_core::definition::{Activation, PipelineDefinition};
//!
//! let def: PipelineDefinition = serde_yaml::from_str(
//!     "scheduler:\n  type: interval\n  config:\n    seconds: 30\n",
//! )
//! .unwrap();
//!
//! assert!(matches!(def.activation(), Some(Activation::Scheduled(_))));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod definition;
pub mod error;
pub mod prelude;
pub mod registry;
pub mod traits;

pub use definition::{Activation, PipelineDefinition, TriggerBlock};
pub use error::{FlintError, Result};
pub use registry::{CapabilityRegistry, SchedulerRegistry, TriggerRegistry};
pub use traits::{
    ActivationCallback, CapabilityConfig, CapabilityFuture, EventTrigger, EventTriggerFactory,
    FireRule, JobBoard, PipelineRunner, RunnerFactory, Scheduler, SchedulerFactory,
};
