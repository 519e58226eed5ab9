//! FLINT Engine - pipeline activation and lifecycle ownership.
//!
//! This crate provides the running half of FLINT:
//! - Activation dispatcher classifying definitions into immediate,
//!   event-triggered or scheduled mode
//! - Listener host owning one detached task per event-triggered pipeline
//! - Shared temporal scheduler accumulating and firing scheduled jobs
//! - Default step runner (`log` and `shell` operators)
//! - Tracing subscriber setup
//!
//! # Example
//!
//! ```ignore
//! use flint_engine::prelude::*;
//!
//! let (triggers, schedulers) = flint_plugins::standard_registries();
//! let mut dispatcher = Dispatcher::new(triggers, schedulers, StepRunnerFactory::shared());
//!
//! for path in &paths {
//!     dispatcher.register_pipeline(path).await?;
//! }
//!
//! // Blocks for the process lifetime if any scheduled jobs exist.
//! dispatcher.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dispatch;
pub mod listener;
pub mod observability;
pub mod runner;
pub mod schedule;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dispatch::{activation_callback, Dispatcher};
    pub use crate::listener::ListenerHost;
    pub use crate::observability::{init_tracing, LogFormat};
    pub use crate::runner::{StepRunner, StepRunnerFactory};
    pub use crate::schedule::JobScheduler;
}
