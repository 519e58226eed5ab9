//! Event trigger implementations.
//!
//! Triggers watch an external source and activate their pipeline once per
//! detected event. Each trigger runs on its own detached task for the
//! remainder of the process lifetime; none of them expose a stop operation.

mod filesystem;
mod manual;

pub use filesystem::{FileWatchTrigger, FileWatchTriggerFactory};
pub use manual::{FireHandle, ManualTrigger, ManualTriggerFactory};
