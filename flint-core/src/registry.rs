//! Capability registries.
//!
//! Identifier-to-factory maps for pluggable trigger and scheduler
//! implementations. A registry is created empty, populated during extension
//! installation (before the dispatcher's first call), and read-only once
//! dispatch begins. Registries are explicitly owned and handed to the
//! dispatcher at construction rather than reached through globals, so tests
//! can substitute fakes.

use crate::traits::{EventTriggerFactory, SchedulerFactory};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An identifier-to-factory map for one capability family.
pub struct CapabilityRegistry<F: ?Sized> {
    factories: HashMap<String, Arc<F>>,
}

/// Registry of event trigger factories.
pub type TriggerRegistry = CapabilityRegistry<dyn EventTriggerFactory>;

/// Registry of scheduler factories.
pub type SchedulerRegistry = CapabilityRegistry<dyn SchedulerFactory>;

impl<F: ?Sized> CapabilityRegistry<F> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: Arc<F>) {
        self.factories.insert(name.into(), factory);
    }

    /// Look up a factory by identifier.
    pub fn lookup(&self, name: &str) -> Option<Arc<F>> {
        self.factories.get(name).cloned()
    }

    /// Registered identifiers, sorted for stable output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry holds no factories.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<F: ?Sized> Default for CapabilityRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for CapabilityRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("names", &self.names())
            .finish()
    }
}
