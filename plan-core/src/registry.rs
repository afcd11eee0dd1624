//! The Worker Registry — a declarative, process-wide, read-only-after-startup
//! table of capabilities (spec.md §3, §4.2, §6).
//!
//! Modeled on `neuron_tool::ToolRegistry`, with one deliberate deviation:
//! spec.md §9 flags the original Python source's "duplicate registrations
//! are idempotent" behavior as a possibly-buggy ambiguity and asks for it
//! to be redesigned as an explicit startup error (see `RegistryError`). So
//! where `ToolRegistry::register` silently overwrites, `WorkerRegistry::register`
//! rejects a second registration of the same name.

use crate::error::RegistryError;
use crate::model::WorkerCapability;
use crate::worker::Worker;
use std::collections::HashMap;
use std::sync::Arc;

/// One registered capability: its declarative descriptor plus the worker
/// body that implements it.
struct Entry {
    capability: WorkerCapability,
    worker: Arc<dyn Worker>,
}

/// Registry of worker capabilities, read by the Planner (to inform its LLM
/// collaborator), the Dispatch Router (to validate declared outputs), the
/// Executor (to look workers up by name), Join/Reduce (to pick
/// `memorable_slots`), and the Synthesizer (to pick `synthesis_mode`).
///
/// Registration happens once, explicitly, in a startup routine — never via
/// import-time side effects (spec.md §9's guidance against "decorator
/// registered workers").
#[derive(Default)]
pub struct WorkerRegistry {
    entries: HashMap<String, Entry>,
}

impl WorkerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability. Errors if `capability.name` is already
    /// registered; registration is otherwise process-wide and read-only
    /// once startup completes.
    pub fn register(
        &mut self,
        capability: WorkerCapability,
        worker: Arc<dyn Worker>,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(&capability.name) {
            return Err(RegistryError::DuplicateWorker(capability.name.clone()));
        }
        self.entries.insert(
            capability.name.clone(),
            Entry { capability, worker },
        );
        Ok(())
    }

    /// Look up a capability descriptor by name.
    pub fn capability(&self, name: &str) -> Option<&WorkerCapability> {
        self.entries.get(name).map(|e| &e.capability)
    }

    /// Look up a worker body by name.
    pub fn worker(&self, name: &str) -> Option<Arc<dyn Worker>> {
        self.entries.get(name).map(|e| Arc::clone(&e.worker))
    }

    /// Whether a worker with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate over all registered capability descriptors, for presenting
    /// to the Planner's LLM collaborator (spec.md §4.4).
    pub fn capabilities(&self) -> impl Iterator<Item = &WorkerCapability> {
        self.entries.values().map(|e| &e.capability)
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
