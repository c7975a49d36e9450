//! Registry of activated defaults
//!
//! The registry owns the activation records; `DefaultRef` handles only
//! name them. Identifiers grow from 1 and are never reused, so a stale
//! handle can never resolve to a newer activation.

use std::collections::BTreeMap;
use tracing::{debug, warn};
use ttcn_core::Result;
use ttcn_types::{DefaultId, DefaultRef};

/// One activated default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultEntry {
    /// Identifier handed out in the `DefaultRef`
    pub id: DefaultId,
    /// Name of the altstep kept active
    pub altstep: String,
}

/// Activation records of one test component
#[derive(Debug)]
pub struct DefaultRegistry {
    entries: BTreeMap<DefaultId, DefaultEntry>,
    next_id: u64,
}

impl Default for DefaultRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        DefaultRegistry {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Activate `altstep` and return a handle to it
    pub fn activate(&mut self, altstep: impl Into<String>) -> DefaultRef {
        let id = DefaultId::new(self.next_id);
        self.next_id += 1;
        let altstep = altstep.into();
        debug!(target: "ttcn::default", %id, altstep = %altstep, "Default activated");
        self.entries.insert(id, DefaultEntry { id, altstep });
        DefaultRef::bind(id)
    }

    /// Deactivate the default `handle` refers to
    ///
    /// Deactivating `null` or an already deactivated default is ignored
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns a binding error if `handle` is unbound.
    pub fn deactivate(&mut self, handle: &DefaultRef) -> Result<()> {
        match handle.resolve()? {
            None => {
                warn!(target: "ttcn::default", "Deactivate operation on a null default reference was ignored");
            }
            Some(id) => match self.entries.remove(&id) {
                Some(entry) => {
                    debug!(target: "ttcn::default", %id, altstep = %entry.altstep, "Default deactivated");
                }
                None => {
                    warn!(target: "ttcn::default", %id, "Default reference is already deactivated");
                }
            },
        }
        Ok(())
    }

    /// Deactivate every default
    pub fn deactivate_all(&mut self) {
        if !self.entries.is_empty() {
            debug!(target: "ttcn::default", count = self.entries.len(), "All defaults deactivated");
        }
        self.entries.clear();
    }

    /// Find the activation record a handle refers to
    ///
    /// Returns `None` for a null handle or a deactivated default.
    ///
    /// # Errors
    ///
    /// Returns a binding error if `handle` is unbound.
    pub fn lookup(&self, handle: &DefaultRef) -> Result<Option<&DefaultEntry>> {
        Ok(handle.resolve()?.and_then(|id| self.entries.get(&id)))
    }

    /// Active defaults in activation order
    pub fn iter(&self) -> impl Iterator<Item = &DefaultEntry> {
        self.entries.values()
    }

    /// Number of active defaults
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no default is active
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
