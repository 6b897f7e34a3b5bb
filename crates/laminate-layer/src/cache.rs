//! Memoized wrapper types, one cache per owning type.

use crate::capability::CapabilitySet;
use crate::factory::WrapperDescriptor;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use laminate_core::Result;
use std::sync::Arc;
use tracing::trace;

/// Maps an ordered capability set to the wrapper type synthesized for it.
/// Entries are never evicted.
pub struct WrapperCache {
    entries: DashMap<CapabilitySet, Arc<WrapperDescriptor>>,
}

impl Default for WrapperCache {
    fn default() -> Self { Self::new() }
}

impl WrapperCache {
    pub fn new() -> Self { Self { entries: DashMap::new() } }

    /// Return the descriptor for `capabilities`, synthesizing it with
    /// `create` on first use.
    ///
    /// `create` runs while the entry is locked, so concurrent first callers
    /// for the same key wait for a single synthesis and share its result.
    /// A failed `create` leaves the cache untouched.
    pub fn get_or_create<F>(
        &self,
        capabilities: &CapabilitySet,
        allow_overrides: bool,
        create: F,
    ) -> Result<Arc<WrapperDescriptor>>
    where
        F: FnOnce() -> Result<WrapperDescriptor>,
    {
        match self.entries.entry(capabilities.clone()) {
            Entry::Occupied(entry) => {
                let descriptor = entry.get().clone();
                drop(entry);
                trace!("Wrapper cache hit: {}", descriptor.name());
                descriptor.permits(allow_overrides)?;
                Ok(descriptor)
            }
            Entry::Vacant(entry) => {
                let descriptor = Arc::new(create()?);
                entry.insert(descriptor.clone());
                Ok(descriptor)
            }
        }
    }

    pub fn contains(&self, capabilities: &CapabilitySet) -> bool {
        self.entries.contains_key(capabilities)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Names of every cached wrapper type, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.value().name().to_string()).collect();
        names.sort();
        names
    }
}
