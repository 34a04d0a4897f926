//! The descriptor store: named, immutable target descriptors.
//!
//! Stores are plain values built by the caller and passed explicitly to the
//! plan builder. Registration must finish before concurrent reads begin;
//! the store itself takes no locks.

use std::collections::BTreeMap;

use tracing::debug;

use crate::descriptor::TargetDescriptor;
use crate::error::{ResolveError, Result};

/// Holds registered target descriptors keyed by name.
#[derive(Debug, Clone, Default)]
pub struct DescriptorStore {
    targets: BTreeMap<String, TargetDescriptor>,
}

impl DescriptorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor.
    ///
    /// Fails with `InvalidDescriptor` for an empty name and with
    /// `DuplicateTarget` when the name is taken; in both cases the store is
    /// left unchanged.
    pub fn register(&mut self, descriptor: TargetDescriptor) -> Result<()> {
        if descriptor.name.trim().is_empty() {
            return Err(ResolveError::invalid("target name is empty"));
        }
        if self.targets.contains_key(&descriptor.name) {
            return Err(ResolveError::DuplicateTarget {
                name: descriptor.name,
            });
        }

        debug!(
            target_name = %descriptor.name,
            category = %descriptor.category,
            modules = descriptor.modules.len(),
            "registered target"
        );
        self.targets.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Result<&TargetDescriptor> {
        self.targets
            .get(name)
            .ok_or_else(|| ResolveError::UnknownTarget {
                name: name.to_string(),
            })
    }

    /// Whether a target with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Registered target names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Registered descriptors, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &TargetDescriptor> {
        self.targets.values()
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
