//! Build plan assembly.
//!
//! `build` is a pure function of the store, the module graph, the resolver
//! catalog, and the settings floor. Errors from every stage propagate as-is.

use tracing::debug;

use keel_core::{validate, DescriptorStore, Result, VersionTag};
use keel_graph::ModuleGraph;

use crate::plan::BuildPlan;
use crate::settings::SettingsResolver;

/// Composes store, graph, and settings resolution into build plans.
///
/// Borrows its inputs immutably, so any number of builders may resolve
/// targets concurrently over the same store and graph.
#[derive(Debug, Clone)]
pub struct PlanBuilder<'a> {
    store: &'a DescriptorStore,
    graph: &'a ModuleGraph,
    resolver: SettingsResolver,
    floor: Option<VersionTag>,
}

impl<'a> PlanBuilder<'a> {
    /// Create a builder with no settings floor.
    pub fn new(store: &'a DescriptorStore, graph: &'a ModuleGraph, resolver: SettingsResolver) -> Self {
        Self {
            store,
            graph,
            resolver,
            floor: None,
        }
    }

    /// Set the engine-wide minimum settings revision.
    pub fn with_settings_floor(mut self, floor: VersionTag) -> Self {
        self.floor = Some(floor);
        self
    }

    /// The configured settings floor.
    pub fn settings_floor(&self) -> Option<&VersionTag> {
        self.floor.as_ref()
    }

    /// Resolve the named target into a build plan.
    ///
    /// Steps: fetch descriptor, validate, compute the module closure over the
    /// declared modules, resolve settings. Module order is depth-first
    /// completion order from the closure walk; modules with no dependency
    /// relation keep the descriptor's declaration order.
    pub fn build(&self, name: &str) -> Result<BuildPlan> {
        debug!(target_name = name, "building plan");
        let descriptor = self.store.get(name)?;
        validate(descriptor)?;
        let ordered_modules = self.graph.closure(descriptor.modules.as_slice())?;
        let settings = self.resolver.resolve(descriptor, self.floor.as_ref())?;

        debug!(
            target_name = name,
            modules = ordered_modules.len(),
            category = %descriptor.category,
            "assembled build plan"
        );

        Ok(BuildPlan {
            target: descriptor.name.clone(),
            category: descriptor.category,
            settings,
            ordered_modules,
        })
    }

    /// Resolve every registered target, in name order.
    ///
    /// Each target succeeds or fails on its own; one misconfigured target
    /// never prevents the others from resolving.
    pub fn build_all(&self) -> Vec<(String, Result<BuildPlan>)> {
        self.store
            .names()
            .map(|name| (name.to_string(), self.build(name)))
            .collect()
    }
}
