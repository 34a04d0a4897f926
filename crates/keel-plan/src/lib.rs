//! Build plan assembly for the Keel target-configuration resolver.
//!
//! # Pipeline
//!
//! For one target name, [`PlanBuilder::build`] runs:
//! 1. **Fetch** the descriptor from the [`keel_core::DescriptorStore`]
//! 2. **Validate** it structurally ([`keel_core::validate`])
//! 3. **Close** its modules over the [`keel_graph::ModuleGraph`]
//! 4. **Resolve** effective settings ([`SettingsResolver`])
//! 5. **Assemble** the [`BuildPlan`]
//!
//! Failures from any step surface unchanged as [`keel_core::ResolveError`].

pub mod builder;
pub mod fingerprint;
pub mod plan;
pub mod settings;

pub use builder::PlanBuilder;
pub use fingerprint::PlanFingerprint;
pub use plan::BuildPlan;
pub use settings::{EffectiveSettings, SettingsResolver};
