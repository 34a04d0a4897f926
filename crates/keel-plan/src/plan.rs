//! The resolved build plan handed to the compile/link engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use keel_core::TargetCategory;

use crate::fingerprint::PlanFingerprint;
use crate::settings::EffectiveSettings;

/// A fully resolved description of what to compile and link for one target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildPlan {
    /// Target name.
    pub target: String,
    /// Target build category.
    pub category: TargetCategory,
    /// Effective toolchain settings.
    pub settings: EffectiveSettings,
    /// Every required module exactly once, dependencies before dependents.
    pub ordered_modules: Vec<String>,
}

impl BuildPlan {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// SHA-256 fingerprint of the compact JSON encoding.
    pub fn fingerprint(&self) -> serde_json::Result<PlanFingerprint> {
        let bytes = serde_json::to_vec(self)?;
        Ok(PlanFingerprint::compute(&bytes))
    }
}

impl fmt::Display for BuildPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Build Plan: {} ===", self.target)?;
        writeln!(f, "Category:        {}", self.category)?;
        writeln!(
            f,
            "Settings:        {}",
            self.settings.resolved_settings_version
        )?;
        writeln!(
            f,
            "Include order:   {}",
            self.settings.resolved_include_order_version
        )?;
        writeln!(f)?;
        writeln!(f, "--- Modules ({}) ---", self.ordered_modules.len())?;
        for (i, module) in self.ordered_modules.iter().enumerate() {
            writeln!(f, "  {:>3}. {module}", i + 1)?;
        }
        writeln!(f)?;
        let fingerprint = self.fingerprint().map_err(|_| fmt::Error)?;
        writeln!(f, "Fingerprint: {fingerprint}")
    }
}
