//! Structural validation of target descriptors.
//!
//! Runs before any graph traversal so malformed input fails fast.

use std::collections::HashSet;

use crate::descriptor::TargetDescriptor;
use crate::error::{ResolveError, Result};

/// Check that a descriptor is structurally sound.
///
/// Rejects an empty name, an empty module list, blank module names, and
/// module names that appear more than once. The category needs no check
/// here: `TargetCategory` cannot hold an unrecognized value.
pub fn validate(descriptor: &TargetDescriptor) -> Result<()> {
    if descriptor.name.trim().is_empty() {
        return Err(ResolveError::invalid("target name is empty"));
    }

    if descriptor.modules.is_empty() {
        return Err(ResolveError::invalid(format!(
            "target '{}' declares no modules",
            descriptor.name
        )));
    }

    let mut seen = HashSet::new();
    for module in &descriptor.modules {
        if module.trim().is_empty() {
            return Err(ResolveError::invalid(format!(
                "target '{}' declares a blank module name",
                descriptor.name
            )));
        }
        if !seen.insert(module.as_str()) {
            return Err(ResolveError::invalid(format!(
                "target '{}' declares module '{module}' more than once",
                descriptor.name
            )));
        }
    }

    Ok(())
}
