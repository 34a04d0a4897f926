//! Effective settings resolution.
//!
//! The settings revision is lifted to the caller's floor when the declared
//! revision is older. The include-order version is passed through untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use keel_core::{Result, TargetCategory, TargetDescriptor, VersionCatalog, VersionKind, VersionTag};

/// Concrete settings for one target, derived per resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EffectiveSettings {
    /// Target build category.
    pub category: TargetCategory,
    /// Settings revision after applying the floor.
    pub resolved_settings_version: VersionTag,
    /// Include-order convention, as declared.
    pub resolved_include_order_version: VersionTag,
}

/// Resolves declared versions against a catalog of recognized versions.
#[derive(Debug, Clone, Default)]
pub struct SettingsResolver {
    catalog: VersionCatalog,
}

impl SettingsResolver {
    /// Create a resolver over the given catalog.
    pub fn new(catalog: VersionCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog this resolver checks against.
    pub fn catalog(&self) -> &VersionCatalog {
        &self.catalog
    }

    /// Compute effective settings for `descriptor`.
    ///
    /// `floor` is an engine-wide minimum settings revision. Every version
    /// involved, the floor included, must be recognized by the catalog or
    /// resolution fails with `UnsupportedVersion`.
    pub fn resolve(
        &self,
        descriptor: &TargetDescriptor,
        floor: Option<&VersionTag>,
    ) -> Result<EffectiveSettings> {
        self.catalog
            .require(VersionKind::Settings, &descriptor.settings_version)?;
        self.catalog
            .require(VersionKind::IncludeOrder, &descriptor.include_order_version)?;

        let mut settings_version = descriptor.settings_version.clone();
        if let Some(floor) = floor {
            self.catalog.require(VersionKind::Settings, floor)?;
            if *floor > settings_version {
                warn!(
                    target_name = %descriptor.name,
                    declared = %settings_version,
                    floor = %floor,
                    "declared settings version is below the engine floor"
                );
                settings_version = floor.clone();
            }
        }

        debug!(
            target_name = %descriptor.name,
            settings = %settings_version,
            include_order = %descriptor.include_order_version,
            "resolved settings"
        );

        Ok(EffectiveSettings {
            category: descriptor.category,
            resolved_settings_version: settings_version,
            resolved_include_order_version: descriptor.include_order_version.clone(),
        })
    }
}
