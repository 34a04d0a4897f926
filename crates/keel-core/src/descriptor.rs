//! Target descriptors.

use serde::{Deserialize, Serialize};

use crate::category::TargetCategory;
use crate::version::VersionTag;

/// A declarative description of one buildable target.
///
/// Module order is significant: it is the tie-break order when the plan
/// builder sequences modules that have no dependency relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDescriptor {
    /// Target name, unique within a store.
    pub name: String,
    /// Build category.
    pub category: TargetCategory,
    /// Declared baseline settings revision.
    pub settings_version: VersionTag,
    /// Declared include-order convention.
    pub include_order_version: VersionTag,
    /// Modules linked into the target, in declaration order.
    #[serde(default)]
    pub modules: Vec<String>,
}

impl TargetDescriptor {
    /// Create a descriptor with no modules.
    pub fn new(
        name: impl Into<String>,
        category: TargetCategory,
        settings_version: VersionTag,
        include_order_version: VersionTag,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            settings_version,
            include_order_version,
            modules: Vec::new(),
        }
    }

    /// Append a module.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    /// Append several modules in order.
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules.extend(modules.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declaration_order() {
        let d = TargetDescriptor::new(
            "Shooter",
            TargetCategory::Game,
            VersionTag::new(2, 0, 0),
            VersionTag::new(5, 1, 0),
        )
        .with_module("Shooter")
        .with_modules(["Online", "Audio"]);

        assert_eq!(d.modules, vec!["Shooter", "Online", "Audio"]);
    }

    #[test]
    fn deserialize_kebab_case() {
        let json = r#"{
            "name": "ShooterServer",
            "category": "server",
            "settings-version": "V2",
            "include-order-version": "Unreal5_1",
            "modules": ["Shooter"]
        }"#;
        let d: TargetDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(d.category, TargetCategory::Server);
        assert_eq!(d.settings_version, VersionTag::new(2, 0, 0));
        assert_eq!(d.include_order_version, VersionTag::new(5, 1, 0));
    }
}
