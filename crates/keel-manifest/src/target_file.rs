//! Per-target `.target.toml` files.
//!
//! A project may keep each target in its own file under `targets/`, one
//! descriptor per file:
//! ```toml
//! category = "game"
//! settings-version = "V2"
//! include-order-version = "Unreal5_1"
//! modules = ["PhysicsEx2"]
//! ```
//! The target name defaults to the file stem (`PhysicsEx2.target.toml`) and
//! may be overridden with a `name` key.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use keel_core::{ResolveError, TargetCategory, TargetDescriptor, VersionCatalog, VersionKind, VersionTag};

use crate::error::{ManifestError, Result};

const TARGET_SUFFIX: &str = ".target.toml";

/// A target as written in TOML, before category and version text is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetEntry {
    /// Build category text.
    pub category: String,
    /// Settings revision text.
    pub settings_version: String,
    /// Include-order convention text.
    pub include_order_version: String,
    /// Modules in declaration order.
    #[serde(default)]
    pub modules: Vec<String>,
}

impl TargetEntry {
    /// Convert into a typed descriptor named `name`.
    pub fn to_descriptor(&self, name: &str) -> std::result::Result<TargetDescriptor, ResolveError> {
        let category: TargetCategory = self.category.parse()?;
        let settings_version: VersionTag = self.settings_version.parse()?;
        let include_order_version: VersionTag = self.include_order_version.parse()?;
        Ok(
            TargetDescriptor::new(name, category, settings_version, include_order_version)
                .with_modules(self.modules.iter().cloned()),
        )
    }
}

#[derive(Debug, Deserialize)]
struct TargetFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(flatten)]
    entry: TargetEntry,
}

/// Parse a target file body. `default_name` is used when the file has no
/// `name` key.
pub fn parse_target_toml(toml_str: &str, default_name: &str) -> Result<TargetDescriptor> {
    let file: TargetFile = toml::from_str(toml_str)?;
    let name = file.name.as_deref().unwrap_or(default_name);
    Ok(file.entry.to_descriptor(name)?)
}

/// Load a descriptor from a `.target.toml` file.
pub fn load_target_toml(path: &Path) -> Result<TargetDescriptor> {
    if !path.exists() {
        return Err(ManifestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let stem = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(TARGET_SUFFIX))
        .unwrap_or_default();
    let descriptor = parse_target_toml(&content, stem)?;
    debug!(path = %path.display(), target_name = %descriptor.name, "loaded target file");
    Ok(descriptor)
}

/// Serialize a descriptor to pretty TOML.
pub fn target_to_toml(descriptor: &TargetDescriptor) -> Result<String> {
    Ok(toml::to_string_pretty(descriptor)?)
}

/// Generate a template `.target.toml` for a new game target.
///
/// Seeds the newest versions `catalog` recognizes and links `module`.
pub fn generate_template(name: &str, catalog: &VersionCatalog, module: &str) -> Result<String> {
    let latest = |kind: VersionKind| {
        catalog.latest(kind).cloned().ok_or_else(|| ManifestError::Invalid {
            detail: format!("catalog has no {kind} versions"),
        })
    };
    let descriptor = TargetDescriptor::new(
        name,
        TargetCategory::Game,
        latest(VersionKind::Settings)?,
        latest(VersionKind::IncludeOrder)?,
    )
    .with_module(module);
    target_to_toml(&descriptor)
}

/// Discover all `.target.toml` files in a project's `targets/` directory.
///
/// Returns (target_name, file_path) pairs sorted by name.
pub fn discover_targets(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let targets_dir = project_dir.join("targets");
    if !targets_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut targets = Vec::new();
    for entry in std::fs::read_dir(&targets_dir)? {
        let path = entry?.path();
        let stem = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(TARGET_SUFFIX))
            .map(str::to_string);
        if let Some(name) = stem {
            targets.push((name, path));
        }
    }
    targets.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(targets)
}
