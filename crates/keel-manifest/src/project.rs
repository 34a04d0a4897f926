//! `keel.toml` project manifest.
//!
//! One file describes the engine's version catalog and floor, any number of
//! targets, and the module dependency map:
//! ```toml
//! [project]
//! name = "PhysicsEx2"
//!
//! [engine]
//! settings-floor = "V2"
//!
//! [targets.PhysicsEx2]
//! category = "game"
//! settings-version = "V2"
//! include-order-version = "Unreal5_1"
//! modules = ["PhysicsEx2"]
//!
//! [modules.PhysicsEx2]
//! dependencies = ["Core"]
//!
//! [modules.Core]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use keel_core::{DescriptorStore, TargetDescriptor, VersionCatalog, VersionTag};
use keel_graph::ModuleGraph;

use crate::error::{ManifestError, Result};
use crate::target_file::{discover_targets, load_target_toml, TargetEntry};

/// File name searched for by [`ProjectManifest::find_and_load`].
pub const MANIFEST_FILE: &str = "keel.toml";

/// The top-level manifest structure for a Keel project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Engine-wide version settings.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Targets keyed by name.
    #[serde(default)]
    pub targets: BTreeMap<String, TargetEntry>,
    /// Module dependency map keyed by module name.
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleEntry>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Engine section: recognized versions and the settings floor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Minimum settings revision applied to every target.
    #[serde(default)]
    pub settings_floor: Option<String>,
    /// Replaces the built-in recognized settings revisions.
    #[serde(default)]
    pub settings_versions: Option<Vec<String>>,
    /// Replaces the built-in recognized include-order versions.
    #[serde(default)]
    pub include_order_versions: Option<Vec<String>>,
}

/// One module's direct dependencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Direct dependencies in declaration order.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl ProjectManifest {
    /// Parse a manifest from a TOML string.
    pub fn parse(input: &str) -> Result<Self> {
        let manifest: ProjectManifest = toml::from_str(input)?;
        if manifest.project.name.trim().is_empty() {
            return Err(ManifestError::Invalid {
                detail: "project.name is required".to_string(),
            });
        }
        Ok(manifest)
    }

    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Search upward from `start_dir` for a `keel.toml`, parse it, and return
    /// it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found project manifest");
                return Ok(Some((Self::load(&candidate)?, dir)));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Typed descriptors for the targets declared inline, sorted by name.
    pub fn descriptors(&self) -> Result<Vec<TargetDescriptor>> {
        self.targets
            .iter()
            .map(|(name, entry)| entry.to_descriptor(name).map_err(ManifestError::from))
            .collect()
    }

    /// Build a descriptor store from inline targets plus every
    /// `targets/*.target.toml` file under `project_dir`.
    ///
    /// A target defined in both places fails with `DuplicateTarget`.
    pub fn descriptor_store(&self, project_dir: &Path) -> Result<DescriptorStore> {
        let mut store = DescriptorStore::new();
        for descriptor in self.descriptors()? {
            store.register(descriptor)?;
        }
        for (_, path) in discover_targets(project_dir)? {
            store.register(load_target_toml(&path)?)?;
        }
        Ok(store)
    }

    /// The module dependency graph.
    pub fn module_graph(&self) -> ModuleGraph {
        let mut graph = ModuleGraph::new();
        for (name, entry) in &self.modules {
            graph.add_module(name.as_str(), entry.dependencies.iter().cloned());
        }
        graph
    }

    /// The version catalog: built-in, with any sets the manifest replaces.
    pub fn catalog(&self) -> Result<VersionCatalog> {
        let mut catalog = VersionCatalog::builtin();
        if let Some(versions) = &self.engine.settings_versions {
            catalog = catalog.with_settings(parse_tags(versions)?);
        }
        if let Some(versions) = &self.engine.include_order_versions {
            catalog = catalog.with_include_order(parse_tags(versions)?);
        }
        Ok(catalog)
    }

    /// The engine-wide settings floor, if configured.
    pub fn settings_floor(&self) -> Result<Option<VersionTag>> {
        match &self.engine.settings_floor {
            Some(text) => Ok(Some(text.parse()?)),
            None => Ok(None),
        }
    }

    /// Generate the default template for `keel init`.
    ///
    /// `name` is written as a quoted key, so names with spaces or dots stay
    /// a single table key.
    pub fn template(name: &str) -> String {
        let key = toml::Value::String(name.to_string()).to_string();
        let modules = if name == "Core" {
            format!("[modules.{key}]\n")
        } else {
            format!("[modules.{key}]\ndependencies = [\"Core\"]\n\n[modules.Core]\n")
        };
        format!(
            r#"[project]
name = {key}

[engine]
settings-floor = "V2"

[targets.{key}]
category = "game"
settings-version = "V2"
include-order-version = "Unreal5_1"
modules = [{key}]

{modules}"#
        )
    }
}

fn parse_tags(texts: &[String]) -> Result<Vec<VersionTag>> {
    texts
        .iter()
        .map(|t| t.parse::<VersionTag>().map_err(ManifestError::from))
        .collect()
}
