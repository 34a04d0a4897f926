//! Project and target file formats for Keel.
//!
//! The resolver itself only consumes parsed values. This crate turns
//! `keel.toml` and `targets/*.target.toml` into a
//! [`keel_core::DescriptorStore`], a [`keel_graph::ModuleGraph`], and the
//! engine's version catalog and floor.

pub mod error;
pub mod project;
pub mod target_file;

pub use error::{ManifestError, Result};
pub use project::{EngineConfig, ModuleEntry, ProjectConfig, ProjectManifest, MANIFEST_FILE};
pub use target_file::{
    discover_targets, generate_template, load_target_toml, parse_target_toml, target_to_toml,
    TargetEntry,
};
