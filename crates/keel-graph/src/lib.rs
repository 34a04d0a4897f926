//! Module dependency graph for the Keel target-configuration resolver.
//!
//! The graph is a finite mapping from module name to its direct
//! dependencies, supplied by whatever scans the source tree. It computes
//! deterministic, cycle-checked dependency closures and renders dependency
//! trees for diagnostics.

pub mod graph;
pub mod tree;

pub use graph::{ModuleGraph, ModuleNode};
pub use tree::format_tree;
