//! `keel modules` — module graph inspection.

use std::path::Path;

use anyhow::{Context, Result};
use keel_graph::format_tree;
use keel_manifest::ProjectManifest;

/// List every module with its direct dependencies and dependents.
pub fn list(manifest: &ProjectManifest) -> Result<()> {
    let graph = manifest.module_graph();
    if graph.is_empty() {
        println!("No modules defined. Add [modules.<name>] sections to keel.toml.");
        return Ok(());
    }

    println!("Modules ({}):", graph.len());
    println!();
    for node in graph.iter() {
        let deps = if node.dependencies.is_empty() {
            "-".to_string()
        } else {
            node.dependencies.join(", ")
        };
        println!("  {:<25} depends on: {deps}", node.name);

        let dependents = graph.dependents(&node.name);
        if !dependents.is_empty() {
            println!("  {:<25} used by:    {}", "", dependents.join(", "));
        }
    }
    Ok(())
}

/// Print the dependency tree of a target's modules.
pub fn tree(project_dir: &Path, manifest: &ProjectManifest, target: &str) -> Result<()> {
    let store = manifest.descriptor_store(project_dir)?;
    let descriptor = store.get(target)?;
    let graph = manifest.module_graph();

    let rendered = format_tree(&graph, &descriptor.name, descriptor.modules.as_slice())
        .with_context(|| format!("walking modules of target '{target}'"))?;
    print!("{rendered}");
    Ok(())
}
