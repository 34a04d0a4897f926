//! Module dependency tree display.
//!
//! Renders the modules a target links as an ASCII tree:
//! ```text
//! ShooterGame
//! ├── Shooter
//! │   ├── Engine
//! │   │   └── Core
//! │   └── Core (shared)
//! └── Online
//!     └── Core (shared)
//! ```
//! A module already expanded elsewhere in the tree is printed once more with
//! a `(shared)` marker and is not expanded again.

use std::collections::HashSet;

use keel_core::Result;

use crate::graph::ModuleGraph;

/// Format the dependency tree rooted at `roots`.
///
/// The graph is walked with [`ModuleGraph::closure`] first, so unknown
/// modules and cycles fail here exactly as they would during planning.
pub fn format_tree<S: AsRef<str>>(graph: &ModuleGraph, label: &str, roots: &[S]) -> Result<String> {
    let unique = graph.closure(roots)?.len();

    let mut out = format!("{label}\n");
    let mut expanded = HashSet::new();
    let count = roots.len();
    for (i, root) in roots.iter().enumerate() {
        format_module(&mut out, graph, root.as_ref(), "", i == count - 1, &mut expanded);
    }

    out.push_str(&format!(
        "\n{} direct, {unique} total\n",
        roots.len()
    ));
    Ok(out)
}

fn format_module<'g>(
    out: &mut String,
    graph: &'g ModuleGraph,
    name: &str,
    prefix: &str,
    is_last: bool,
    expanded: &mut HashSet<&'g str>,
) {
    let connector = if is_last { "└── " } else { "├── " };
    // closure() already proved every name resolves.
    let Some(node) = graph.get(name) else {
        return;
    };

    if !expanded.insert(node.name.as_str()) {
        out.push_str(&format!("{prefix}{connector}{name} (shared)\n"));
        return;
    }
    out.push_str(&format!("{prefix}{connector}{name}\n"));

    let child_prefix = if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };
    let child_count = node.dependencies.len();
    for (i, dep) in node.dependencies.iter().enumerate() {
        format_module(out, graph, dep, &child_prefix, i == child_count - 1, expanded);
    }
}
