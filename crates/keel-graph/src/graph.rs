//! Module dependency graph and transitive closure.
//!
//! The closure walk is depth-first: roots in the order given, each module's
//! dependencies in the order declared. A module is emitted once all of its
//! dependencies have been emitted, so the resulting sequence is always
//! dependency-first and fully deterministic.

use std::collections::{BTreeMap, HashSet};

use keel_core::{ResolveError, Result};
use tracing::{debug, trace};

/// A module and its direct dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    /// Module name.
    pub name: String,
    /// Direct dependencies, in declaration order, without repeats.
    pub dependencies: Vec<String>,
}

impl ModuleNode {
    /// Create a node. Repeated dependency names keep their first position.
    pub fn new<I, S>(name: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let dependencies = dependencies
            .into_iter()
            .map(Into::into)
            .filter(|dep: &String| seen.insert(dep.clone()))
            .collect();
        Self {
            name: name.into(),
            dependencies,
        }
    }
}

/// A finite mapping from module name to its direct dependencies.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    nodes: BTreeMap<String, ModuleNode>,
}

impl ModuleGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning the node it replaced, if any.
    pub fn insert(&mut self, node: ModuleNode) -> Option<ModuleNode> {
        self.nodes.insert(node.name.clone(), node)
    }

    /// Insert a module by name and dependency list.
    pub fn add_module<I, S>(&mut self, name: impl Into<String>, dependencies: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(ModuleNode::new(name, dependencies));
        self
    }

    /// Look up a module.
    pub fn get(&self, name: &str) -> Option<&ModuleNode> {
        self.nodes.get(name)
    }

    /// Whether the module has a dependency entry.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// All modules, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleNode> {
        self.nodes.values()
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no modules.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Modules that list `name` as a direct dependency, sorted by name.
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|node| node.dependencies.iter().any(|d| d == name))
            .map(|node| node.name.as_str())
            .collect()
    }

    /// Compute every module reachable from `roots`, roots included.
    ///
    /// The result is in depth-first completion order: each module appears
    /// exactly once, after all of its dependencies. Fails with
    /// `UnknownModule` when a referenced module has no entry and with
    /// `CyclicDependency` when the walk re-enters a module on its current
    /// path.
    pub fn closure<S: AsRef<str>>(&self, roots: &[S]) -> Result<Vec<String>> {
        let mut walk = Walk {
            graph: self,
            visited: HashSet::new(),
            path: Vec::new(),
            order: Vec::new(),
        };
        for root in roots {
            walk.visit(root.as_ref(), None)?;
        }
        debug!(
            roots = roots.len(),
            modules = walk.order.len(),
            "computed module closure"
        );
        Ok(walk.order)
    }
}

/// State for one closure walk.
struct Walk<'g> {
    graph: &'g ModuleGraph,
    visited: HashSet<&'g str>,
    path: Vec<&'g str>,
    order: Vec<String>,
}

impl<'g> Walk<'g> {
    fn visit(&mut self, name: &str, required_by: Option<&str>) -> Result<()> {
        let graph = self.graph;
        let node = graph
            .nodes
            .get(name)
            .ok_or_else(|| ResolveError::UnknownModule {
                name: name.to_string(),
                required_by: required_by.map(str::to_string),
            })?;
        let name = node.name.as_str();

        if let Some(start) = self.path.iter().position(|m| *m == name) {
            let mut cycle: Vec<String> = self.path[start..].iter().map(|m| m.to_string()).collect();
            cycle.push(name.to_string());
            return Err(ResolveError::CyclicDependency { path: cycle });
        }
        if self.visited.contains(name) {
            return Ok(());
        }

        trace!(module = name, depth = self.path.len(), "visiting module");
        self.path.push(name);
        for dep in &node.dependencies {
            self.visit(dep, Some(name))?;
        }
        self.path.pop();

        self.visited.insert(name);
        self.order.push(name.to_string());
        Ok(())
    }
}
