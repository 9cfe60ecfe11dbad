//! File-level dependency graph
//!
//! Nodes are keyed by absolute file path. Every edge is mirrored in both
//! endpoints' adjacency lists, and the graph keeps node insertion order so
//! that traversals and reports are reproducible between runs.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// A node in the dependency graph representing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Absolute canonical file path; the node's identity
    pub path: PathBuf,
    /// Files this file depends on (unique, insertion-ordered)
    pub outgoing: Vec<PathBuf>,
    /// Files that depend on this file (unique, insertion-ordered)
    pub incoming: Vec<PathBuf>,
}

impl GraphNode {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }
}

/// Directed file dependency graph with bidirectional adjacency
///
/// Invariant: for every edge `u -> v`, `v` is in `u.outgoing` exactly when
/// `u` is in `v.incoming`. All mutations preserve this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    nodes: HashMap<PathBuf, GraphNode>,
    /// Node keys in insertion order
    order: Vec<PathBuf>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node if absent; existing nodes are untouched
    pub fn add_node(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.nodes.contains_key(&path) {
            self.order.push(path.clone());
            self.nodes.insert(path.clone(), GraphNode::new(path));
        }
    }

    /// Add an edge, creating both endpoints if absent
    ///
    /// Adding the same edge twice is a no-op.
    pub fn add_edge(&mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) {
        let from = from.into();
        let to = to.into();
        self.add_node(from.clone());
        self.add_node(to.clone());

        if let Some(from_node) = self.nodes.get_mut(&from) {
            if !from_node.outgoing.contains(&to) {
                from_node.outgoing.push(to.clone());
            }
        }
        if let Some(to_node) = self.nodes.get_mut(&to) {
            if !to_node.incoming.contains(&from) {
                to_node.incoming.push(from);
            }
        }
    }

    /// Remove a node and scrub it from every adjacency list
    pub fn remove_node(&mut self, path: &Path) {
        if self.nodes.remove(path).is_none() {
            return;
        }
        self.order.retain(|p| p != path);
        for node in self.nodes.values_mut() {
            node.outgoing.retain(|p| p != path);
            node.incoming.retain(|p| p != path);
        }
    }

    /// Remove an edge; endpoints stay
    pub fn remove_edge(&mut self, from: &Path, to: &Path) {
        if let Some(node) = self.nodes.get_mut(from) {
            node.outgoing.retain(|p| p != to);
        }
        if let Some(node) = self.nodes.get_mut(to) {
            node.incoming.retain(|p| p != from);
        }
    }

    /// Whether the graph holds a node for `path`
    pub fn has_node(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    /// Whether the edge `from -> to` exists
    pub fn has_edge(&self, from: &Path, to: &Path) -> bool {
        self.nodes
            .get(from)
            .map(|n| n.outgoing.iter().any(|p| p == to))
            .unwrap_or(false)
    }

    /// Copy of a node's outgoing adjacency, empty for unknown nodes
    pub fn outgoing(&self, path: &Path) -> Vec<PathBuf> {
        self.nodes
            .get(path)
            .map(|n| n.outgoing.clone())
            .unwrap_or_default()
    }

    /// Copy of a node's incoming adjacency, empty for unknown nodes
    pub fn incoming(&self, path: &Path) -> Vec<PathBuf> {
        self.nodes
            .get(path)
            .map(|n| n.incoming.clone())
            .unwrap_or_default()
    }

    /// All node paths in insertion order
    pub fn nodes(&self) -> Vec<PathBuf> {
        self.order.clone()
    }

    /// Borrowed view of a node
    pub fn node(&self, path: &Path) -> Option<&GraphNode> {
        self.nodes.get(path)
    }

    /// All edges as `(from, to)` pairs, in node-then-adjacency order
    pub fn edges(&self) -> Vec<(PathBuf, PathBuf)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for path in &self.order {
            if let Some(node) = self.nodes.get(path) {
                for to in &node.outgoing {
                    edges.push((path.clone(), to.clone()));
                }
            }
        }
        edges
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.outgoing.len()).sum()
    }

    /// Every node reachable from `path` along outgoing edges
    ///
    /// Iterative DFS. The origin itself is only included when it is
    /// re-reached through a cycle.
    pub fn transitive_outgoing(&self, path: &Path) -> HashSet<PathBuf> {
        self.transitive(path, |node| &node.outgoing)
    }

    /// Every node that transitively depends on `path`
    ///
    /// Iterative DFS over incoming edges; same origin convention as
    /// [`transitive_outgoing`](Self::transitive_outgoing).
    pub fn transitive_incoming(&self, path: &Path) -> HashSet<PathBuf> {
        self.transitive(path, |node| &node.incoming)
    }

    fn transitive<'a, F>(&'a self, path: &Path, adjacency: F) -> HashSet<PathBuf>
    where
        F: Fn(&'a GraphNode) -> &'a Vec<PathBuf>,
    {
        let mut reached = HashSet::new();
        let mut stack: Vec<&PathBuf> = match self.nodes.get(path) {
            Some(node) => adjacency(node).iter().collect(),
            None => return reached,
        };

        while let Some(current) = stack.pop() {
            if !reached.insert(current.clone()) {
                continue;
            }
            if let Some(node) = self.nodes.get(current) {
                for next in adjacency(node) {
                    if !reached.contains(next) {
                        stack.push(next);
                    }
                }
            }
        }

        reached
    }

    /// The `k` nodes with the most outgoing edges, descending
    pub fn top_k_by_outgoing(&self, k: usize) -> Vec<(PathBuf, usize)> {
        self.top_k(k, |node| node.outgoing.len())
    }

    /// The `k` nodes with the most incoming edges, descending
    pub fn top_k_by_incoming(&self, k: usize) -> Vec<(PathBuf, usize)> {
        self.top_k(k, |node| node.incoming.len())
    }

    fn top_k<F>(&self, k: usize, degree: F) -> Vec<(PathBuf, usize)>
    where
        F: Fn(&GraphNode) -> usize,
    {
        let mut ranked: Vec<(PathBuf, usize)> = self
            .order
            .iter()
            .filter_map(|path| self.nodes.get(path).map(|n| (path.clone(), degree(n))))
            .collect();
        // Stable sort keeps insertion order among equal degrees
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);
        ranked
    }

    /// Nodes with no edges in either direction
    pub fn orphans(&self) -> Vec<PathBuf> {
        self.filtered(|n| n.outgoing.is_empty() && n.incoming.is_empty())
    }

    /// Nodes that depend on others but have no dependents
    pub fn leaves(&self) -> Vec<PathBuf> {
        self.filtered(|n| !n.outgoing.is_empty() && n.incoming.is_empty())
    }

    /// Nodes with dependents but no dependencies of their own
    pub fn roots(&self) -> Vec<PathBuf> {
        self.filtered(|n| n.outgoing.is_empty() && !n.incoming.is_empty())
    }

    fn filtered<F>(&self, pred: F) -> Vec<PathBuf>
    where
        F: Fn(&GraphNode) -> bool,
    {
        self.order
            .iter()
            .filter(|path| self.nodes.get(*path).map(&pred).unwrap_or(false))
            .cloned()
            .collect()
    }

    /// Export to DOT format for visualization
    ///
    /// `cycle_edges` are drawn bold red so Graphviz output highlights the
    /// problem areas.
    pub fn to_dot(&self, cycle_edges: &HashSet<(PathBuf, PathBuf)>) -> String {
        let mut dot = String::from("digraph dependencies {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box];\n\n");

        for path in &self.order {
            let label = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown");
            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\"];\n",
                path.display(),
                label
            ));
        }

        dot.push('\n');

        for (from, to) in self.edges() {
            let attrs = if cycle_edges.contains(&(from.clone(), to.clone())) {
                " [color=red, style=bold]"
            } else {
                ""
            };
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\"{};\n",
                from.display(),
                to.display(),
                attrs
            ));
        }

        dot.push_str("}\n");
        dot
    }
}
