//! Cycle detection
//!
//! Tarjan's strongly-connected-components algorithm over the dependency
//! graph, a representative cycle path per SCC, an independent self-loop
//! scan, and a bounded elementary-cycle enumeration for callers that want
//! every simple cycle rather than one per component.

use crate::models::cycle::Cycle;
use crate::models::graph::DependencyGraph;
use std::collections::HashSet;
use std::path::PathBuf;

const UNVISITED: usize = usize::MAX;

/// Find one representative cycle per SCC of size >= 2, plus all self-loops
///
/// Self-loops never surface as multi-node SCCs, so they are scanned
/// explicitly; a node can contribute to both kinds of entry.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    let arena = GraphArena::from_graph(graph);
    let mut cycles = Vec::new();

    for scc in arena.tarjan_sccs() {
        if scc.len() >= 2 {
            cycles.push(arena.cycle_for_scc(&scc));
        }
    }

    for (id, neighbors) in arena.adjacency.iter().enumerate() {
        if neighbors.contains(&id) {
            cycles.push(Cycle::self_loop(arena.nodes[id].clone()));
        }
    }

    cycles
}

/// Enumerate up to `max_cycles` simple elementary cycles (Johnson)
///
/// Each cycle is normalized to its minimum-rotation form and duplicates are
/// dropped. Not the default analysis mode; `find_cycles` is.
pub fn find_elementary_cycles(graph: &DependencyGraph, max_cycles: usize) -> Vec<Cycle> {
    let arena = GraphArena::from_graph(graph);
    let raw = arena.johnson(max_cycles);

    let mut seen = HashSet::new();
    let mut cycles = Vec::new();
    for ids in raw {
        let normalized = normalize_rotation(&ids);
        if seen.insert(normalized.clone()) {
            let mut chain: Vec<PathBuf> = normalized
                .iter()
                .map(|&id| arena.nodes[id].clone())
                .collect();
            chain.push(arena.nodes[normalized[0]].clone());
            cycles.push(Cycle::new(chain));
        }
    }
    cycles
}

/// Rotate a cycle id sequence so the smallest id comes first
fn normalize_rotation(ids: &[usize]) -> Vec<usize> {
    let pivot = ids
        .iter()
        .enumerate()
        .min_by_key(|(_, &id)| id)
        .map(|(pos, _)| pos)
        .unwrap_or(0);
    let mut rotated = Vec::with_capacity(ids.len());
    rotated.extend_from_slice(&ids[pivot..]);
    rotated.extend_from_slice(&ids[..pivot]);
    rotated
}

/// Index-based view of the graph for the SCC machinery
///
/// Node ids follow the graph's insertion order and adjacency keeps edge
/// insertion order, so every pass over the arena is deterministic.
struct GraphArena {
    nodes: Vec<PathBuf>,
    adjacency: Vec<Vec<usize>>,
}

impl GraphArena {
    fn from_graph(graph: &DependencyGraph) -> Self {
        let nodes = graph.nodes();
        let index_of: std::collections::HashMap<&PathBuf, usize> =
            nodes.iter().enumerate().map(|(i, p)| (p, i)).collect();

        let adjacency = nodes
            .iter()
            .map(|path| {
                graph
                    .outgoing(path)
                    .iter()
                    .filter_map(|target| index_of.get(target).copied())
                    .collect()
            })
            .collect();

        Self { nodes, adjacency }
    }

    /// Tarjan with an explicit frame stack; deep graphs must not overflow
    /// the call stack
    fn tarjan_sccs(&self) -> Vec<Vec<usize>> {
        let n = self.nodes.len();
        let mut index = vec![UNVISITED; n];
        let mut lowlink = vec![0usize; n];
        let mut on_stack = vec![false; n];
        let mut stack: Vec<usize> = Vec::new();
        let mut next_index = 0usize;
        let mut sccs = Vec::new();
        let mut frames: Vec<(usize, usize)> = Vec::new();

        for start in 0..n {
            if index[start] != UNVISITED {
                continue;
            }

            index[start] = next_index;
            lowlink[start] = next_index;
            next_index += 1;
            stack.push(start);
            on_stack[start] = true;
            frames.push((start, 0));

            while let Some(frame) = frames.last_mut() {
                let v = frame.0;
                if frame.1 < self.adjacency[v].len() {
                    let w = self.adjacency[v][frame.1];
                    frame.1 += 1;
                    if index[w] == UNVISITED {
                        index[w] = next_index;
                        lowlink[w] = next_index;
                        next_index += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        frames.push((w, 0));
                    } else if on_stack[w] {
                        lowlink[v] = lowlink[v].min(index[w]);
                    }
                } else {
                    frames.pop();
                    if let Some(parent) = frames.last() {
                        let p = parent.0;
                        lowlink[p] = lowlink[p].min(lowlink[v]);
                    }
                    if lowlink[v] == index[v] {
                        let mut scc = Vec::new();
                        loop {
                            let w = stack.pop().expect("tarjan stack holds the scc root");
                            on_stack[w] = false;
                            scc.push(w);
                            if w == v {
                                break;
                            }
                        }
                        scc.reverse();
                        sccs.push(scc);
                    }
                }
            }
        }

        sccs
    }

    /// Reconstruct a concrete closed path through one SCC
    ///
    /// DFS from the first member, following intra-SCC edges, until the walk
    /// returns to the start. Strong connectivity guarantees some visited
    /// node carries an edge back to the start, so the search closes; the
    /// synthetic fallback below is for robustness only.
    fn cycle_for_scc(&self, scc: &[usize]) -> Cycle {
        let members: HashSet<usize> = scc.iter().copied().collect();
        let start = scc[0];

        let mut visited = HashSet::new();
        visited.insert(start);
        let mut path: Vec<usize> = vec![start];
        let mut frames: Vec<(usize, usize)> = vec![(start, 0)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            if frame.1 < self.adjacency[v].len() {
                let w = self.adjacency[v][frame.1];
                frame.1 += 1;
                if w == start && path.len() >= 2 {
                    let mut chain: Vec<PathBuf> =
                        path.iter().map(|&id| self.nodes[id].clone()).collect();
                    chain.push(self.nodes[start].clone());
                    return Cycle::new(chain);
                }
                if members.contains(&w) && !visited.contains(&w) {
                    visited.insert(w);
                    path.push(w);
                    frames.push((w, 0));
                }
            } else {
                frames.pop();
                path.pop();
            }
        }

        let mut chain: Vec<PathBuf> = scc.iter().map(|&id| self.nodes[id].clone()).collect();
        chain.push(self.nodes[scc[0]].clone());
        Cycle::new(chain)
    }

    /// Johnson's elementary-circuit enumeration, bounded by `max_cycles`
    fn johnson(&self, max_cycles: usize) -> Vec<Vec<usize>> {
        let n = self.nodes.len();
        let mut cycles = Vec::new();

        for s in 0..n {
            if cycles.len() >= max_cycles {
                break;
            }
            let mut blocked = vec![false; n];
            let mut block_map: Vec<HashSet<usize>> = vec![HashSet::new(); n];
            let mut path = Vec::new();
            self.circuit(
                s,
                s,
                &mut blocked,
                &mut block_map,
                &mut path,
                &mut cycles,
                max_cycles,
            );
        }

        cycles
    }

    #[allow(clippy::too_many_arguments)]
    fn circuit(
        &self,
        v: usize,
        s: usize,
        blocked: &mut [bool],
        block_map: &mut [HashSet<usize>],
        path: &mut Vec<usize>,
        cycles: &mut Vec<Vec<usize>>,
        max_cycles: usize,
    ) -> bool {
        let mut found = false;
        path.push(v);
        blocked[v] = true;

        for &w in &self.adjacency[v] {
            if cycles.len() >= max_cycles {
                break;
            }
            // Only the subgraph induced by nodes >= s is considered, so
            // each cycle is produced from its least vertex exactly once.
            if w < s {
                continue;
            }
            if w == s {
                cycles.push(path.clone());
                found = true;
            } else if !blocked[w]
                && self.circuit(w, s, blocked, block_map, path, cycles, max_cycles)
            {
                found = true;
            }
        }

        if found {
            self.unblock(v, blocked, block_map);
        } else {
            for &w in &self.adjacency[v] {
                if w >= s {
                    block_map[w].insert(v);
                }
            }
        }

        path.pop();
        found
    }

    fn unblock(&self, v: usize, blocked: &mut [bool], block_map: &mut [HashSet<usize>]) {
        blocked[v] = false;
        let pending: Vec<usize> = block_map[v].drain().collect();
        for w in pending {
            if blocked[w] {
                self.unblock(w, blocked, block_map);
            }
        }
    }
}
