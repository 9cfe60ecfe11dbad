//! Refactoring suggestion generation
//!
//! Maps cycle shape onto a catalog of recommendations and picks a "weakest
//! edge" as the place to start cutting. The heuristics are intentionally
//! coarse: they nudge toward a plausible first edge rather than guarantee an
//! optimal one.

use crate::models::cycle::{Cycle, Suggestion, SuggestionType};
use crate::models::graph::DependencyGraph;
use std::cmp::Reverse;
use std::path::{Path, PathBuf};

/// Path fragments that usually mark type-only modules
const TYPE_PATH_MARKERS: [&str; 4] = ["types", ".d.ts", "interfaces", "models"];

/// Generate the suggestion list for one cycle
pub fn suggestions_for(cycle: &Cycle, graph: &DependencyGraph) -> Vec<Suggestion> {
    if cycle.length == 1 {
        let node = cycle.chain[0].clone();
        return vec![Suggestion::targeting(
            SuggestionType::ReorderImports,
            "File imports itself; remove the self-referential import",
            node.clone(),
            node,
        )];
    }

    let mut suggestions = Vec::new();
    let (weak_from, weak_to) = weakest_edge(cycle, graph);

    suggestions.push(Suggestion::targeting(
        SuggestionType::ExtractInterface,
        format!(
            "Extract the declarations that '{}' needs from '{}' into a shared module both can depend on",
            display_name(&weak_from),
            display_name(&weak_to),
        ),
        weak_from.clone(),
        weak_to.clone(),
    ));

    if cycle.length == 2 {
        suggestions.push(Suggestion::new(
            SuggestionType::MergeFiles,
            format!(
                "'{}' and '{}' are mutually dependent; if they form one concept, merge them into a single module",
                display_name(&cycle.chain[0]),
                display_name(&cycle.chain[1]),
            ),
        ));
    } else {
        suggestions.push(Suggestion::new(
            SuggestionType::DependencyInjection,
            "Break the cycle by passing one dependency in at call time instead of importing it",
        ));
    }

    suggestions.push(Suggestion::targeting(
        SuggestionType::LazyImport,
        format!(
            "Defer loading '{}' with a dynamic import so the modules can initialize independently",
            display_name(&weak_to),
        ),
        weak_from,
        weak_to,
    ));

    if cycle.length >= 4 {
        suggestions.push(Suggestion::new(
            SuggestionType::ReorderImports,
            format!(
                "A cycle through {} files usually signals a layering problem; review the module boundaries along this chain",
                cycle.length,
            ),
        ));
    }

    suggestions
}

/// Pick the cycle edge that looks cheapest to break
///
/// Edges into type-looking targets are preferred, then edges whose source
/// has the smallest dependency footprint. Ties resolve in cycle order.
fn weakest_edge(cycle: &Cycle, graph: &DependencyGraph) -> (PathBuf, PathBuf) {
    let edges = cycle.edges();
    edges
        .iter()
        .enumerate()
        .min_by_key(|(position, (from, to))| {
            let strength: usize = if graph.outgoing(from).is_empty() { 0 } else { 1 };
            (Reverse(likely_type_import(to)), strength, *position)
        })
        .map(|(_, edge)| edge.clone())
        .unwrap_or_else(|| (cycle.chain[0].clone(), cycle.chain[0].clone()))
}

fn likely_type_import(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    TYPE_PATH_MARKERS
        .iter()
        .any(|marker| path_str.contains(marker))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown")
        .to_string()
}
