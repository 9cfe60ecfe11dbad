//! Cycle and suggestion data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A representative traversal of an SCC or a self-loop
///
/// `chain` is closed: the first and last entries are the same node. A
/// self-loop is `[p, p]`. Every adjacent pair in the chain is a real edge in
/// the graph it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// Closed node path through the cycle
    pub chain: Vec<PathBuf>,
    /// Number of distinct nodes in the cycle
    pub length: usize,
}

impl Cycle {
    /// Build a cycle from a closed chain
    pub fn new(chain: Vec<PathBuf>) -> Self {
        let length = chain.len().saturating_sub(1).max(1);
        Self { chain, length }
    }

    /// Build a length-1 cycle for a node with an edge to itself
    pub fn self_loop(path: PathBuf) -> Self {
        Self {
            chain: vec![path.clone(), path],
            length: 1,
        }
    }

    /// The edges walked by this cycle, as `(from, to)` pairs
    pub fn edges(&self) -> Vec<(PathBuf, PathBuf)> {
        self.chain
            .windows(2)
            .map(|w| (w[0].clone(), w[1].clone()))
            .collect()
    }

    /// Whether two chains describe the same cycle up to rotation
    pub fn same_rotation_class(&self, other: &Cycle) -> bool {
        if self.length != other.length {
            return false;
        }
        let a = &self.chain[..self.length];
        let b = &other.chain[..other.length];
        (0..a.len()).any(|shift| (0..a.len()).all(|i| a[(i + shift) % a.len()] == b[i]))
    }
}

/// Catalog of refactorings that can break a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionType {
    ExtractInterface,
    DependencyInjection,
    LazyImport,
    MergeFiles,
    ReorderImports,
}

impl fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SuggestionType::ExtractInterface => "extract-interface",
            SuggestionType::DependencyInjection => "dependency-injection",
            SuggestionType::LazyImport => "lazy-import",
            SuggestionType::MergeFiles => "merge-files",
            SuggestionType::ReorderImports => "reorder-imports",
        };
        write!(f, "{}", name)
    }
}

/// Actionable guidance for breaking one cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Which refactoring to apply
    pub kind: SuggestionType,
    /// Human-readable explanation
    pub description: String,
    /// The edge the suggestion proposes to alter, when one is singled out
    pub target_edge: Option<(PathBuf, PathBuf)>,
}

impl Suggestion {
    /// Create a suggestion without a target edge
    pub fn new(kind: SuggestionType, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            target_edge: None,
        }
    }

    /// Create a suggestion aimed at a specific edge
    pub fn targeting(
        kind: SuggestionType,
        description: impl Into<String>,
        from: PathBuf,
        to: PathBuf,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            target_edge: Some((from, to)),
        }
    }
}

/// One detected cycle together with its suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle: Cycle,
    pub suggestions: Vec<Suggestion>,
}
