//! Analysis result structures

use crate::error::TangleError;
use crate::models::cycle::CycleReport;
use crate::models::graph::DependencyGraph;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// A per-file failure captured during the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub file: PathBuf,
    pub error: String,
}

/// Summary statistics over one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Number of files discovered and analyzed
    pub total_files: usize,
    /// Number of resolved dependency edges
    pub total_dependencies: usize,
    /// Number of reported cycles (SCCs plus self-loops)
    pub circular_dependencies: usize,
    /// Files with the most outgoing dependencies
    pub top_dependencies: Vec<(PathBuf, usize)>,
    /// Files with the most dependents
    pub top_dependents: Vec<(PathBuf, usize)>,
    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

/// The value returned to callers of the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The analyzed root directory (canonicalized)
    pub root: PathBuf,
    /// Snapshot of the assembled dependency graph
    pub graph: DependencyGraph,
    /// Detected cycles with their suggestions
    pub cycles: Vec<CycleReport>,
    /// Per-file errors; these files contributed no edges
    pub errors: Vec<FileError>,
    /// Summary statistics
    pub stats: AnalysisStats,
    /// When the analysis ran
    pub analysis_date: chrono::DateTime<chrono::Utc>,
}

impl AnalysisResult {
    /// Create an empty result for the given root
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            graph: DependencyGraph::new(),
            cycles: Vec::new(),
            errors: Vec::new(),
            stats: AnalysisStats::default(),
            analysis_date: chrono::Utc::now(),
        }
    }

    /// Record a per-file error
    pub fn add_error(&mut self, file: PathBuf, error: &TangleError) {
        self.errors.push(FileError {
            file,
            error: error.to_string(),
        });
    }

    /// Stamp the wall-clock duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.stats.duration_ms = duration.as_millis() as u64;
    }

    /// Whether the analyzed tree is cycle-free
    pub fn is_clean(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Recompute the summary from the graph and cycle list
    pub fn finalize_stats(&mut self, top_n: usize) {
        self.stats.total_files = self.graph.node_count();
        self.stats.total_dependencies = self.graph.edge_count();
        self.stats.circular_dependencies = self.cycles.len();
        self.stats.top_dependencies = self.graph.top_k_by_outgoing(top_n);
        self.stats.top_dependents = self.graph.top_k_by_incoming(top_n);
    }
}
