//! Data models for Tangle

pub mod analysis;
pub mod config;
pub mod cycle;
pub mod graph;
pub mod record;

pub use analysis::{AnalysisResult, AnalysisStats, FileError};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use cycle::{Cycle, CycleReport, Suggestion, SuggestionType};
pub use graph::{DependencyGraph, GraphNode};
pub use record::{ImportKind, ImportRecord, Language};
