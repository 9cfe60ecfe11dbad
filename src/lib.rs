//! Tangle - a circular dependency analyzer for JavaScript/TypeScript trees
//!
//! This library discovers source files under a root directory, extracts
//! their outbound module references, resolves those references to files in
//! the same tree, assembles a file-level dependency graph, and reports every
//! strongly connected component as a concrete cycle with refactoring
//! suggestions.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{analyze_directory, Analyzer};
pub use error::{ErrorSink, Result, TangleError};
pub use models::{
    analysis::{AnalysisResult, AnalysisStats},
    config::Settings,
    cycle::{Cycle, CycleReport, Suggestion, SuggestionType},
    graph::DependencyGraph,
    record::{ImportKind, ImportRecord, Language},
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
