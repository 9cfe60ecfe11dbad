//! Core analysis pipeline

pub mod analyzer;
pub mod cache;
pub mod cycles;
pub mod discovery;
pub mod parallel;
pub mod suggestions;

pub use analyzer::{analyze_directory, Analyzer};
pub use cache::{global_cache, CacheStats, ImportCache, SharedImportCache};
pub use cycles::{find_cycles, find_elementary_cycles};
pub use discovery::{FileDiscovery, IgnoreMatcher};
pub use parallel::{AnalysisPhase, ProgressCallback, ProgressEvent};
pub use suggestions::suggestions_for;
