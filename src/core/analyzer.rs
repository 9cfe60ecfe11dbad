//! Analysis pipeline driver
//!
//! Drives discovery, batched parallel import extraction (memoized through
//! the cache), specifier resolution, graph assembly, and cycle detection,
//! returning the full analysis result.

use crate::core::cache::{global_cache, SharedImportCache};
use crate::core::cycles::{find_cycles, find_elementary_cycles};
use crate::core::discovery::FileDiscovery;
use crate::core::parallel::{
    process_in_batches, AnalysisPhase, ProgressCallback, ProgressEvent,
};
use crate::core::suggestions::suggestions_for;
use crate::error::{ErrorSink, Result, TangleError};
use crate::models::analysis::AnalysisResult;
use crate::models::config::Settings;
use crate::models::cycle::CycleReport;
use crate::models::record::ImportRecord;
use crate::parsers::ast_parser::SourceParser;
use crate::utils::hash::content_hash;
use crate::utils::path_resolver::PathResolver;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

/// Which cache an analyzer run writes into
enum CacheScope {
    /// The process-wide instance; repeated runs skip unchanged files
    Shared,
    /// A private instance scoped to this analyzer
    Private(SharedImportCache),
}

/// Main analysis driver
pub struct Analyzer {
    settings: Settings,
    parser: SourceParser,
    cache_scope: CacheScope,
    progress: Option<ProgressCallback>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Analyzer {
    /// Create an analyzer with the given settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            parser: SourceParser::new(),
            cache_scope: CacheScope::Shared,
            progress: None,
            cancel: None,
        }
    }

    /// Use a cache scoped to this analyzer instead of the process-wide one
    pub fn with_private_cache(mut self) -> Self {
        self.cache_scope = CacheScope::Private(SharedImportCache::new());
        self
    }

    /// Install a progress callback
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Install a cancellation token checked between batches
    pub fn with_cancel_token(mut self, token: Arc<AtomicBool>) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The settings this analyzer runs with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn cache(&self) -> &SharedImportCache {
        match &self.cache_scope {
            CacheScope::Shared => global_cache(),
            CacheScope::Private(cache) => cache,
        }
    }

    fn report(&self, event: ProgressEvent) {
        if let Some(callback) = &self.progress {
            callback(event);
        }
    }

    /// Run the full pipeline
    ///
    /// Per-file failures land in the result's error list; only an invalid
    /// root or a cancellation aborts the run.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        let start = Instant::now();

        let root = &self.settings.root;
        if !root.exists() {
            return Err(TangleError::MissingRoot { path: root.clone() });
        }
        if !root.is_dir() {
            return Err(TangleError::RootNotDirectory { path: root.clone() });
        }
        let root = fs::canonicalize(root).map_err(|_| TangleError::MissingRoot {
            path: root.clone(),
        })?;

        self.report(ProgressEvent::phase(AnalysisPhase::Discovering));
        let discovery = FileDiscovery::from_settings(&self.settings)?;
        let files = discovery.discover(&root);

        self.report(ProgressEvent::parsing(0, files.len()));
        let extracted = process_in_batches(
            files.clone(),
            self.settings.concurrency,
            self.cancel.as_deref(),
            |current, total| self.report(ProgressEvent::parsing(current, total)),
            |path| {
                let outcome = self.parse_one(&path);
                (path, outcome)
            },
        )?;

        self.report(ProgressEvent::phase(AnalysisPhase::Analyzing));
        let resolver = PathResolver::from_settings(&root, &self.settings);
        let mut result = AnalysisResult::new(root);

        // Nodes first, in discovery order, so isolated files still appear
        for path in &files {
            result.graph.add_node(path.clone());
        }

        let discovered: HashSet<&PathBuf> = files.iter().collect();
        let mut sink = ErrorSink::new();
        for (path, outcome) in extracted {
            let records = match sink.absorb(&path, outcome)? {
                Some(records) => records,
                None => continue,
            };
            for record in &records {
                if let Some(target) = resolver.resolve(&record.source, &path) {
                    // References to files outside the discovered set
                    // (ignored or unsupported) do not become edges
                    if discovered.contains(&target) {
                        result.graph.add_edge(path.clone(), target);
                    }
                }
            }
        }
        for (file, error) in sink.into_errors() {
            result.add_error(file, &error);
        }

        let cycles = if self.settings.elementary_cycles {
            find_elementary_cycles(&result.graph, self.settings.max_cycles)
        } else {
            find_cycles(&result.graph)
        };
        result.cycles = cycles
            .into_iter()
            .map(|cycle| {
                let suggestions = suggestions_for(&cycle, &result.graph);
                CycleReport { cycle, suggestions }
            })
            .collect();

        result.finalize_stats(self.settings.top_n);
        result.set_duration(start.elapsed());

        Ok(result)
    }

    /// Read, hash, and extract one file, consulting the cache
    fn parse_one(&self, path: &Path) -> Result<Vec<ImportRecord>> {
        let bytes = fs::read(path).map_err(|e| TangleError::unreadable(path, e))?;
        let hash = content_hash(&bytes);

        if self.settings.cache_enabled {
            if let Some(records) = self.cache().get(path, hash) {
                return Ok(records);
            }
        }

        let source_text = String::from_utf8_lossy(&bytes);
        let records = self.parser.extract_file(path, &source_text)?;

        if self.settings.cache_enabled {
            self.cache().put(path, hash, records.clone());
        }

        Ok(records)
    }
}

/// Convenience entry point: analyze `root` with the given settings
pub fn analyze_directory(root: impl Into<PathBuf>, mut settings: Settings) -> Result<AnalysisResult> {
    settings.root = root.into();
    Analyzer::new(settings).analyze()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn settings_for(root: &Path) -> Settings {
        Settings {
            root: root.to_path_buf(),
            ..Settings::default()
        }
    }

    fn analyzer_for(root: &Path) -> Analyzer {
        Analyzer::new(settings_for(root)).with_private_cache()
    }

    #[test]
    fn nonexistent_root_is_fatal() {
        let err = analyzer_for(Path::new("/definitely/not/here")).analyze().unwrap_err();
        assert!(matches!(err, TangleError::MissingRoot { .. }));
    }

    #[test]
    fn file_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.ts");
        fs::write(&file, "export {};").unwrap();

        let err = analyzer_for(&file).analyze().unwrap_err();
        assert!(matches!(err, TangleError::RootNotDirectory { .. }));
    }

    #[test]
    fn builds_edges_from_relative_imports() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.ts"), "import './b';\n").unwrap();
        fs::write(dir.path().join("b.ts"), "export {};\n").unwrap();

        let result = analyzer_for(dir.path()).analyze().unwrap();
        assert_eq!(result.stats.total_files, 2);
        assert_eq!(result.stats.total_dependencies, 1);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn parse_errors_are_collected_not_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.ts"), "import './other';\n").unwrap();
        fs::write(dir.path().join("other.ts"), "export {};\n").unwrap();
        fs::write(dir.path().join("broken.ts"), "import { from ';;;\n").unwrap();

        let result = analyzer_for(dir.path()).analyze().unwrap();
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].file.ends_with("broken.ts"));
        // The broken file is still a node but contributes no edges
        assert_eq!(result.stats.total_files, 3);
        assert_eq!(result.stats.total_dependencies, 1);
    }

    #[test]
    fn unresolved_imports_are_not_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.ts"),
            "import React from 'react';\nimport './missing';\n",
        )
        .unwrap();

        let result = analyzer_for(dir.path()).analyze().unwrap();
        assert!(result.errors.is_empty());
        assert_eq!(result.stats.total_dependencies, 0);
    }

    #[test]
    fn analysis_is_idempotent_modulo_duration() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.ts"), "import './b';\n").unwrap();
        fs::write(dir.path().join("b.ts"), "import './a';\n").unwrap();

        let first = analyzer_for(dir.path()).analyze().unwrap();
        let second = analyzer_for(dir.path()).analyze().unwrap();

        assert_eq!(first.graph, second.graph);
        assert_eq!(first.cycles, second.cycles);
        assert_eq!(first.errors, second.errors);
        assert_eq!(first.stats.total_files, second.stats.total_files);
        assert_eq!(
            first.stats.circular_dependencies,
            second.stats.circular_dependencies
        );
    }

    #[test]
    fn cached_second_run_reuses_extractions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.ts"), "import './b';\n").unwrap();
        fs::write(dir.path().join("b.ts"), "export {};\n").unwrap();

        let analyzer = analyzer_for(dir.path());
        let first = analyzer.analyze().unwrap();
        let second = analyzer.analyze().unwrap();

        assert_eq!(first.stats.total_dependencies, second.stats.total_dependencies);
        let stats = analyzer.cache().stats();
        assert!(stats.hits >= 2, "second run should hit the cache");
    }

    #[test]
    fn cancellation_aborts_with_interrupted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.ts"), "export {};\n").unwrap();

        let token = Arc::new(AtomicBool::new(false));
        token.store(true, Ordering::Relaxed);
        let analyzer = analyzer_for(dir.path()).with_cancel_token(token);

        let err = analyzer.analyze().unwrap_err();
        assert!(matches!(err, TangleError::Interrupted));
    }

    #[test]
    fn progress_reports_all_phases_monotonically() {
        let dir = TempDir::new().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("f{}.ts", i)), "export {};\n").unwrap();
        }

        let events: Arc<Mutex<Vec<ProgressEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let mut settings = settings_for(dir.path());
        settings.concurrency = 2;
        let analyzer = Analyzer::new(settings)
            .with_private_cache()
            .with_progress(Arc::new(move |event| {
                sink.lock().unwrap().push(event);
            }));

        analyzer.analyze().unwrap();

        let events = events.lock().unwrap();
        assert!(matches!(events[0].phase, AnalysisPhase::Discovering));
        assert!(matches!(events.last().unwrap().phase, AnalysisPhase::Analyzing));
        let parsing: Vec<_> = events
            .iter()
            .filter(|e| e.phase == AnalysisPhase::Parsing)
            .collect();
        assert!(parsing.windows(2).all(|w| w[0].current <= w[1].current));
        assert_eq!(parsing.last().unwrap().current, 5);
    }

    #[test]
    fn analyze_directory_convenience() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("only.ts"), "export {};\n").unwrap();

        let result = analyze_directory(dir.path(), Settings::default()).unwrap();
        assert_eq!(result.stats.total_files, 1);
    }
}
