//! AST parser wrapper using OXC

use crate::error::{Result, TangleError};
use crate::models::record::{ImportRecord, Language};
use crate::parsers::import_extractor::extract_imports;
use oxc_allocator::Allocator;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

/// Join parser diagnostics into one per-file message
fn join_diagnostics(errors: &[OxcDiagnostic]) -> String {
    errors
        .iter()
        .map(|diagnostic| format!("{}", diagnostic))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Thread-safe allocator pool for reuse across parses
///
/// `Allocator` is `Send` but not `Sync`, so the pool hands out owned
/// allocators from behind a mutex.
pub struct AllocatorPool {
    allocators: Arc<Mutex<Vec<Allocator>>>,
}

impl AllocatorPool {
    /// Create a new allocator pool
    pub fn new(size: usize) -> Self {
        let mut allocators = Vec::with_capacity(size);
        for _ in 0..size {
            allocators.push(Allocator::default());
        }
        Self {
            allocators: Arc::new(Mutex::new(allocators)),
        }
    }

    /// Take an allocator from the pool
    pub fn take(&self) -> Option<Allocator> {
        self.allocators.lock().pop()
    }

    /// Return an allocator to the pool
    pub fn return_allocator(&self, allocator: Allocator) {
        self.allocators.lock().push(allocator);
    }
}

/// Source parser producing import records
///
/// Parsing and extraction happen in one step so no AST outlives its
/// allocator.
pub struct SourceParser {
    parse_options: ParseOptions,
    allocator_pool: AllocatorPool,
}

impl SourceParser {
    /// Create a new source parser
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions {
                parse_regular_expression: true,
                ..ParseOptions::default()
            },
            allocator_pool: AllocatorPool::new(num_cpus::get()),
        }
    }

    /// Parse a file's contents and extract its import records
    ///
    /// The language is derived from the path's extension; anything outside
    /// the matrix fails with an unsupported-file error.
    pub fn extract_file(&self, path: &Path, source_text: &str) -> Result<Vec<ImportRecord>> {
        let language = Language::from_path(path)?;
        self.extract_source(source_text, language)
            .map_err(|message| TangleError::parse(path, message))
    }

    /// Parse source text under an explicit language selector
    ///
    /// On parse failure the joined diagnostics are returned; the caller
    /// attaches file context.
    pub fn extract_source(
        &self,
        source_text: &str,
        language: Language,
    ) -> std::result::Result<Vec<ImportRecord>, String> {
        let mut allocator = self
            .allocator_pool
            .take()
            .unwrap_or_else(Allocator::default);

        let result = {
            let ret = Parser::new(&allocator, source_text, language.source_type())
                .with_options(self.parse_options.clone())
                .parse();

            if ret.panicked || !ret.errors.is_empty() {
                let message = join_diagnostics(&ret.errors);
                Err(if message.is_empty() {
                    "parser panicked".to_string()
                } else {
                    message
                })
            } else {
                Ok(extract_imports(&ret.program, source_text))
            }
        };

        // Reclaim the arena before the allocator goes back in the pool
        allocator.reset();
        self.allocator_pool.return_allocator(allocator);

        result
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}
