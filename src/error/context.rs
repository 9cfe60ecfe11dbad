//! Error recovery for the analysis pipeline
//!
//! Batch workers produce one outcome per source file. The sink folds those
//! outcomes into the run: values pass through, file-scoped failures are
//! recorded so the report can show them, and fatal errors bubble out
//! untouched so the run aborts with no partial result.

use crate::error::types::{Result, TangleError};
use std::path::{Path, PathBuf};

/// Collects file-scoped failures while letting fatal errors through
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: Vec<(PathBuf, TangleError)>,
}

impl ErrorSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's outcome into the sink
    ///
    /// Returns the value for a success, `None` after recording a
    /// file-scoped failure against `file`, and re-raises fatal errors
    /// without recording them.
    pub fn absorb<T>(&mut self, file: &Path, outcome: Result<T>) -> Result<Option<T>> {
        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.is_file_scoped() => {
                self.errors.push((file.to_path_buf(), error));
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Number of files that failed so far
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether every file absorbed so far succeeded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The recorded failures, in absorption order
    pub fn into_errors(self) -> Vec<(PathBuf, TangleError)> {
        self.errors
    }
}
