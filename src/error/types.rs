//! Error types for the analysis pipeline
//!
//! Failures split into two scopes. A file-scoped failure poisons a single
//! source file: the run continues, the file contributes no edges, and the
//! failure is carried in the analysis result. Everything else is fatal to
//! the run and produces no partial result.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Tangle operations
#[derive(Debug, Error)]
pub enum TangleError {
    /// Root path handed to the analyzer does not exist
    #[error("analysis root {path} does not exist")]
    MissingRoot { path: PathBuf },

    /// Root path names a file, not a source tree
    #[error("analysis root {path} is not a directory")]
    RootNotDirectory { path: PathBuf },

    /// An ignore pattern failed to compile
    #[error("ignore pattern is not valid: {source}")]
    BadIgnorePattern {
        #[source]
        source: glob::PatternError,
    },

    /// A settings value is inconsistent or out of range
    #[error("configuration: {message}")]
    Config { message: String },

    /// An explicitly named configuration file is absent
    #[error("no configuration file at {path}")]
    ConfigMissing { path: PathBuf },

    /// A configuration file exists but cannot be read
    #[error("configuration file {path} is unreadable: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML
    #[error("configuration file {path} is not valid TOML: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A discovered source file vanished or became unreadable mid-run
    #[error("{path} cannot be read: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extractor was handed a file outside the extension matrix
    #[error("{path} is not an analyzable source file")]
    UnsupportedFile { path: PathBuf },

    /// The parser rejected a source file
    #[error("{file} failed to parse: {message}")]
    Parse { file: PathBuf, message: String },

    /// The directory for --output-file does not exist
    #[error("report directory {path} does not exist")]
    MissingReportDir { path: PathBuf },

    /// The report file could not be written
    #[error("report could not be written to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report could not be written to stdout
    #[error("report could not be written to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// The report could not be encoded as JSON
    #[error("report could not be encoded as JSON: {source}")]
    JsonEncode {
        #[source]
        source: serde_json::Error,
    },

    /// The report could not be encoded as CSV
    #[error("report could not be encoded as CSV: {source}")]
    CsvEncode {
        #[source]
        source: csv::Error,
    },

    /// Pipeline failures that carry only a message
    #[error("analysis failed: {message}")]
    Analysis { message: String },

    /// Underlying i/o failure with no more specific classification
    #[error("i/o failure: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// A cancellation token was raised between batches
    #[error("analysis interrupted before completion")]
    Interrupted,
}

impl TangleError {
    /// Whether this failure is confined to a single source file
    ///
    /// File-scoped failures are recorded in the result's error list and the
    /// run keeps going; the affected file simply contributes no edges.
    pub fn is_file_scoped(&self) -> bool {
        matches!(
            self,
            TangleError::FileRead { .. }
                | TangleError::UnsupportedFile { .. }
                | TangleError::Parse { .. }
        )
    }

    /// Whether this failure aborts the run with no partial result
    pub fn is_fatal(&self) -> bool {
        !self.is_file_scoped()
    }

    /// A remediation hint for failures the user can act on
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            TangleError::MissingRoot { .. } | TangleError::RootNotDirectory { .. } => {
                Some("point tangle at the directory that holds the source tree")
            }
            TangleError::ConfigMissing { .. } => {
                Some("run `tangle init` to scaffold a configuration file")
            }
            TangleError::BadIgnorePattern { .. } => {
                Some("ignore patterns support `*`, `?`, and literal substrings")
            }
            TangleError::MissingReportDir { .. } => {
                Some("create the directory or pass a different --output-file")
            }
            TangleError::UnsupportedFile { .. } => {
                Some("only the .js/.jsx/.mjs/.cjs and .ts/.tsx/.mts/.cts families are analyzable")
            }
            _ => None,
        }
    }

    /// A configuration error with the given message
    pub fn config(message: impl Into<String>) -> Self {
        TangleError::Config {
            message: message.into(),
        }
    }

    /// A parse failure for one source file
    pub fn parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        TangleError::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// A read failure for one source file
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TangleError::FileRead {
            path: path.into(),
            source,
        }
    }

    /// A file outside the analyzable extension matrix
    pub fn unsupported(path: impl Into<PathBuf>) -> Self {
        TangleError::UnsupportedFile { path: path.into() }
    }

    /// A pipeline failure described only by a message
    pub fn analysis(message: impl Into<String>) -> Self {
        TangleError::Analysis {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for TangleError {
    fn from(source: std::io::Error) -> Self {
        TangleError::Io { source }
    }
}

impl From<glob::PatternError> for TangleError {
    fn from(source: glob::PatternError) -> Self {
        TangleError::BadIgnorePattern { source }
    }
}

impl From<serde_json::Error> for TangleError {
    fn from(source: serde_json::Error) -> Self {
        TangleError::JsonEncode { source }
    }
}

impl From<csv::Error> for TangleError {
    fn from(source: csv::Error) -> Self {
        TangleError::CsvEncode { source }
    }
}

/// Result type alias for Tangle operations
pub type Result<T> = std::result::Result<T, TangleError>;
