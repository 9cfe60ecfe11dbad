//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Default directory names that are never descended into
pub const DEFAULT_IGNORED_DIRS: [&str; 7] = [
    "node_modules",
    "dist",
    "build",
    ".git",
    "coverage",
    ".next",
    ".nuxt",
];

/// Default analyzable extensions, in resolver probe order
pub const DEFAULT_EXTENSIONS: [&str; 8] = ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Main configuration settings for Tangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory to analyze
    pub root: PathBuf,

    /// Allowed file extensions, lowercased, without the dot; the declared
    /// order is also the resolver's probe order
    pub extensions: Vec<String>,

    /// Directory names skipped without descending
    pub ignore_dirs: Vec<String>,

    /// Glob patterns for paths to exclude
    pub ignore_patterns: Vec<String>,

    /// Whether to follow symbolic links during traversal
    pub follow_symlinks: bool,

    /// Path alias table: pattern -> replacement templates
    pub aliases: HashMap<String, Vec<String>>,

    /// Base directory for alias and bare-specifier resolution
    pub base_url: Option<PathBuf>,

    /// Number of files parsed in flight per batch
    pub concurrency: usize,

    /// Whether to reuse extracted imports for unchanged files
    pub cache_enabled: bool,

    /// Whether to enumerate elementary cycles instead of one path per SCC
    pub elementary_cycles: bool,

    /// Upper bound on enumerated elementary cycles
    pub max_cycles: usize,

    /// Size of the top-dependencies / top-dependents lists
    pub top_n: usize,

    /// Output format (text, json, csv, dot)
    pub output_format: OutputFormat,

    /// Output file path (stdout if not specified)
    pub output_file: Option<PathBuf>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignore_dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            ignore_patterns: Vec::new(),
            follow_symlinks: false,
            aliases: HashMap::new(),
            base_url: None,
            concurrency: 50,
            cache_enabled: true,
            elementary_cycles: false,
            max_cycles: 1000,
            top_n: 5,
            output_format: OutputFormat::Text,
            output_file: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
    /// Graphviz DOT output for visualization
    Dot,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "dot" => Ok(OutputFormat::Dot),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub root: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub ignore_dirs: Option<Vec<String>>,
    pub ignore_patterns: Option<Vec<String>>,
    pub follow_symlinks: Option<bool>,
    pub aliases: Option<HashMap<String, Vec<String>>>,
    pub base_url: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub cache_enabled: Option<bool>,
    pub elementary_cycles: Option<bool>,
    pub max_cycles: Option<usize>,
    pub top_n: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    ///
    /// Fields from `other` take precedence over existing fields.
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.extensions.is_some() {
            self.extensions = other.extensions;
        }
        if other.ignore_dirs.is_some() {
            self.ignore_dirs = other.ignore_dirs;
        }
        if other.ignore_patterns.is_some() {
            self.ignore_patterns = other.ignore_patterns;
        }
        if other.follow_symlinks.is_some() {
            self.follow_symlinks = other.follow_symlinks;
        }
        if other.aliases.is_some() {
            self.aliases = other.aliases;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.concurrency.is_some() {
            self.concurrency = other.concurrency;
        }
        if other.cache_enabled.is_some() {
            self.cache_enabled = other.cache_enabled;
        }
        if other.elementary_cycles.is_some() {
            self.elementary_cycles = other.elementary_cycles;
        }
        if other.max_cycles.is_some() {
            self.max_cycles = other.max_cycles;
        }
        if other.top_n.is_some() {
            self.top_n = other.top_n;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    ///
    /// Uses defaults for any fields that are None.
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(root) = &self.root {
            settings.root = root.clone();
        }
        if let Some(extensions) = &self.extensions {
            settings.extensions = extensions.clone();
        }
        if let Some(ignore_dirs) = &self.ignore_dirs {
            settings.ignore_dirs = ignore_dirs.clone();
        }
        if let Some(ignore_patterns) = &self.ignore_patterns {
            settings.ignore_patterns = ignore_patterns.clone();
        }
        if let Some(follow_symlinks) = self.follow_symlinks {
            settings.follow_symlinks = follow_symlinks;
        }
        if let Some(aliases) = &self.aliases {
            settings.aliases = aliases.clone();
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url = Some(base_url.clone());
        }
        if let Some(concurrency) = self.concurrency {
            settings.concurrency = concurrency;
        }
        if let Some(cache_enabled) = self.cache_enabled {
            settings.cache_enabled = cache_enabled;
        }
        if let Some(elementary_cycles) = self.elementary_cycles {
            settings.elementary_cycles = elementary_cycles;
        }
        if let Some(max_cycles) = self.max_cycles {
            settings.max_cycles = max_cycles;
        }
        if let Some(top_n) = self.top_n {
            settings.top_n = top_n;
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
