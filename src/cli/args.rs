//! Command-line argument parsing

use crate::error::{Result, TangleError};
use crate::models::config::{OutputFormat, PartialSettings};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::path::PathBuf;

/// Tangle - circular dependency analyzer for JavaScript/TypeScript trees
#[derive(Parser, Debug)]
#[command(name = "tangle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find and break circular dependencies in JavaScript/TypeScript source trees")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Analyze the current directory
    tangle analyze .

    # Analyze a specific directory
    tangle analyze ./my-project

    # Exclude paths (can specify multiple patterns)
    tangle analyze . --ignore '*.test.ts' --ignore fixtures

Output Options:
    # Emit the JSON report
    tangle analyze . --output json

    # Write a Graphviz graph of the dependency structure
    tangle analyze . --output dot --output-file deps.dot

Resolution Options:
    # tsconfig-style path alias
    tangle analyze . --alias '@/*=src/*' --base-url .

Configuration:
    # Create a default configuration file
    tangle init

    # Use a specific configuration file
    tangle analyze . --config ./tangle.toml
")]
pub struct Args {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Analyze a source tree for circular dependencies
    Analyze(AnalyzeArgs),
    /// Create a default .tangle.toml configuration file
    Init,
}

/// Arguments for the analyze subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Root directory to analyze
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormatArg,

    /// Glob patterns for paths to exclude (repeatable)
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// File to write output to (stdout if not specified)
    #[arg(long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Path alias, tsconfig-style: PATTERN=TARGET[,TARGET...] (repeatable)
    #[arg(long, value_name = "PATTERN=TARGET")]
    pub alias: Vec<String>,

    /// Base directory for alias and bare-specifier resolution
    #[arg(long, value_name = "DIR")]
    pub base_url: Option<PathBuf>,

    /// Number of files parsed in flight per batch
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Disable the import extraction cache
    #[arg(long)]
    pub no_cache: bool,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_colors: bool,

    /// Follow symbolic links during traversal
    #[arg(long)]
    pub follow_links: bool,

    /// Enumerate elementary cycles instead of one per component
    #[arg(long)]
    pub elementary_cycles: bool,

    /// Upper bound on enumerated elementary cycles
    #[arg(long, value_name = "N")]
    pub max_cycles: Option<usize>,

    /// Size of the top-dependencies and top-dependents lists
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (defaults to .tangle.toml lookup)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
    /// Graphviz DOT output
    Dot,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Dot => OutputFormat::Dot,
        }
    }
}

impl AnalyzeArgs {
    /// Translate parsed flags into a partial settings layer
    pub fn to_partial(&self) -> Result<PartialSettings> {
        let mut partial = PartialSettings::default();

        partial.root = Some(self.path.clone());
        partial.output_format = Some(self.output.into());

        if !self.ignore.is_empty() {
            partial.ignore_patterns = Some(self.ignore.clone());
        }
        if let Some(output_file) = &self.output_file {
            partial.output_file = Some(output_file.clone());
        }
        if !self.alias.is_empty() {
            let mut aliases = HashMap::new();
            for raw in &self.alias {
                let (pattern, targets) = parse_alias(raw)?;
                aliases.insert(pattern, targets);
            }
            partial.aliases = Some(aliases);
        }
        if let Some(base_url) = &self.base_url {
            partial.base_url = Some(base_url.clone());
        }
        if let Some(concurrency) = self.concurrency {
            partial.concurrency = Some(concurrency);
        }
        if self.no_cache {
            partial.cache_enabled = Some(false);
        }
        if self.no_progress {
            partial.show_progress = Some(false);
        }
        if self.no_colors {
            partial.use_colors = Some(false);
        }
        if self.follow_links {
            partial.follow_symlinks = Some(true);
        }
        if self.elementary_cycles {
            partial.elementary_cycles = Some(true);
        }
        if let Some(max_cycles) = self.max_cycles {
            partial.max_cycles = Some(max_cycles);
        }
        if let Some(top) = self.top {
            partial.top_n = Some(top);
        }
        if self.quiet {
            partial.quiet = Some(true);
        }
        if self.verbose {
            partial.verbose = Some(true);
        }

        Ok(partial)
    }
}

/// Parse one `--alias PATTERN=TARGET[,TARGET...]` value
fn parse_alias(raw: &str) -> Result<(String, Vec<String>)> {
    let (pattern, targets) = raw.split_once('=').ok_or_else(|| {
        TangleError::config(format!(
            "Invalid alias '{}': expected PATTERN=TARGET[,TARGET...]",
            raw
        ))
    })?;

    let targets: Vec<String> = targets
        .split(',')
        .map(|target| target.trim().to_string())
        .filter(|target| !target.is_empty())
        .collect();

    if pattern.is_empty() || targets.is_empty() {
        return Err(TangleError::config(format!(
            "Invalid alias '{}': pattern and target must be non-empty",
            raw
        )));
    }

    Ok((pattern.to_string(), targets))
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
