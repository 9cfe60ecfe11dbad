//! Command implementations

use super::args::{AnalyzeArgs, Args, CliCommand};
use crate::config::{create_default_config, load_config, CliConfig, ConfigSource};
use crate::core::Analyzer;
use crate::error::{Result, TangleError};
use crate::models::config::OutputFormat;
use crate::output::{
    create_progress_callback, format_csv, format_dot, format_json, format_text, write_output,
    ProgressReporter,
};
use std::sync::Arc;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Analyze a source tree for circular dependencies
    Analyze(AnalyzeArgs),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        match args.command {
            CliCommand::Analyze(analyze) => Command::Analyze(analyze),
            CliCommand::Init => Command::Init,
        }
    }

    /// Execute the command
    ///
    /// Returns whether the run found a cycle-free tree; `Init` always
    /// reports clean.
    pub fn execute(&self) -> Result<bool> {
        match self {
            Command::Analyze(args) => {
                // Validate the config file early so the error names it
                if let Some(config_path) = &args.config {
                    if !config_path.exists() {
                        return Err(TangleError::ConfigMissing {
                            path: config_path.clone(),
                        });
                    }
                }

                let cli_config = CliConfig::new(args.to_partial()?);
                let settings = load_config(cli_config.load()?, args.config.as_deref())?;

                let reporter = Arc::new(ProgressReporter::new(settings.quiet, settings.verbose));
                if !settings.quiet {
                    reporter.print(&format!(
                        "tangle v{} - analyzing {}",
                        env!("CARGO_PKG_VERSION"),
                        settings.root.display()
                    ));
                    if settings.verbose {
                        reporter.print_verbose(&format!("Settings: {:#?}", settings));
                    }
                }

                let mut analyzer = Analyzer::new(settings.clone());
                if settings.show_progress && !settings.quiet {
                    analyzer = analyzer.with_progress(create_progress_callback(reporter.clone()));
                }

                let result = analyzer.analyze()?;
                reporter.finish(&format!(
                    "Analyzed {} files in {}ms",
                    result.stats.total_files, result.stats.duration_ms
                ));

                let rendered = match settings.output_format {
                    OutputFormat::Text => {
                        format_text(&result, settings.use_colors, settings.verbose)
                    }
                    OutputFormat::Json => format_json(&result)?,
                    OutputFormat::Csv => format_csv(&result)?,
                    OutputFormat::Dot => format_dot(&result),
                };
                write_output(&rendered, settings.output_file.as_deref())?;

                Ok(result.is_clean())
            }
            Command::Init => {
                let config_path = std::path::PathBuf::from(".tangle.toml");

                if config_path.exists() {
                    println!(
                        "Configuration file already exists at: {}",
                        config_path.display()
                    );
                    println!("To overwrite it, delete the file first and run this command again.");
                    return Ok(true);
                }

                create_default_config(&config_path)?;

                println!(
                    "Created default configuration file at: {}",
                    config_path.display()
                );
                println!("Edit it to configure ignore patterns, aliases, and output defaults.");

                Ok(true)
            }
        }
    }

    /// Run the command and map the outcome onto an exit code
    ///
    /// Exit code 0 only when the analysis succeeded and found no cycles.
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(true) => 0,
            Ok(false) => 1,
            Err(err) => {
                eprintln!("tangle: {}", err);
                if let Some(hint) = err.hint() {
                    eprintln!("  hint: {}", hint);
                }
                1
            }
        }
    }
}
