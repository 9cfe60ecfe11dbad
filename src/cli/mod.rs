//! Command-line interface

pub mod args;
pub mod commands;

pub use args::{AnalyzeArgs, Args, CliCommand, OutputFormatArg};
pub use commands::Command;
