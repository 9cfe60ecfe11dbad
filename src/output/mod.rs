//! Output formatting, progress reporting, and writing

pub mod formatters;
pub mod progress;
pub mod writers;

pub use formatters::{format_csv, format_dot, format_json, format_text};
pub use progress::{create_progress_callback, ProgressReporter};
pub use writers::write_output;
