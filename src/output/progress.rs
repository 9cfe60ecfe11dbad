//! Progress reporting
//!
//! Bridges engine progress events onto indicatif bars, honoring quiet and
//! verbose modes. Bars draw on stderr so machine-readable stdout output
//! stays clean.

use crate::core::parallel::{AnalysisPhase, ProgressCallback, ProgressEvent};
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Progress reporter for long-running analysis runs
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            bar: Mutex::new(None),
        }
    }

    /// React to one engine progress event
    pub fn handle(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        match event.phase {
            AnalysisPhase::Discovering => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {msg}")
                        .unwrap(),
                );
                spinner.set_message("Discovering source files...");
                spinner.enable_steady_tick(Duration::from_millis(100));
                *self.bar.lock() = Some(spinner);
                if self.verbose {
                    eprintln!("Discovering source files...");
                }
            }
            AnalysisPhase::Parsing => {
                let mut guard = self.bar.lock();
                if event.current == 0 {
                    if let Some(old) = guard.take() {
                        old.finish_and_clear();
                    }
                    let bar = ProgressBar::new(event.total as u64);
                    bar.set_style(
                        ProgressStyle::default_bar()
                            .template(
                                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                            )
                            .unwrap()
                            .progress_chars("#>-"),
                    );
                    bar.set_message("Parsing");
                    *guard = Some(bar);
                }
                if let Some(bar) = guard.as_ref() {
                    bar.set_length(event.total as u64);
                    bar.set_position(event.current as u64);
                }
                if self.verbose && event.current > 0 {
                    eprintln!("[{}/{}] parsed", event.current, event.total);
                }
            }
            AnalysisPhase::Analyzing => {
                let mut guard = self.bar.lock();
                if let Some(bar) = guard.take() {
                    bar.finish_and_clear();
                }
                if self.verbose {
                    eprintln!("Analyzing dependency graph...");
                }
            }
        }
    }

    /// Tear down any remaining bar with a closing message
    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }
        if let Some(bar) = self.bar.lock().take() {
            bar.finish_with_message(message.to_string());
        }
        if self.verbose {
            eprintln!("{}", message);
        }
    }

    /// Print a message (respects quiet mode)
    pub fn print(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Print a verbose message (only in verbose mode)
    pub fn print_verbose(&self, message: &str) {
        if self.verbose {
            println!("{}", message);
        }
    }

    /// Print a warning message (always printed, even in quiet mode)
    pub fn print_warning(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    /// Print an error message (always printed, even in quiet mode)
    pub fn print_error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Create a progress callback that feeds a ProgressReporter
pub fn create_progress_callback(reporter: Arc<ProgressReporter>) -> ProgressCallback {
    Arc::new(move |event: ProgressEvent| {
        reporter.handle(event);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_reporter_creates_no_bars() {
        let reporter = ProgressReporter::new(true, false);
        reporter.handle(ProgressEvent::phase(AnalysisPhase::Discovering));
        assert!(reporter.bar.lock().is_none());
        assert!(reporter.is_quiet());
    }

    #[test]
    fn parsing_phase_swaps_spinner_for_bar() {
        let reporter = ProgressReporter::new(false, false);
        reporter.handle(ProgressEvent::phase(AnalysisPhase::Discovering));
        reporter.handle(ProgressEvent::parsing(0, 10));
        {
            let guard = reporter.bar.lock();
            let bar = guard.as_ref().unwrap();
            assert_eq!(bar.length(), Some(10));
        }
        reporter.handle(ProgressEvent::parsing(5, 10));
        assert_eq!(reporter.bar.lock().as_ref().unwrap().position(), 5);

        reporter.handle(ProgressEvent::phase(AnalysisPhase::Analyzing));
        assert!(reporter.bar.lock().is_none());
    }

    #[test]
    fn callback_feeds_reporter() {
        let reporter = Arc::new(ProgressReporter::new(false, false));
        let callback = create_progress_callback(reporter.clone());
        callback(ProgressEvent::parsing(0, 3));
        assert!(reporter.bar.lock().is_some());
    }
}
