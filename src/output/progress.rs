//! Progress reporting
//!
//! Bars and messages go to stderr so a report written to stdout stays clean.

use crate::core::parallel::ProgressUpdate;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use parking_lot::Mutex;
use std::sync::Arc;

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    multi_progress: MultiProgress,
    main_progress_bar: Option<ProgressBar>,
    current_operation: Mutex<String>,
}

impl ProgressReporter {
    /// Create a new progress reporter; `quiet` disables every bar
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());

        let main_progress_bar = if quiet {
            None
        } else {
            let bar = multi_progress.add(ProgressBar::new(0));
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(bar)
        };

        Self {
            quiet,
            verbose,
            multi_progress,
            main_progress_bar,
            current_operation: Mutex::new(String::new()),
        }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
            bar.set_message(operation.to_string());
        }
        *self.current_operation.lock() = operation.to_string();

        if self.verbose {
            self.print_verbose(&format!("Starting: {}", operation));
        }
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);

            let mut current_operation = self.current_operation.lock();
            if message != *current_operation {
                bar.set_message(message.to_string());
                *current_operation = message.to_string();
            }
        }
    }

    /// Update progress from a ProgressUpdate
    pub fn update_from(&self, progress: ProgressUpdate) {
        self.update(progress.current, progress.total, &progress.message);
    }

    /// Finish the progress operation
    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.finish_with_message(message.to_string());
        }

        if self.verbose {
            self.print_verbose(&format!("Finished: {}", message));
        }
    }

    /// Print a verbose message (only in verbose mode)
    fn print_verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            let _ = self.multi_progress.println(message);
        }
    }
}

/// Create a progress callback function that updates a ProgressReporter
pub fn create_progress_callback(reporter: Arc<ProgressReporter>) -> impl Fn(ProgressUpdate) + Send + Sync {
    move |progress: ProgressUpdate| {
        reporter.update_from(progress);
    }
}
