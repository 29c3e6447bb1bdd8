//! Terminal output utilities.
//!
//! Provides the progress and status lines printed during an import.

use colored::Colorize;

/// Progress line after a batch, using zero-based inclusive positions.
///
/// # Arguments
/// * `first` - Position of the first network in the batch
/// * `last` - Position of the last network in the batch
/// * `total` - Number of networks being uploaded
pub fn format_progress(first: usize, last: usize, total: usize) -> String {
    format!("Added networks {first} to {last} out of {total}.")
}

/// Message printed when the requested IP set name is taken.
pub fn format_abort(message: &str) -> String {
    format!("{} {message}", "ABORT".on_red())
}
