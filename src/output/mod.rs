//! Output formatting for import progress.
//!
//! - [`terminal`] - Progress and abort lines for the terminal

mod terminal;

pub use terminal::{format_abort, format_progress};
