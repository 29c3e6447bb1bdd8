//! Error type shared by the import pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Every way an import run can abort.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Input line is not a valid IPv4 network in CIDR notation.
    #[error("Invalid CIDR '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Target prefix length outside 0..=32.
    #[error("Invalid prefix length /{0}, must be between 0 and 32")]
    InvalidPrefix(u8),

    #[error("Invalid batch size {0}, must be greater than 0")]
    InvalidBatchSize(usize),

    /// An IP set with this name already exists remotely.
    #[error("IP set \"{0}\" already exists - import aborted.")]
    DuplicateIpSet(String),

    #[error("Remote call {operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    #[error("Error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ImportError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        ImportError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn remote(operation: &'static str, message: impl ToString) -> Self {
        ImportError::Remote {
            operation,
            message: message.to_string(),
        }
    }
}
