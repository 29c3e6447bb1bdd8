//! AWS WAF interaction.
//!
//! This module handles all remote operations:
//! - [`cli`] - Command execution for the AWS CLI
//! - [`store`] - The [`IpSetStore`] seam used by the import flow
//! - [`waf`] - WAF IP set calls through the CLI

mod cli;
mod store;
mod waf;

// Re-export public types and functions
pub use cli::run_args;
pub use store::IpSetStore;
pub use waf::AwsCliWaf;
