//! Network list processing logic.
//!
//! This module contains the business logic of an import:
//! - [`normalize`] - Normalizing CIDR blocks to one prefix length
//! - [`upload`] - Batched insertion into a remote IP set

mod normalize;
mod upload;

// Re-export public functions
pub use normalize::{minimize_blocks, minimize_network_list};
pub use upload::{upload_ip_set, UploadSummary, DEFAULT_BATCH_SIZE};
