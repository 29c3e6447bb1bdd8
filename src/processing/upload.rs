//! Batched upload of a normalized network set into an IP set.

use crate::aws::IpSetStore;
use crate::error::ImportError;
use crate::models::{IpSetHandle, IpSetUpdate, NormalizedSet};
use crate::output::format_progress;

/// Default number of updates per `update-ip-set` call.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Outcome of a successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    pub batches: usize,
    pub uploaded: usize,
}

/// Insert every block of `blocks` into `ip_set`, `batch_size` at a time.
///
/// Batches go out in ascending address order, each with a freshly fetched
/// change token. The first failing call aborts the upload; batches already
/// applied stay in the IP set.
///
/// # Arguments
/// * `store` - The remote IP set store
/// * `ip_set` - Handle of the IP set to fill
/// * `blocks` - Normalized networks to insert
/// * `batch_size` - Maximum updates per call (must be > 0)
pub fn upload_ip_set<S: IpSetStore + ?Sized>(
    store: &mut S,
    ip_set: &IpSetHandle,
    blocks: &NormalizedSet,
    batch_size: usize,
) -> Result<UploadSummary, ImportError> {
    if batch_size == 0 {
        return Err(ImportError::InvalidBatchSize(batch_size));
    }

    let updates: Vec<IpSetUpdate> = blocks.iter().copied().map(IpSetUpdate::insert).collect();
    let total = updates.len();
    let mut summary = UploadSummary {
        batches: 0,
        uploaded: 0,
    };

    for batch in updates.chunks(batch_size) {
        let token = store.get_change_token()?;
        store.update_ip_set(ip_set, &token, batch)?;

        let first = summary.uploaded;
        summary.uploaded += batch.len();
        summary.batches += 1;

        let progress = format_progress(first, summary.uploaded - 1, total);
        log::info!("{ip_set}: {progress}");
        println!("{progress}");
    }

    Ok(summary)
}
