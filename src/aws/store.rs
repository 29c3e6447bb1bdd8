//! Remote IP set store abstraction.

use crate::error::ImportError;
use crate::models::{ChangeToken, IpSetHandle, IpSetSummary, IpSetUpdate};

/// The WAF operations an import needs.
///
/// Calls are made one at a time; every mutating call takes a change token
/// fetched immediately before it and never reused.
pub trait IpSetStore {
    /// All IP sets visible to the caller.
    fn list_ip_sets(&mut self) -> Result<Vec<IpSetSummary>, ImportError>;

    fn get_change_token(&mut self) -> Result<ChangeToken, ImportError>;

    fn create_ip_set(
        &mut self,
        name: &str,
        token: &ChangeToken,
    ) -> Result<IpSetHandle, ImportError>;

    /// Apply one batch of updates atomically.
    fn update_ip_set(
        &mut self,
        ip_set: &IpSetHandle,
        token: &ChangeToken,
        updates: &[IpSetUpdate],
    ) -> Result<(), ImportError>;
}
