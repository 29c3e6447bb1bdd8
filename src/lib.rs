//! Create an AWS WAF IP set from a text file of IPv4 networks.
//!
//! The networks are normalized to one prefix length, de-duplicated, and
//! inserted into a newly created IP set in batches.

pub mod aws;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use aws::IpSetStore;
use config::Config;
use error::ImportError;
use models::IpSetHandle;
use processing::{minimize_network_list, upload_ip_set};
use std::path::Path;

/// What an import run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub ip_set: IpSetHandle,
    pub lines_read: usize,
    pub networks: usize,
    pub batches: usize,
}

/// Read one CIDR per line, dropping line terminators and blank lines.
pub fn read_cidr_file(path: &Path) -> Result<Vec<String>, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cidrs: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    log::info!("Read {} lines from {}.", cidrs.len(), path.display());
    Ok(cidrs)
}

/// Return an error if an IP set called `name` already exists.
pub fn ensure_ip_set_absent<S: IpSetStore + ?Sized>(
    store: &mut S,
    name: &str,
) -> Result<(), ImportError> {
    let ip_sets = store.list_ip_sets()?;
    log::debug!("Found {} existing IP sets", ip_sets.len());
    match ip_sets.iter().find(|s| s.name == name) {
        Some(existing) => {
            log::warn!("IP set '{name}' already exists with id {}", existing.ip_set_id);
            Err(ImportError::DuplicateIpSet(name.to_string()))
        }
        None => Ok(()),
    }
}

/// Create an empty IP set using a fresh change token.
pub fn create_ip_set<S: IpSetStore + ?Sized>(
    store: &mut S,
    name: &str,
) -> Result<IpSetHandle, ImportError> {
    let token = store.get_change_token()?;
    let ip_set = store.create_ip_set(name, &token)?;
    log::info!("Created IP set {ip_set}");
    Ok(ip_set)
}

/// Normalize `cidrs`, create IP set `name` and fill it.
///
/// Input problems are reported before any remote call is made; an existing
/// IP set with the same name aborts before anything is created.
pub fn import_ip_set<S: IpSetStore + ?Sized, C: AsRef<str>>(
    store: &mut S,
    name: &str,
    cidrs: &[C],
    config: &Config,
) -> Result<ImportReport, ImportError> {
    if config.batch_size == 0 {
        return Err(ImportError::InvalidBatchSize(config.batch_size));
    }
    let networks = minimize_network_list(cidrs, config.prefix_len)?;
    log::info!(
        "Pruned list of networks to {} /{} networks.",
        networks.len(),
        networks.prefix_len()
    );

    ensure_ip_set_absent(store, name)?;
    let ip_set = create_ip_set(store, name)?;
    let summary = upload_ip_set(store, &ip_set, &networks, config.batch_size)?;

    log::info!(
        "New IP set {name} with {} networks has been created.",
        summary.uploaded
    );
    Ok(ImportReport {
        ip_set,
        lines_read: cidrs.len(),
        networks: summary.uploaded,
        batches: summary.batches,
    })
}

/// Read `path` and import it as IP set `name`.
pub fn run_import<S: IpSetStore + ?Sized>(
    store: &mut S,
    name: &str,
    path: &Path,
    config: &Config,
) -> Result<ImportReport, ImportError> {
    let cidrs = read_cidr_file(path)?;
    import_ip_set(store, name, &cidrs, config)
}
