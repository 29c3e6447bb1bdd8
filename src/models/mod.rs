//! Domain models for the IP set import.
//!
//! This module contains the core data structures used throughout the application:
//! - [`NetworkBlock`] - IPv4 network in CIDR notation
//! - [`NormalizedSet`] - De-duplicated blocks of one prefix length
//! - [`IpSetSummary`], [`IpSetHandle`], [`ChangeToken`], [`IpSetUpdate`] - WAF records

mod ipset;
mod ipv4;
mod normalized;

// Re-export public types
pub use ipset::{
    ChangeToken, DescriptorType, IpSetDescriptor, IpSetHandle, IpSetSummary, IpSetUpdate,
    UpdateAction,
};
pub use ipv4::{broadcast_addr, cut_addr, get_cidr_mask, NetworkBlock, Subnets, MAX_LENGTH};
pub use normalized::NormalizedSet;
