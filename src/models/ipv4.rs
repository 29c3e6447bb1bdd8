//! IPv4 network blocks in CIDR notation.
//!
//! Provides [`NetworkBlock`] for representing canonical IPv4 networks,
//! along with the bit arithmetic used to move between prefix lengths.

use crate::error::ImportError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a network mask as u32.
///
/// # Examples
/// ```
/// use waf_ipset_import::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, ImportError> {
    if len > MAX_LENGTH {
        Err(ImportError::InvalidPrefix(len))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, ImportError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, ImportError> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// A canonical IPv4 network: no address bits are set beyond the prefix.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct NetworkBlock {
    /// The network address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub prefix_len: u8,
}

impl NetworkBlock {
    /// Parse a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// Parsing is strict: an address with host bits set beyond the prefix,
    /// such as "10.0.0.1/24", is rejected rather than silently truncated.
    pub fn new(addr_cidr: &str) -> Result<NetworkBlock, ImportError> {
        let trimmed = addr_cidr.trim();
        let (addr, prefix) = trimmed
            .split_once('/')
            .ok_or_else(|| ImportError::parse(trimmed, "expected address/prefix"))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| ImportError::parse(trimmed, format!("invalid address {addr}")))?;
        let prefix_len: u8 = prefix
            .parse()
            .map_err(|_| ImportError::parse(trimmed, format!("invalid prefix length {prefix}")))?;
        if prefix_len > MAX_LENGTH {
            return Err(ImportError::parse(
                trimmed,
                format!("prefix length /{prefix_len} is longer than /{MAX_LENGTH}"),
            ));
        }
        if cut_addr(addr, prefix_len)? != addr {
            return Err(ImportError::parse(trimmed, "host bits set beyond the prefix"));
        }
        Ok(NetworkBlock { addr, prefix_len })
    }

    /// Build a block from any address, clearing the host bits.
    pub fn from_addr(addr: Ipv4Addr, prefix_len: u8) -> Result<NetworkBlock, ImportError> {
        Ok(NetworkBlock {
            addr: cut_addr(addr, prefix_len)?,
            prefix_len,
        })
    }

    /// Lowest (network) address in the block.
    pub fn lo(&self) -> Ipv4Addr {
        self.addr
    }

    /// Highest (broadcast) address in the block.
    pub fn hi(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.prefix_len)
            .unwrap_or_else(|e| panic!("Error calculating broadcast address for {}: {}", self, e))
    }

    /// Number of addresses covered, 2^(32 - prefix_len).
    pub fn num_addresses(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix_len)
    }

    /// True if `other` lies entirely inside this block.
    pub fn contains(&self, other: &NetworkBlock) -> bool {
        other.prefix_len >= self.prefix_len && self.lo() <= other.lo() && other.hi() <= self.hi()
    }

    /// The enclosing network at the shorter prefix `new_prefix`.
    pub fn supernet(&self, new_prefix: u8) -> Result<NetworkBlock, ImportError> {
        if new_prefix > self.prefix_len {
            return Err(ImportError::InvalidPrefix(new_prefix));
        }
        NetworkBlock::from_addr(self.addr, new_prefix)
    }

    /// All networks of length `new_prefix` that partition this block, in
    /// ascending address order.
    pub fn subnets(&self, new_prefix: u8) -> Result<Subnets, ImportError> {
        if new_prefix < self.prefix_len || new_prefix > MAX_LENGTH {
            return Err(ImportError::InvalidPrefix(new_prefix));
        }
        let start = u32::from(self.addr) as u64;
        Ok(Subnets {
            next: start,
            end: start + self.num_addresses(),
            step: 1u64 << (MAX_LENGTH - new_prefix),
            prefix_len: new_prefix,
        })
    }
}

/// Iterator returned by [`NetworkBlock::subnets`].
#[derive(Debug, Clone)]
pub struct Subnets {
    next: u64,
    end: u64,
    step: u64,
    prefix_len: u8,
}

impl Iterator for Subnets {
    type Item = NetworkBlock;

    fn next(&mut self) -> Option<NetworkBlock> {
        if self.next >= self.end {
            return None;
        }
        let block = NetworkBlock {
            addr: Ipv4Addr::from(self.next as u32),
            prefix_len: self.prefix_len,
        };
        self.next += self.step;
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl Subnets {
    /// Number of subnets not yet yielded; up to 2^32 for a /0 split to /32.
    pub fn remaining(&self) -> u64 {
        (self.end - self.next) / self.step
    }
}

impl FromStr for NetworkBlock {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetworkBlock::new(s)
    }
}

impl std::fmt::Display for NetworkBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl Serialize for NetworkBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetworkBlock {
    fn deserialize<D>(deserializer: D) -> Result<NetworkBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NetworkBlock::new(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 8).unwrap(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(cut_addr(ip, 0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 16).unwrap(),
            Ipv4Addr::new(192, 168, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 0)
        );
        assert_eq!(
            broadcast_addr(ip, 0).unwrap(),
            Ipv4Addr::new(255, 255, 255, 255)
        );
    }

    #[test]
    fn test_new_valid() {
        let block = NetworkBlock::new(" 10.1.0.0/16\n").unwrap();
        assert_eq!(block.addr, Ipv4Addr::new(10, 1, 0, 0));
        assert_eq!(block.prefix_len, 16);
        assert_eq!(block.to_string(), "10.1.0.0/16");

        let all = NetworkBlock::new("0.0.0.0/0").unwrap();
        assert_eq!(all.num_addresses(), 1 << 32);
        let host = NetworkBlock::new("192.168.1.42/32").unwrap();
        assert_eq!(host.num_addresses(), 1);
    }

    #[test]
    fn test_new_rejects_malformed() {
        for bad in [
            "",
            "10.0.0.0",
            "10.0.0/24",
            "10.0.0.256/24",
            "10.0.0.0/33",
            "10.0.0.0/-1",
            "10.0.0.0/24/1",
            "fe80::/10",
        ] {
            assert!(
                matches!(NetworkBlock::new(bad), Err(ImportError::Parse { .. })),
                "Expected parse error for '{bad}'"
            );
        }
    }

    #[test]
    fn test_new_rejects_host_bits() {
        let err = NetworkBlock::new("10.0.0.1/24").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid CIDR '10.0.0.1/24': host bits set beyond the prefix"
        );
        assert!(NetworkBlock::new("10.0.0.1/32").is_ok());
    }

    #[test]
    fn test_lo_hi_contains() {
        let net8 = NetworkBlock::new("10.0.0.0/8").unwrap();
        let net24 = NetworkBlock::new("10.0.10.0/24").unwrap();
        let other = NetworkBlock::new("11.0.0.0/24").unwrap();

        assert_eq!(net8.lo(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(net8.hi(), Ipv4Addr::new(10, 255, 255, 255));
        assert_eq!(net24.hi(), Ipv4Addr::new(10, 0, 10, 255));
        assert_eq!(net24.hi(), broadcast_addr(net24.addr, 24).unwrap());
        assert_eq!(NetworkBlock::new("0.0.0.0/0").unwrap().hi(), Ipv4Addr::BROADCAST);
        assert_eq!(NetworkBlock::new("10.0.0.7/32").unwrap().hi(), Ipv4Addr::new(10, 0, 0, 7));
        assert!(net8.contains(&net24));
        assert!(net8.contains(&net8));
        assert!(!net24.contains(&net8));
        assert!(!net8.contains(&other));
    }

    #[test]
    fn test_supernet() {
        let net = NetworkBlock::new("192.168.77.0/24").unwrap();
        let sup = net.supernet(16).unwrap();
        assert_eq!(sup, NetworkBlock::new("192.168.0.0/16").unwrap());
        assert!(sup.contains(&net));
        assert_eq!(net.supernet(24).unwrap(), net);
        assert_eq!(
            net.supernet(0).unwrap(),
            NetworkBlock::new("0.0.0.0/0").unwrap()
        );
        assert!(net.supernet(25).is_err());
    }

    #[test]
    fn test_subnets() {
        let net = NetworkBlock::new("10.1.0.0/16").unwrap();
        let subs: Vec<NetworkBlock> = net.subnets(18).unwrap().collect();
        assert_eq!(
            subs.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            vec!["10.1.0.0/18", "10.1.64.0/18", "10.1.128.0/18", "10.1.192.0/18"]
        );
        assert_eq!(net.subnets(16).unwrap().collect::<Vec<_>>(), vec![net]);
        assert!(net.subnets(15).is_err());
        assert!(net.subnets(33).is_err());
    }

    #[test]
    fn test_subnets_top_of_range() {
        let all = NetworkBlock::new("0.0.0.0/0").unwrap();
        let subs = all.subnets(1).unwrap();
        assert_eq!(subs.remaining(), 2);
        assert_eq!(subs.size_hint(), (2, Some(2)));
        assert_eq!(all.subnets(32).unwrap().remaining(), 1 << 32);
        // 2^32 subnets only fit usize on 64-bit targets.
        let hint = all.subnets(32).unwrap().size_hint();
        match usize::try_from(1u64 << 32) {
            Ok(n) => assert_eq!(hint, (n, Some(n))),
            Err(_) => assert_eq!(hint, (usize::MAX, None)),
        }
        let subs: Vec<NetworkBlock> = subs.collect();
        assert_eq!(subs[1], NetworkBlock::new("128.0.0.0/1").unwrap());

        let last = NetworkBlock::new("255.255.255.0/24").unwrap();
        let subs: Vec<NetworkBlock> = last.subnets(32).unwrap().collect();
        assert_eq!(subs.len(), 256);
        assert_eq!(subs[255].to_string(), "255.255.255.255/32");
    }

    #[test]
    fn test_ordering() {
        let ip1 = NetworkBlock::new("10.0.0.0/24").unwrap();
        let ip2 = NetworkBlock::new("10.0.1.0/24").unwrap();
        let ip3 = NetworkBlock::new("10.0.0.0/8").unwrap();
        assert!(ip1 < ip2);
        assert!(ip3 < ip1, "Same address sorts by shorter prefix first");
    }

    #[test]
    fn test_serde_as_cidr_string() {
        let block = NetworkBlock::new("172.16.0.0/12").unwrap();
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, "\"172.16.0.0/12\"");
        let back: NetworkBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
        assert!(serde_json::from_str::<NetworkBlock>("\"172.16.0.1/12\"").is_err());
    }
}
