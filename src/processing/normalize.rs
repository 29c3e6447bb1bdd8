//! Network list normalization.
//!
//! Collapses small networks into their supernet and splits large networks
//! into subnets so every block ends up at one prefix length.

use crate::error::ImportError;
use crate::models::{NetworkBlock, NormalizedSet, MAX_LENGTH};

/// Subnet count above which a single input block is reported as expensive.
const LARGE_EXPANSION: u64 = 1 << 16;

/// Parse and normalize a list of CIDR strings to `prefix_len`.
///
/// Every line is parsed before any normalization happens, so a single bad
/// line fails the whole call.
///
/// # Arguments
/// * `cidrs` - CIDR strings, one network each
/// * `prefix_len` - Target prefix length (0-32)
///
/// # Returns
/// * `Ok(NormalizedSet)` - De-duplicated blocks, all at `prefix_len`
/// * `Err` - `InvalidPrefix` or the first `Parse` error
pub fn minimize_network_list<S: AsRef<str>>(
    cidrs: &[S],
    prefix_len: u8,
) -> Result<NormalizedSet, ImportError> {
    if prefix_len > MAX_LENGTH {
        return Err(ImportError::InvalidPrefix(prefix_len));
    }
    let blocks = cidrs
        .iter()
        .map(|c| NetworkBlock::new(c.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    minimize_blocks(blocks, prefix_len)
}

/// Normalize already parsed blocks to `prefix_len`.
pub fn minimize_blocks<I>(blocks: I, prefix_len: u8) -> Result<NormalizedSet, ImportError>
where
    I: IntoIterator<Item = NetworkBlock>,
{
    if prefix_len > MAX_LENGTH {
        return Err(ImportError::InvalidPrefix(prefix_len));
    }
    let mut set = NormalizedSet::new(prefix_len);
    let mut count_in = 0usize;

    for block in blocks {
        count_in += 1;
        if block.prefix_len >= prefix_len {
            set.insert(block.supernet(prefix_len)?);
        } else {
            let subnets = block.subnets(prefix_len)?;
            if subnets.remaining() > LARGE_EXPANSION {
                log::warn!(
                    "{block} expands into {} /{prefix_len} subnets",
                    subnets.remaining()
                );
            }
            for subnet in subnets {
                set.insert(subnet);
            }
        }
    }

    log::debug!(
        "minimize_blocks() {count_in} blocks => {} /{prefix_len} networks",
        set.len()
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(cidr: &str) -> NetworkBlock {
        NetworkBlock::new(cidr).unwrap()
    }

    #[test]
    fn test_minimize_collapses_to_supernet() {
        let set = minimize_network_list(&["10.0.0.0/24", "10.0.1.0/24"], 16).unwrap();
        assert_eq!(set.len(), 1, "Both /24s share one /16 supernet");
        assert!(set.contains(&block("10.0.0.0/16")));
    }

    #[test]
    fn test_supernet_contains_original() {
        let original = block("192.168.77.0/24");
        let set = minimize_blocks([original], 16).unwrap();
        let result: Vec<&NetworkBlock> = set.iter().collect();
        assert_eq!(result.len(), 1);
        assert!(result[0].contains(&original));
        assert_eq!(result[0].to_string(), "192.168.0.0/16");
    }

    #[test]
    fn test_minimize_subdivides_large_blocks() {
        let original = block("10.0.0.0/8");
        let set = minimize_blocks([original], 16).unwrap();
        assert_eq!(set.len(), 256, "Expected 256 /16 subnets of a /8");

        let covered: u64 = set.iter().map(|b| b.num_addresses()).sum();
        assert_eq!(covered, original.num_addresses(), "Subnets must cover the /8 exactly");
        assert!(set.iter().all(|b| original.contains(b)));

        // Sorted and adjacent: no gaps, no overlaps.
        let blocks: Vec<&NetworkBlock> = set.iter().collect();
        assert_eq!(blocks[0].lo(), original.lo());
        assert_eq!(blocks[255].hi(), original.hi());
        for pair in blocks.windows(2) {
            assert_eq!(u32::from(pair[0].hi()) + 1, u32::from(pair[1].lo()));
        }
    }

    #[test]
    fn test_minimize_keeps_exact_prefix() {
        let set = minimize_network_list(&["172.16.0.0/16"], 16).unwrap();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![block("172.16.0.0/16")]);
    }

    #[test]
    fn test_minimize_all_same_prefix_and_deduplicated() {
        let input = [
            "10.0.0.0/8",
            "10.20.30.0/24",
            "10.20.0.0/16",
            "192.168.0.0/15",
            "192.168.4.0/22",
            "1.2.3.4/32",
        ];
        let set = minimize_network_list(&input, 16).unwrap();
        assert!(set.iter().all(|b| b.prefix_len == 16));
        // 256 from the /8 (covers 10.20/16), 2 from the /15, 1.2/16.
        assert_eq!(set.len(), 259);
        assert_eq!(set.prefix_len(), 16);
    }

    #[test]
    fn test_minimize_idempotent() {
        let input = ["10.0.0.0/14", "10.9.8.0/21", "203.0.113.0/24", "0.0.0.0/8"];
        for prefix in [0u8, 8, 12, 16, 24] {
            let once = minimize_network_list(&input, prefix).unwrap();
            let twice = minimize_blocks(once.iter().copied(), prefix).unwrap();
            assert_eq!(once, twice, "Not idempotent at /{prefix}");
        }
    }

    #[test]
    fn test_minimize_to_zero() {
        let set = minimize_network_list(&["10.0.0.0/8", "200.1.0.0/16"], 0).unwrap();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![block("0.0.0.0/0")]);
    }

    #[test]
    fn test_minimize_empty() {
        let empty: [&str; 0] = [];
        let set = minimize_network_list(&empty, 16).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_minimize_invalid_prefix() {
        assert!(matches!(
            minimize_network_list(&["10.0.0.0/8"], 33),
            Err(ImportError::InvalidPrefix(33))
        ));
    }

    #[test]
    fn test_minimize_parse_error_aborts() {
        let err = minimize_network_list(&["10.0.0.0/8", "not-a-network", "10.1.0.0/16"], 16)
            .unwrap_err();
        assert!(
            matches!(&err, ImportError::Parse { input, .. } if input == "not-a-network"),
            "Unexpected error {err}"
        );
        assert!(minimize_network_list(&["10.0.0.1/8"], 16).is_err());
    }
}
