//! A set of network blocks sharing one prefix length.

use super::NetworkBlock;
use std::collections::btree_set;
use std::collections::BTreeSet;

/// De-duplicated blocks, all of length `prefix_len`.
///
/// Backed by a [`BTreeSet`] so iteration is always in ascending address order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSet {
    prefix_len: u8,
    blocks: BTreeSet<NetworkBlock>,
}

impl NormalizedSet {
    pub fn new(prefix_len: u8) -> Self {
        NormalizedSet {
            prefix_len,
            blocks: BTreeSet::new(),
        }
    }

    /// Add a block, returning false if it was already present.
    ///
    /// # Panics
    /// If the block does not have this set's prefix length.
    pub(crate) fn insert(&mut self, block: NetworkBlock) -> bool {
        assert_eq!(
            block.prefix_len, self.prefix_len,
            "{block} does not match the set prefix /{}",
            self.prefix_len
        );
        self.blocks.insert(block)
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains(&self, block: &NetworkBlock) -> bool {
        self.blocks.contains(block)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, NetworkBlock> {
        self.blocks.iter()
    }
}

impl<'a> IntoIterator for &'a NormalizedSet {
    type Item = &'a NetworkBlock;
    type IntoIter = btree_set::Iter<'a, NetworkBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
