//! Poseidon Merkle trees over field-element leaves.
//!
//! The tree shape is fixed by three rules the proving side relies on:
//! an empty sequence commits to zero, a single leaf commits to itself
//! without hashing, and longer sequences are zero-padded to the next power
//! of two before the bottom-up reduction.

use starknet_crypto::poseidon_hash;
use starknet_types_core::felt::Felt;

/// Hash an ordered pair of field elements.
#[inline]
#[must_use]
pub fn hash_pair(left: Felt, right: Felt) -> Felt {
    poseidon_hash(left, right)
}

/// Merkle root of a leaf sequence.
#[must_use]
pub fn merkle_root(leaves: &[Felt]) -> Felt {
    match leaves {
        [] => Felt::ZERO,
        [leaf] => *leaf,
        _ => {
            let mut level = leaves.to_vec();
            level.resize(leaves.len().next_power_of_two(), Felt::ZERO);
            while level.len() > 1 {
                level = level
                    .chunks(2)
                    .map(|pair| hash_pair(pair[0], pair[1]))
                    .collect();
            }
            level[0]
        }
    }
}

/// Sibling path authenticating `leaves[index]` against
/// [`merkle_root`]`(leaves)`.
///
/// Returns `None` when `index` does not address a leaf. A single-leaf tree
/// has an empty path.
#[must_use]
pub fn merkle_path(leaves: &[Felt], index: usize) -> Option<Vec<Felt>> {
    if index >= leaves.len() {
        return None;
    }
    if leaves.len() == 1 {
        return Some(Vec::new());
    }

    let mut level = leaves.to_vec();
    level.resize(leaves.len().next_power_of_two(), Felt::ZERO);

    let mut path = Vec::new();
    let mut idx = index;
    while level.len() > 1 {
        path.push(level[idx ^ 1]);
        level = level
            .chunks(2)
            .map(|pair| hash_pair(pair[0], pair[1]))
            .collect();
        idx /= 2;
    }
    Some(path)
}

/// Check a sibling path: walk from the leaf to the root, hashing left or
/// right according to the index parity at each level.
#[must_use]
pub fn verify_path(root: Felt, leaf: Felt, path: &[Felt], index: usize) -> bool {
    let mut current = leaf;
    let mut idx = index;
    for &sibling in path {
        current = if idx % 2 == 0 {
            hash_pair(current, sibling)
        } else {
            hash_pair(sibling, current)
        };
        idx /= 2;
    }
    current == root
}
