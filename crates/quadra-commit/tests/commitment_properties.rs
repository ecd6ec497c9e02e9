//! Property tests for the Merkle construction and the public-outputs
//! record.

use proptest::prelude::*;
use quadra_commit::{
    hash_pair, merkle_path, merkle_root, verify_path, Felt, PublicOutputs, Score,
    PUBLIC_OUTPUTS_LEN,
};

fn arb_leaves() -> impl Strategy<Value = Vec<Felt>> {
    prop::collection::vec(any::<u64>().prop_map(Felt::from), 1..=16)
}

proptest! {
    #[test]
    fn single_leaf_root_is_identity(value in any::<u64>()) {
        let leaf = Felt::from(value);
        prop_assert_eq!(merkle_root(&[leaf]), leaf);
    }

    #[test]
    fn hash_pair_is_order_sensitive(a in any::<u64>(), b in any::<u64>()) {
        prop_assume!(a != b);
        let (fa, fb) = (Felt::from(a), Felt::from(b));
        prop_assert_ne!(hash_pair(fa, fb), hash_pair(fb, fa));
    }

    #[test]
    fn every_leaf_has_a_verifying_path(leaves in arb_leaves(), index in any::<prop::sample::Index>()) {
        let index = index.index(leaves.len());
        let root = merkle_root(&leaves);
        let path = merkle_path(&leaves, index).unwrap();
        prop_assert!(verify_path(root, leaves[index], &path, index));
    }

    #[test]
    fn tampered_leaves_fail_verification(leaves in arb_leaves(), index in any::<prop::sample::Index>()) {
        prop_assume!(leaves.len() > 1);
        let index = index.index(leaves.len());
        let root = merkle_root(&leaves);
        let path = merkle_path(&leaves, index).unwrap();
        let tampered = leaves[index] + Felt::ONE;
        prop_assert!(!verify_path(root, tampered, &path, index));
    }

    #[test]
    fn public_outputs_roundtrip(
        challenge in any::<u64>(),
        program in any::<u64>(),
        output in any::<u64>(),
        cycles in any::<u64>(),
        msgs in any::<u64>(),
        nodes_used in any::<u32>(),
        solved in any::<bool>(),
    ) {
        let outputs = PublicOutputs {
            challenge_commitment: Felt::from(challenge),
            program_commitment: Felt::from(program),
            output_commitment: Felt::from(output),
            score: Score { cycles, msgs, nodes_used },
            solved,
        };
        prop_assert_eq!(PublicOutputs::from_felts(&outputs.to_felts()), Ok(outputs));
    }

    #[test]
    fn wrong_record_length_is_rejected(len in 0usize..=12) {
        prop_assume!(len != PUBLIC_OUTPUTS_LEN);
        let felts = vec![Felt::ZERO; len];
        prop_assert!(PublicOutputs::from_felts(&felts).is_err());
    }
}
