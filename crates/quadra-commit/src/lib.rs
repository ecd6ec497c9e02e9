//! Commitments binding a quadra run to its proof.
//!
//! Everything a verifier learns about a run is condensed into three Poseidon
//! Merkle commitments - programs, challenge, produced outputs - plus the
//! score counters and the solved flag, packed as seven field elements.
//!
//! The commitment layer and the VM must agree bit-for-bit on instruction
//! encodings and leaf ordering: witnesses generated off-line and proofs
//! generated inside a constrained environment have to reach identical
//! digests. The instruction wire format lives in [`quadra_vm`]; this crate
//! owns the hashing on top of it.

#![warn(missing_docs)]

mod commit;
pub mod field;
mod merkle;
mod outputs;

pub use commit::{
    cell_commitment, challenge_commitment, output_commitment, program_commitment,
    stream_commitment,
};
pub use merkle::{hash_pair, merkle_path, merkle_root, verify_path};
pub use outputs::{OutputsError, PublicOutputs, Score, PUBLIC_OUTPUTS_LEN};

// The field element type all commitments are expressed in.
pub use starknet_types_core::felt::Felt;
