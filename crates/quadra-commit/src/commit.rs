//! Top-level commitments over programs, challenges and outputs.
//!
//! Each commitment is a Merkle root over field-element leaves. The leaf
//! ordering is part of the proving contract: cells are visited row-major
//! `(0,0), (0,1), (1,0), (1,1)`, instructions in program order, stream
//! values in production order.

use quadra_vm::{EncodeError, Program, GRID_DIM};
use starknet_types_core::felt::Felt;

use crate::merkle::merkle_root;

/// Commit to the contents of one cell program: the Merkle root of its
/// encoded instructions. The empty program commits to zero.
///
/// # Errors
///
/// Returns [`EncodeError`] if an instruction cannot be encoded.
pub fn cell_commitment(program: &Program) -> Result<Felt, EncodeError> {
    let leaves = program
        .instructions()
        .iter()
        .map(|instr| instr.encode().map(Felt::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merkle_root(&leaves))
}

/// Commit to a full 2x2 grid of programs: the Merkle root of the four
/// row-major cell commitments.
///
/// # Errors
///
/// Returns [`EncodeError`] if any instruction cannot be encoded.
pub fn program_commitment(
    programs: &[[Program; GRID_DIM]; GRID_DIM],
) -> Result<Felt, EncodeError> {
    let mut cells = Vec::with_capacity(GRID_DIM * GRID_DIM);
    for row in programs {
        for program in row {
            cells.push(cell_commitment(program)?);
        }
    }
    Ok(merkle_root(&cells))
}

/// Commit to a `u32` stream, each value zero-extended to a field element.
#[must_use]
pub fn stream_commitment(stream: &[u32]) -> Felt {
    let leaves: Vec<Felt> = stream.iter().map(|&value| Felt::from(value)).collect();
    merkle_root(&leaves)
}

/// Commit to the produced output stream.
#[must_use]
pub fn output_commitment(out_stream: &[u32]) -> Felt {
    stream_commitment(out_stream)
}

/// Commit to a challenge: the Merkle root over the input-stream and
/// expected-output-stream commitments.
///
/// Committing to the two streams separately first lets a prover open either
/// stream on its own.
#[must_use]
pub fn challenge_commitment(inputs: &[u32], expected: &[u32]) -> Felt {
    merkle_root(&[stream_commitment(inputs), stream_commitment(expected)])
}
