//! The public-outputs record bound to a proof.
//!
//! A finished run is summarised as exactly seven field elements in a fixed
//! order. The record always serializes; deserialization validates the
//! length, the counter ranges and the solved flag so that a round trip
//! through the wire form is lossless.

use starknet_types_core::felt::Felt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::field::{felt_to_u32, felt_to_u64};

/// Number of field elements in a serialized [`PublicOutputs`] record.
pub const PUBLIC_OUTPUTS_LEN: usize = 7;

/// Raw performance counters of one run.
///
/// The VM only exposes the counters; the host-side ranking combines them as
/// `cycles + 5 * nodes_used + msgs / 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Score {
    /// Cycles executed, including the terminal one.
    pub cycles: u64,
    /// Values appended to the output stream.
    pub msgs: u64,
    /// Cells with a non-empty program.
    pub nodes_used: u32,
}

/// The seven-element summary a prover commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicOutputs {
    /// Commitment to the challenge's input and expected-output streams.
    pub challenge_commitment: Felt,
    /// Commitment to the four cell programs.
    pub program_commitment: Felt,
    /// Commitment to the produced output stream.
    pub output_commitment: Felt,
    /// Performance counters.
    pub score: Score,
    /// Did the produced output match the expected output exactly?
    pub solved: bool,
}

/// Errors produced when reading a serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OutputsError {
    /// The record does not hold exactly [`PUBLIC_OUTPUTS_LEN`] elements.
    #[error("expected {PUBLIC_OUTPUTS_LEN} field elements, got {0}")]
    InvalidLength(usize),
    /// A counter element exceeds its integer width.
    #[error("counter at position {0} is out of range")]
    CounterOutOfRange(usize),
    /// The solved element is neither zero nor one.
    #[error("solved flag must be 0 or 1")]
    InvalidSolvedFlag,
}

impl PublicOutputs {
    /// Serialize in the fixed order `[challenge, program, output, cycles,
    /// msgs, nodes_used, solved]`.
    #[must_use]
    pub fn to_felts(&self) -> [Felt; PUBLIC_OUTPUTS_LEN] {
        [
            self.challenge_commitment,
            self.program_commitment,
            self.output_commitment,
            Felt::from(self.score.cycles),
            Felt::from(self.score.msgs),
            Felt::from(self.score.nodes_used),
            Felt::from(u8::from(self.solved)),
        ]
    }

    /// Deserialize a record produced by [`to_felts`](Self::to_felts).
    ///
    /// # Errors
    ///
    /// Returns [`OutputsError`] if the slice is not exactly
    /// [`PUBLIC_OUTPUTS_LEN`] elements long, a counter does not fit its
    /// integer width, or the solved flag is not a boolean.
    pub fn from_felts(felts: &[Felt]) -> Result<Self, OutputsError> {
        let [challenge, program, output, cycles, msgs, nodes_used, solved] = felts else {
            return Err(OutputsError::InvalidLength(felts.len()));
        };

        let score = Score {
            cycles: felt_to_u64(*cycles).ok_or(OutputsError::CounterOutOfRange(3))?,
            msgs: felt_to_u64(*msgs).ok_or(OutputsError::CounterOutOfRange(4))?,
            nodes_used: felt_to_u32(*nodes_used).ok_or(OutputsError::CounterOutOfRange(5))?,
        };
        let solved = match felt_to_u32(*solved) {
            Some(0) => false,
            Some(1) => true,
            _ => return Err(OutputsError::InvalidSolvedFlag),
        };

        Ok(Self {
            challenge_commitment: *challenge,
            program_commitment: *program,
            output_commitment: *output,
            score,
            solved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PublicOutputs {
        PublicOutputs {
            challenge_commitment: Felt::from(111u64),
            program_commitment: Felt::from(222u64),
            output_commitment: Felt::from(333u64),
            score: Score {
                cycles: 10_000,
                msgs: 12,
                nodes_used: 3,
            },
            solved: true,
        }
    }

    #[test]
    fn test_roundtrip() {
        let outputs = sample();
        let felts = outputs.to_felts();
        assert_eq!(PublicOutputs::from_felts(&felts), Ok(outputs));
    }

    #[test]
    fn test_layout_order() {
        let felts = sample().to_felts();
        assert_eq!(felts[0], Felt::from(111u64));
        assert_eq!(felts[1], Felt::from(222u64));
        assert_eq!(felts[2], Felt::from(333u64));
        assert_eq!(felts[3], Felt::from(10_000u64));
        assert_eq!(felts[4], Felt::from(12u64));
        assert_eq!(felts[5], Felt::from(3u64));
        assert_eq!(felts[6], Felt::ONE);
    }

    #[test]
    fn test_wrong_length_rejected() {
        for len in [0, 6, 8] {
            let felts = vec![Felt::ZERO; len];
            assert_eq!(
                PublicOutputs::from_felts(&felts),
                Err(OutputsError::InvalidLength(len))
            );
        }
    }

    #[test]
    fn test_unsolved_flag() {
        let outputs = PublicOutputs {
            solved: false,
            ..sample()
        };
        let felts = outputs.to_felts();
        assert_eq!(felts[6], Felt::ZERO);
        assert_eq!(PublicOutputs::from_felts(&felts), Ok(outputs));
    }

    #[test]
    fn test_invalid_solved_flag_rejected() {
        let mut felts = sample().to_felts();
        felts[6] = Felt::TWO;
        assert_eq!(
            PublicOutputs::from_felts(&felts),
            Err(OutputsError::InvalidSolvedFlag)
        );
    }

    #[test]
    fn test_oversized_counter_rejected() {
        let mut felts = sample().to_felts();
        felts[3] = Felt::from(u64::MAX) + Felt::ONE;
        assert_eq!(
            PublicOutputs::from_felts(&felts),
            Err(OutputsError::CounterOutOfRange(3))
        );

        let mut felts = sample().to_felts();
        felts[5] = Felt::from(u64::from(u32::MAX) + 1);
        assert_eq!(
            PublicOutputs::from_felts(&felts),
            Err(OutputsError::CounterOutOfRange(5))
        );
    }
}
