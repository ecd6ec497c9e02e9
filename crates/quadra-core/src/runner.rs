//! The run driver.
//!
//! Takes the prover-facing payload - input stream, expected output stream,
//! flattened program words - and produces the seven-element public-outputs
//! record: decode, run to termination, score, commit.

use quadra_commit::field::{felt_low_u32, felt_to_u64};
use quadra_commit::{
    challenge_commitment, output_commitment, program_commitment, Felt, PublicOutputs, Score,
};
use quadra_vm::{Grid, Instruction, Program, StepResult, GRID_DIM};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hard upper bound on cycles per run.
///
/// Part of the reproducibility contract: witness and proof must agree on
/// when a runaway program is cut off.
pub const MAX_CYCLES: u64 = 10_000;

/// A puzzle's I/O contract: feed `inputs`, demand `expected`.
///
/// Hosts load these from JSON challenge files; the driver only sees the
/// in-memory form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Challenge {
    /// Values served to the input cell, in order.
    pub inputs: Vec<u32>,
    /// Output stream a solution must produce exactly.
    pub expected: Vec<u32>,
}

/// Decode a flattened program payload into the four cell programs.
///
/// The layout is row-major: for each cell, a length prefix followed by that
/// many instruction words. Decoding never fails - a truncated payload
/// leaves the remaining cells empty, instruction words are reduced to their
/// low 32 bits, and a cell keeps at most
/// [`MAX_PROGRAM_LEN`](quadra_vm::MAX_PROGRAM_LEN) instructions.
#[must_use]
pub fn decode_programs(words: &[Felt]) -> [[Program; GRID_DIM]; GRID_DIM] {
    let mut programs: [[Program; GRID_DIM]; GRID_DIM] = Default::default();
    let mut cursor = 0usize;

    for cell in 0..GRID_DIM * GRID_DIM {
        if cursor >= words.len() {
            break;
        }
        let declared = felt_to_u64(words[cursor]).unwrap_or(u64::MAX);
        cursor += 1;

        let available = (words.len() - cursor) as u64;
        let take = declared.min(available) as usize;
        programs[cell / GRID_DIM][cell % GRID_DIM] = Program::truncated(
            words[cursor..cursor + take]
                .iter()
                .map(|&word| Instruction::decode(felt_low_u32(word))),
        );
        cursor += take;
    }

    programs
}

/// Run a program payload against a challenge and summarise the outcome.
///
/// The program commitment is always derived from the decoded programs, never
/// accepted from outside. The run stops at the first `Halted` or `Deadlock`
/// cycle, or after [`MAX_CYCLES`]; `solved` compares whatever output was
/// produced up to that point against `expected`.
#[must_use]
pub fn run(inputs: &[u32], expected: &[u32], prog_words: &[Felt]) -> PublicOutputs {
    let programs = decode_programs(prog_words);
    // Decoded literals are 8-bit by construction, so re-encoding them for
    // the commitment cannot fail.
    let program_commitment = program_commitment(&programs).unwrap_or(Felt::ZERO);

    let mut grid = Grid::new();
    for (r, row) in programs.into_iter().enumerate() {
        for (c, program) in row.into_iter().enumerate() {
            grid.load_program(r, c, program);
        }
    }
    grid.load_inputs(inputs.to_vec());

    loop {
        match grid.step_cycle() {
            StepResult::Continue => {
                if grid.cycles() >= MAX_CYCLES {
                    log::debug!("run stopped at the cycle cap");
                    break;
                }
            }
            StepResult::Halted => {
                log::debug!("run halted after {} cycles", grid.cycles());
                break;
            }
            StepResult::Deadlock => {
                log::debug!("run deadlocked after {} cycles", grid.cycles());
                break;
            }
        }
    }

    let solved = grid.out_stream() == expected;
    PublicOutputs {
        challenge_commitment: challenge_commitment(inputs, expected),
        program_commitment,
        output_commitment: output_commitment(grid.out_stream()),
        score: Score {
            cycles: grid.cycles(),
            msgs: grid.msgs(),
            nodes_used: grid.nodes_used(),
        },
        solved,
    }
}

/// Convenience wrapper: run a payload against a [`Challenge`].
#[must_use]
pub fn run_challenge(challenge: &Challenge, prog_words: &[Felt]) -> PublicOutputs {
    run(&challenge.inputs, &challenge.expected, prog_words)
}

/// Encode four cell programs into the flattened payload layout.
///
/// This is the inverse of [`decode_programs`] for well-formed programs and
/// is what assemblers are expected to emit.
///
/// # Errors
///
/// Returns [`quadra_vm::EncodeError`] if an instruction cannot be encoded.
pub fn encode_programs(
    programs: &[[Program; GRID_DIM]; GRID_DIM],
) -> Result<Vec<Felt>, quadra_vm::EncodeError> {
    let mut words = Vec::new();
    for row in programs {
        for program in row {
            words.push(Felt::from(program.len() as u64));
            for instr in program.instructions() {
                words.push(Felt::from(instr.encode()?));
            }
        }
    }
    Ok(words)
}
