//! Cell programs.

use crate::instruction::Instruction;
use crate::ProgramError;

/// Upper bound on the number of instructions in one cell program.
pub const MAX_PROGRAM_LEN: usize = 32;

/// An ordered, immutable sequence of instructions owned by one cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program(Vec<Instruction>);

impl Program {
    /// Create a program from an instruction sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::TooLong`] if the sequence exceeds
    /// [`MAX_PROGRAM_LEN`] instructions.
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, ProgramError> {
        if instructions.len() > MAX_PROGRAM_LEN {
            return Err(ProgramError::TooLong(instructions.len()));
        }
        Ok(Self(instructions))
    }

    /// Create a program from the first [`MAX_PROGRAM_LEN`] instructions of a
    /// sequence, discarding the rest.
    #[must_use]
    pub fn truncated<I: IntoIterator<Item = Instruction>>(instructions: I) -> Self {
        Self(instructions.into_iter().take(MAX_PROGRAM_LEN).collect())
    }

    /// The empty program.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Does this program contain no instructions?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fetch the instruction at `pc`, or `None` when the counter cannot be
    /// served.
    #[inline]
    #[must_use]
    pub fn fetch(&self, pc: u32) -> Option<&Instruction> {
        self.0.get(pc as usize)
    }

    /// All instructions, in program order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.0
    }
}
