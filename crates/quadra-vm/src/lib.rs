//! Deterministic lock-step VM for the quadra parallel-programming puzzle.
//!
//! Players program the four cells of a 2x2 grid in a tiny assembly language.
//! The VM runs all four cells in lock-step: each cycle, every live cell
//! executes at most one instruction, values cross cells only through
//! matched port rendezvous, the top-left cell consumes the input stream and
//! the bottom-right cell produces the output stream.
//!
//! ```text
//!            IN
//!             │
//!         ┌───▼───┐       ┌───────┐
//!         │ (0,0) │◄─────►│ (0,1) │
//!         └───▲───┘       └───▲───┘
//!             │               │
//!         ┌───▼───┐       ┌───▼───┐
//!         │ (1,0) │◄─────►│ (1,1) │
//!         └───────┘       └───┬───┘
//!                             │
//!                             ▼
//!                            OUT
//! ```
//!
//! Every transition is a pure function of the previous grid state, which
//! keeps a run reproducible bit-for-bit between the witness generator and a
//! constrained proving environment.
//!
//! # Example
//!
//! ```
//! use quadra_vm::{Dst, Grid, Instruction, Program, Src, StepResult};
//!
//! let mut grid = Grid::new();
//! grid.load_program(
//!     1,
//!     1,
//!     Program::new(vec![
//!         Instruction::mov(Src::Lit(42), Dst::Out),
//!         Instruction::hlt(),
//!     ])
//!     .unwrap(),
//! );
//!
//! while grid.step_cycle() == StepResult::Continue {}
//! assert_eq!(grid.out_stream(), &[42]);
//! ```

#![warn(missing_docs)]

mod flags;
mod grid;
mod instruction;
mod node;
mod program;
mod step;

pub use flags::Flags;
pub use grid::{Grid, GRID_DIM, INPUT_CELL, OUTPUT_CELL};
pub use instruction::{Dst, Instruction, Opcode, Port, Src, MAX_LITERAL};
pub use node::Node;
pub use program::{Program, MAX_PROGRAM_LEN};
pub use step::StepResult;

/// Errors produced when packing instructions into their wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The source literal does not fit in the 8-bit immediate field.
    #[error("literal {0} does not fit in the 8-bit immediate field")]
    LiteralOutOfRange(u32),
}

/// Errors produced when assembling cell programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    /// The instruction sequence exceeds [`MAX_PROGRAM_LEN`].
    #[error("program has {0} instructions, the limit is {MAX_PROGRAM_LEN}")]
    TooLong(usize),
}
