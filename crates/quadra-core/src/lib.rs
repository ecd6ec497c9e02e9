//! quadra run driver - from prover payload to public outputs.
//!
//! This crate glues the VM and the commitment layer into the single entry
//! point the proving frontend calls:
//!
//! ```text
//! (inputs, expected, program words)
//!         │
//!         ▼
//!   decode_programs ──► Grid ──► step_cycle loop ──► Score
//!         │                            │
//!         ▼                            ▼
//!   program commitment        output commitment
//!         └──────────┬─────────────────┘
//!                    ▼
//!       PublicOutputs (7 field elements)
//! ```
//!
//! # Example
//!
//! ```
//! use quadra_core::{encode_programs, run};
//! use quadra_vm::{Dst, Instruction, Program, Src};
//!
//! let mut programs: [[Program; 2]; 2] = Default::default();
//! programs[1][1] = Program::new(vec![
//!     Instruction::mov(Src::Lit(42), Dst::Out),
//!     Instruction::hlt(),
//! ])
//! .unwrap();
//!
//! let words = encode_programs(&programs).unwrap();
//! let outputs = run(&[], &[42], &words);
//! assert!(outputs.solved);
//! assert_eq!(outputs.score.cycles, 3);
//! ```

#![warn(missing_docs)]

mod runner;

pub use runner::{
    decode_programs, encode_programs, run, run_challenge, Challenge, MAX_CYCLES,
};

// Re-export the types a frontend needs to consume the results.
pub use quadra_commit::{Felt, OutputsError, PublicOutputs, Score, PUBLIC_OUTPUTS_LEN};
