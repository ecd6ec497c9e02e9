//! The lock-step execution engine.
//!
//! One call to [`Grid::step_cycle`] advances the whole grid by a single
//! cycle. A cycle has two passes:
//!
//! 1. *Intent collection.* Every non-halted cell declares what it wants from
//!    the ports this cycle - a read, or a write carrying a value evaluated
//!    against the previous cycle's state. Cells whose instruction touches no
//!    port declare nothing.
//! 2. *Match and effect.* A write on port `p` pairs with a read on the
//!    opposite port at the neighbor in direction `p`. Each cell then applies
//!    its instruction: paired transfers complete on both sides, unpaired
//!    port operations block, everything else executes.
//!
//! Because pass 2 only consults the frozen intent table, no cell ever
//! observes another cell's post-state within the same cycle, and the result
//! of a cycle is independent of the order cells are visited in.

use crate::grid::{Grid, GRID_DIM, INPUT_CELL, OUTPUT_CELL};
use crate::instruction::{Dst, Instruction, Opcode, Port, Src};
use crate::Flags;

/// Outcome of one grid cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// At least one cell executed an instruction; the run goes on.
    Continue,
    /// All four cells are permanently halted.
    Halted,
    /// Some cell is still live but every live cell is blocked.
    Deadlock,
}

/// A cell's declared port operation for the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    /// Waiting to receive on a port.
    Read(Port),
    /// Offering `value` on a port.
    Write(Port, u32),
    /// A `LAST` operand: declared, but never pairs with anything.
    Unmatchable,
}

/// How a cell fared in pass 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellOutcome {
    Executed,
    Blocked,
    Halted,
}

type IntentTable = [[Option<Intent>; GRID_DIM]; GRID_DIM];

/// Grid coordinate of the neighbor in direction `port`, if there is one.
fn neighbor(r: usize, c: usize, port: Port) -> Option<(usize, usize)> {
    let (nr, nc) = match port {
        Port::Up => (r.checked_sub(1)?, c),
        Port::Down => (r + 1, c),
        Port::Left => (r, c.checked_sub(1)?),
        Port::Right => (r, c + 1),
    };
    Grid::within(nr, nc).then_some((nr, nc))
}

impl Grid {
    /// Execute one lock-step cycle over the whole grid.
    ///
    /// The cycle counter advances on every call, including the one that
    /// detects termination.
    pub fn step_cycle(&mut self) -> StepResult {
        let intents = self.collect_intents();

        let mut any_executed = false;
        for r in 0..GRID_DIM {
            for c in 0..GRID_DIM {
                if self.nodes[r][c].halted {
                    continue;
                }
                match self.exec_cell(r, c, &intents) {
                    CellOutcome::Executed => {
                        self.nodes[r][c].blocked = false;
                        any_executed = true;
                    }
                    CellOutcome::Blocked => self.nodes[r][c].blocked = true,
                    CellOutcome::Halted => {
                        self.nodes[r][c].halted = true;
                        self.nodes[r][c].blocked = false;
                        log::debug!("cell ({r},{c}) halted at pc {}", self.nodes[r][c].pc);
                    }
                }
            }
        }

        self.cycles += 1;

        if self.nodes.iter().flatten().all(|node| node.halted) {
            StepResult::Halted
        } else if any_executed {
            StepResult::Continue
        } else {
            StepResult::Deadlock
        }
    }

    /// Pass 1: collect every live cell's port intent against the frozen
    /// pre-cycle state.
    fn collect_intents(&self) -> IntentTable {
        let mut intents: IntentTable = [[None; GRID_DIM]; GRID_DIM];
        for r in 0..GRID_DIM {
            for c in 0..GRID_DIM {
                if !self.nodes[r][c].halted {
                    intents[r][c] = self.cell_intent(r, c);
                }
            }
        }
        intents
    }

    fn cell_intent(&self, r: usize, c: usize) -> Option<Intent> {
        let instr = self.programs[r][c].fetch(self.nodes[r][c].pc)?;
        match instr.op {
            Opcode::Mov => {
                if matches!(instr.src, Src::Last) || matches!(instr.dst, Dst::Last) {
                    return Some(Intent::Unmatchable);
                }
                if let Src::Port(port) = instr.src {
                    return Some(Intent::Read(port));
                }
                if let Dst::Port(port) = instr.dst {
                    // A write intent carries its value; if the source cannot
                    // be served (input exhausted, input off the input cell),
                    // no offer is made and the cell blocks in pass 2.
                    return self
                        .peek_src(r, c, instr.src)
                        .map(|value| Intent::Write(port, value));
                }
                None
            }
            Opcode::Add
            | Opcode::Sub
            | Opcode::Jmp
            | Opcode::Jz
            | Opcode::Jnz
            | Opcode::Jgz
            | Opcode::Jlz => match instr.src {
                Src::Last => Some(Intent::Unmatchable),
                Src::Port(port) => Some(Intent::Read(port)),
                _ => None,
            },
            Opcode::Neg | Opcode::Sav | Opcode::Swp | Opcode::Nop | Opcode::Hlt => None,
        }
    }

    /// Evaluate a non-port source without mutating anything.
    fn peek_src(&self, r: usize, c: usize, src: Src) -> Option<u32> {
        match src {
            Src::Lit(value) => Some(value),
            Src::Acc => Some(self.nodes[r][c].acc),
            Src::Nil => Some(0),
            Src::In => {
                if (r, c) != INPUT_CELL {
                    return None;
                }
                self.in_stream.get(self.in_cursor as usize).copied()
            }
            Src::Port(_) | Src::Last => None,
        }
    }

    /// The value offered to `(r, c)` on port `port`, if the neighbor in that
    /// direction wrote toward us this cycle.
    fn offered_value(intents: &IntentTable, r: usize, c: usize, port: Port) -> Option<u32> {
        let (nr, nc) = neighbor(r, c, port)?;
        match intents[nr][nc] {
            Some(Intent::Write(theirs, value)) if theirs == port.opposite() => Some(value),
            _ => None,
        }
    }

    /// Does the neighbor in direction `port` read toward `(r, c)` this
    /// cycle?
    fn has_reader(intents: &IntentTable, r: usize, c: usize, port: Port) -> bool {
        neighbor(r, c, port).is_some_and(|(nr, nc)| {
            matches!(intents[nr][nc], Some(Intent::Read(theirs)) if theirs == port.opposite())
        })
    }

    /// Evaluate a source in the mutation pass. Consumes input on success;
    /// `None` means the cell blocks.
    fn read_src(&mut self, r: usize, c: usize, src: Src, intents: &IntentTable) -> Option<u32> {
        match src {
            Src::Lit(value) => Some(value),
            Src::Acc => Some(self.nodes[r][c].acc),
            Src::Nil => Some(0),
            Src::In => {
                if (r, c) != INPUT_CELL {
                    return None;
                }
                let value = self.in_stream.get(self.in_cursor as usize).copied()?;
                self.in_cursor += 1;
                Some(value)
            }
            Src::Port(port) => Self::offered_value(intents, r, c, port),
            Src::Last => None,
        }
    }

    /// Route a value to a destination. Never blocks: port destinations only
    /// reach this path when their rendezvous already completed or cannot
    /// exist, and `OUT` away from the output cell is absorbed.
    fn write_dst(&mut self, r: usize, c: usize, value: u32, dst: Dst) {
        match dst {
            Dst::Acc => self.nodes[r][c].acc = value,
            Dst::Out => {
                if (r, c) == OUTPUT_CELL {
                    log::trace!("out <- {value}");
                    self.out_stream.push(value);
                    self.msgs += 1;
                }
            }
            Dst::Nil | Dst::Port(_) | Dst::Last => {}
        }
    }

    /// Pass 2 for one live cell: resolve its rendezvous, apply its
    /// instruction, classify the outcome.
    fn exec_cell(&mut self, r: usize, c: usize, intents: &IntentTable) -> CellOutcome {
        let Some(instr) = self.programs[r][c].fetch(self.nodes[r][c].pc).copied() else {
            return CellOutcome::Halted;
        };

        match instr.op {
            Opcode::Nop | Opcode::Hlt => {
                self.nodes[r][c].pc += 1;
                CellOutcome::Executed
            }
            Opcode::Mov => self.exec_mov(r, c, instr, intents),
            Opcode::Add | Opcode::Sub => {
                let Some(value) = self.read_src(r, c, instr.src, intents) else {
                    return CellOutcome::Blocked;
                };
                let node = &mut self.nodes[r][c];
                node.acc = match instr.op {
                    Opcode::Add => node.acc.wrapping_add(value),
                    _ => node.acc.wrapping_sub(value),
                };
                node.flags = Flags::from_acc(node.acc);
                node.pc += 1;
                CellOutcome::Executed
            }
            Opcode::Neg => {
                let node = &mut self.nodes[r][c];
                node.acc = 0u32.wrapping_sub(node.acc);
                node.flags = Flags::from_acc(node.acc);
                node.pc += 1;
                CellOutcome::Executed
            }
            Opcode::Sav => {
                let node = &mut self.nodes[r][c];
                node.bak = node.acc;
                node.pc += 1;
                CellOutcome::Executed
            }
            Opcode::Swp => {
                let node = &mut self.nodes[r][c];
                core::mem::swap(&mut node.acc, &mut node.bak);
                node.flags = Flags::from_acc(node.acc);
                node.pc += 1;
                CellOutcome::Executed
            }
            Opcode::Jmp | Opcode::Jz | Opcode::Jnz | Opcode::Jgz | Opcode::Jlz => {
                // A port source completes its rendezvous before the
                // condition is consulted, so writer and reader always agree
                // on whether the transfer happened.
                let Some(target) = self.read_src(r, c, instr.src, intents) else {
                    return CellOutcome::Blocked;
                };
                let node = &mut self.nodes[r][c];
                let taken = match instr.op {
                    Opcode::Jmp => true,
                    Opcode::Jz => node.flags.zero(),
                    Opcode::Jnz => !node.flags.zero(),
                    Opcode::Jgz => !node.flags.zero() && !node.flags.negative(),
                    _ => node.flags.negative(),
                };
                if taken {
                    node.pc = target;
                } else {
                    node.pc += 1;
                }
                CellOutcome::Executed
            }
        }
    }

    fn exec_mov(
        &mut self,
        r: usize,
        c: usize,
        instr: Instruction,
        intents: &IntentTable,
    ) -> CellOutcome {
        if matches!(instr.src, Src::Last) || matches!(instr.dst, Dst::Last) {
            return CellOutcome::Blocked;
        }

        if let Src::Port(port) = instr.src {
            // Read side of a rendezvous. A port destination on the same
            // instruction cannot start a second rendezvous this cycle; the
            // received value is absorbed by write_dst.
            let Some(value) = Self::offered_value(intents, r, c, port) else {
                return CellOutcome::Blocked;
            };
            log::trace!("({r},{c}) <- {value} via {port}");
            self.write_dst(r, c, value, instr.dst);
            self.nodes[r][c].pc += 1;
            return CellOutcome::Executed;
        }

        if let Dst::Port(port) = instr.dst {
            // Write side: the offer was evaluated at intent collection. No
            // intent means the source could not be served.
            let Some(Intent::Write(_, _)) = intents[r][c] else {
                return CellOutcome::Blocked;
            };
            if !Self::has_reader(intents, r, c, port) {
                return CellOutcome::Blocked;
            }
            // The transfer completed; consume the input it was drawn from.
            if matches!(instr.src, Src::In) {
                self.in_cursor += 1;
            }
            self.nodes[r][c].pc += 1;
            return CellOutcome::Executed;
        }

        let Some(value) = self.read_src(r, c, instr.src, intents) else {
            return CellOutcome::Blocked;
        };
        self.write_dst(r, c, value, instr.dst);
        self.nodes[r][c].pc += 1;
        CellOutcome::Executed
    }
}
