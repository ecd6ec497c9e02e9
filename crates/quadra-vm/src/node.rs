//! Per-cell execution state.

use crate::flags::Flags;
use crate::instruction::Port;

/// Registers and status of a single compute cell.
///
/// A cell owns an accumulator, a backup register reachable only through
/// `SAV`/`SWP`, a program counter, and its condition flags. `halted` and
/// `blocked` classify the cell at the end of a cycle: halted cells never run
/// again, blocked cells retry their instruction on the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Accumulator register.
    pub acc: u32,
    /// Backup register.
    pub bak: u32,
    /// Program counter (instruction index).
    pub pc: u32,
    /// Port of the most recent completed rendezvous. The current engine
    /// never records one: `LAST` operands are declared by the assembly but
    /// do not participate in matching.
    pub last: Option<Port>,
    /// Condition flags.
    pub flags: Flags,
    /// Permanently stopped. Set when the program is empty or the program
    /// counter runs off the end.
    pub halted: bool,
    /// Waiting on a rendezvous or on input this cycle.
    pub blocked: bool,
}

impl Node {
    /// Create a cell in its power-on state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            acc: 0,
            bak: 0,
            pc: 0,
            last: None,
            flags: Flags::POWER_ON,
            halted: false,
            blocked: false,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
