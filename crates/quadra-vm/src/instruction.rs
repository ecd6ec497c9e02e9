//! Instruction set and wire encoding.
//!
//! Every instruction is a `(opcode, source, destination)` triple. The wire
//! form packs the triple into a single 32-bit word so that one field element
//! per instruction suffices on the proving side:
//!
//! ```text
//! 31      24 23  22 21  20 19   16 15       8 7        0
//! ├─────────┼──────┼──────┼───────┼──────────┼──────────┤
//! │   lit   │ sprt │ dprt │  op   │  src tag │  dst tag │
//! └─────────┴──────┴──────┴───────┴──────────┴──────────┘
//! ```
//!
//! `lit` carries the literal operand (or a direct-jump target), `sprt`/`dprt`
//! the 2-bit port selectors, and the tag bytes select the operand variants.
//! Decoding is total: unrecognised tag bits resolve to the last variant of
//! the corresponding enum, so any 32-bit word denotes some instruction.

use crate::EncodeError;

/// Largest literal representable in the 8-bit immediate field.
pub const MAX_LITERAL: u32 = 0xFF;

/// Operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Move a value from a source to a destination.
    Mov,
    /// Add the source to the accumulator (32-bit wrapping).
    Add,
    /// Subtract the source from the accumulator (32-bit wrapping).
    Sub,
    /// Negate the accumulator (two's complement).
    Neg,
    /// Copy the accumulator into the backup register.
    Sav,
    /// Swap the accumulator and the backup register.
    Swp,
    /// Unconditional jump to the source value.
    Jmp,
    /// Jump if the zero flag is set.
    Jz,
    /// Jump if the zero flag is clear.
    Jnz,
    /// Jump if the accumulator is strictly positive (neither zero nor negative).
    Jgz,
    /// Jump if the negative flag is set.
    Jlz,
    /// Do nothing.
    Nop,
    /// Treated as `NOP`; a cell only halts when its program runs out.
    Hlt,
}

impl Opcode {
    /// Wire code of this opcode.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Mov => 1,
            Self::Add => 2,
            Self::Sub => 3,
            Self::Neg => 4,
            Self::Sav => 5,
            Self::Swp => 6,
            Self::Jmp => 7,
            Self::Jz => 8,
            Self::Jnz => 9,
            Self::Jgz => 10,
            Self::Jlz => 11,
            Self::Nop => 12,
            Self::Hlt => 13,
        }
    }

    /// Decode a wire code. Unknown codes resolve to [`Opcode::Hlt`].
    #[inline]
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Mov,
            2 => Self::Add,
            3 => Self::Sub,
            4 => Self::Neg,
            5 => Self::Sav,
            6 => Self::Swp,
            7 => Self::Jmp,
            8 => Self::Jz,
            9 => Self::Jnz,
            10 => Self::Jgz,
            11 => Self::Jlz,
            12 => Self::Nop,
            _ => Self::Hlt,
        }
    }

    /// Mnemonic, as written in assembly listings.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Mov => "MOV",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Neg => "NEG",
            Self::Sav => "SAV",
            Self::Swp => "SWP",
            Self::Jmp => "JMP",
            Self::Jz => "JZ",
            Self::Jnz => "JNZ",
            Self::Jgz => "JGZ",
            Self::Jlz => "JLZ",
            Self::Nop => "NOP",
            Self::Hlt => "HLT",
        }
    }
}

/// Directional rendezvous endpoint of a cell.
///
/// A transfer crosses cells when one cell writes a port and the neighbor in
/// that direction reads the opposite port in the same cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    /// Toward row `r - 1`.
    Up,
    /// Toward row `r + 1`.
    Down,
    /// Toward column `c - 1`.
    Left,
    /// Toward column `c + 1`.
    Right,
}

impl Port {
    /// 2-bit wire index of this port.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// Decode a 2-bit wire index. Only the low two bits are consulted.
    #[inline]
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        match index & 0b11 {
            0 => Self::Up,
            1 => Self::Down,
            2 => Self::Left,
            _ => Self::Right,
        }
    }

    /// The port a neighbor must use for the two endpoints to meet.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Source operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Src {
    /// Immediate literal. Must fit in 8 bits to be encodable.
    Lit(u32),
    /// The accumulator.
    Acc,
    /// Reads as zero.
    Nil,
    /// Next value of the input stream. Serviceable only at the input cell.
    In,
    /// Rendezvous read from a directional port.
    Port(Port),
    /// The most recently used port. Unresolved in this engine: never matches.
    Last,
}

impl Src {
    /// Wire tag of this variant.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u32 {
        match self {
            Self::Lit(_) => 0,
            Self::Acc => 1,
            Self::Nil => 2,
            Self::In => 3,
            Self::Port(_) => 4,
            Self::Last => 5,
        }
    }
}

/// Destination operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dst {
    /// The accumulator.
    Acc,
    /// Discards the value.
    Nil,
    /// Appends to the output stream. Effective only at the output cell.
    Out,
    /// Rendezvous write to a directional port.
    Port(Port),
    /// The most recently used port. Unresolved in this engine: never matches.
    Last,
}

impl Dst {
    /// Wire tag of this variant.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u32 {
        match self {
            Self::Acc => 0,
            Self::Nil => 1,
            Self::Out => 2,
            Self::Port(_) => 3,
            Self::Last => 4,
        }
    }
}

/// One decoded instruction.
///
/// The destination is significant only for `MOV`; jumps carry their target in
/// the source operand and the remaining opcodes consult neither field or only
/// the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Operation selector.
    pub op: Opcode,
    /// Source operand (jump target for the jump family).
    pub src: Src,
    /// Destination operand (`MOV` only).
    pub dst: Dst,
}

impl Instruction {
    /// Create an instruction from its raw triple.
    #[inline]
    #[must_use]
    pub const fn new(op: Opcode, src: Src, dst: Dst) -> Self {
        Self { op, src, dst }
    }

    /// `MOV src, dst`
    #[must_use]
    pub const fn mov(src: Src, dst: Dst) -> Self {
        Self::new(Opcode::Mov, src, dst)
    }

    /// `ADD src`
    #[must_use]
    pub const fn add(src: Src) -> Self {
        Self::new(Opcode::Add, src, Dst::Nil)
    }

    /// `SUB src`
    #[must_use]
    pub const fn sub(src: Src) -> Self {
        Self::new(Opcode::Sub, src, Dst::Nil)
    }

    /// `NEG`
    #[must_use]
    pub const fn neg() -> Self {
        Self::new(Opcode::Neg, Src::Nil, Dst::Nil)
    }

    /// `SAV`
    #[must_use]
    pub const fn sav() -> Self {
        Self::new(Opcode::Sav, Src::Nil, Dst::Nil)
    }

    /// `SWP`
    #[must_use]
    pub const fn swp() -> Self {
        Self::new(Opcode::Swp, Src::Nil, Dst::Nil)
    }

    /// `JMP src`
    #[must_use]
    pub const fn jmp(target: Src) -> Self {
        Self::new(Opcode::Jmp, target, Dst::Nil)
    }

    /// `JZ src`
    #[must_use]
    pub const fn jz(target: Src) -> Self {
        Self::new(Opcode::Jz, target, Dst::Nil)
    }

    /// `JNZ src`
    #[must_use]
    pub const fn jnz(target: Src) -> Self {
        Self::new(Opcode::Jnz, target, Dst::Nil)
    }

    /// `JGZ src`
    #[must_use]
    pub const fn jgz(target: Src) -> Self {
        Self::new(Opcode::Jgz, target, Dst::Nil)
    }

    /// `JLZ src`
    #[must_use]
    pub const fn jlz(target: Src) -> Self {
        Self::new(Opcode::Jlz, target, Dst::Nil)
    }

    /// `NOP`
    #[must_use]
    pub const fn nop() -> Self {
        Self::new(Opcode::Nop, Src::Nil, Dst::Nil)
    }

    /// `HLT`
    #[must_use]
    pub const fn hlt() -> Self {
        Self::new(Opcode::Hlt, Src::Nil, Dst::Nil)
    }

    /// Pack this instruction into its 32-bit wire word.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::LiteralOutOfRange`] if the source literal does
    /// not fit in the 8-bit immediate field.
    pub fn encode(&self) -> Result<u32, EncodeError> {
        let lit = match self.src {
            Src::Lit(value) => {
                if value > MAX_LITERAL {
                    return Err(EncodeError::LiteralOutOfRange(value));
                }
                value
            }
            _ => 0,
        };
        let src_port = match self.src {
            Src::Port(port) => port.index(),
            _ => 0,
        };
        let dst_port = match self.dst {
            Dst::Port(port) => port.index(),
            _ => 0,
        };

        Ok((lit << 24)
            | (src_port << 22)
            | (dst_port << 20)
            | (self.op.code() << 16)
            | (self.src.tag() << 8)
            | self.dst.tag())
    }

    /// Unpack a 32-bit wire word. Total: every word decodes to an
    /// instruction, with unknown tag bits resolving to the last variant of
    /// the corresponding operand enum.
    #[must_use]
    pub fn decode(word: u32) -> Self {
        let lit = word >> 24;
        let src_port = Port::from_index(word >> 22);
        let dst_port = Port::from_index(word >> 20);
        let op = Opcode::from_code((word >> 16) & 0xF);

        let src = match (word >> 8) & 0xFF {
            0 => Src::Lit(lit),
            1 => Src::Acc,
            2 => Src::Nil,
            3 => Src::In,
            4 => Src::Port(src_port),
            _ => Src::Last,
        };
        let dst = match word & 0xFF {
            0 => Dst::Acc,
            1 => Dst::Nil,
            2 => Dst::Out,
            3 => Dst::Port(dst_port),
            _ => Dst::Last,
        };

        Self { op, src, dst }
    }
}

impl core::fmt::Display for Port {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        };
        write!(f, "{name}")
    }
}

impl core::fmt::Display for Src {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Lit(value) => write!(f, "{value}"),
            Self::Acc => write!(f, "ACC"),
            Self::Nil => write!(f, "NIL"),
            Self::In => write!(f, "IN"),
            Self::Port(port) => write!(f, "{port}"),
            Self::Last => write!(f, "LAST"),
        }
    }
}

impl core::fmt::Display for Dst {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Acc => write!(f, "ACC"),
            Self::Nil => write!(f, "NIL"),
            Self::Out => write!(f, "OUT"),
            Self::Port(port) => write!(f, "{port}"),
            Self::Last => write!(f, "LAST"),
        }
    }
}

impl core::fmt::Display for Instruction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.op {
            Opcode::Mov => write!(f, "MOV {}, {}", self.src, self.dst),
            Opcode::Add
            | Opcode::Sub
            | Opcode::Jmp
            | Opcode::Jz
            | Opcode::Jnz
            | Opcode::Jgz
            | Opcode::Jlz => write!(f, "{} {}", self.op.mnemonic(), self.src),
            _ => write!(f, "{}", self.op.mnemonic()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        // MOV 42, RIGHT: lit in the top byte, dst port in bits 21..20,
        // op Mov = 1, src tag Lit = 0, dst tag Port = 3.
        let instr = Instruction::mov(Src::Lit(42), Dst::Port(Port::Right));
        let word = instr.encode().unwrap();
        assert_eq!(word >> 24, 42);
        assert_eq!((word >> 22) & 0b11, 0);
        assert_eq!((word >> 20) & 0b11, 3);
        assert_eq!((word >> 16) & 0xF, 1);
        assert_eq!((word >> 8) & 0xFF, 0);
        assert_eq!(word & 0xFF, 3);
    }

    #[test]
    fn test_encode_src_port_bits() {
        let instr = Instruction::add(Src::Port(Port::Left));
        let word = instr.encode().unwrap();
        assert_eq!((word >> 22) & 0b11, 2);
        assert_eq!((word >> 8) & 0xFF, 4);
    }

    #[test]
    fn test_encode_rejects_wide_literal() {
        let instr = Instruction::mov(Src::Lit(256), Dst::Acc);
        assert_eq!(instr.encode(), Err(EncodeError::LiteralOutOfRange(256)));

        let instr = Instruction::mov(Src::Lit(MAX_LITERAL), Dst::Acc);
        assert!(instr.encode().is_ok());
    }

    #[test]
    fn test_decode_roundtrip() {
        let samples = [
            Instruction::mov(Src::Lit(0), Dst::Acc),
            Instruction::mov(Src::Lit(255), Dst::Out),
            Instruction::mov(Src::In, Dst::Port(Port::Right)),
            Instruction::mov(Src::Port(Port::Left), Dst::Nil),
            Instruction::mov(Src::Last, Dst::Last),
            Instruction::add(Src::Acc),
            Instruction::sub(Src::Port(Port::Up)),
            Instruction::neg(),
            Instruction::sav(),
            Instruction::swp(),
            Instruction::jmp(Src::Lit(7)),
            Instruction::jz(Src::Lit(0)),
            Instruction::jnz(Src::Port(Port::Down)),
            Instruction::jgz(Src::Acc),
            Instruction::jlz(Src::Nil),
            Instruction::nop(),
            Instruction::hlt(),
        ];
        for instr in samples {
            let word = instr.encode().unwrap();
            assert_eq!(Instruction::decode(word), instr, "{instr}");
        }
    }

    #[test]
    fn test_decode_is_total() {
        // Garbage tag bytes resolve to the last variant of each union.
        let word = 0x00FFFFFF;
        let instr = Instruction::decode(word);
        assert_eq!(instr.op, Opcode::Hlt);
        assert_eq!(instr.src, Src::Last);
        assert_eq!(instr.dst, Dst::Last);

        // Opcode 0 is not assigned and also lands on HLT.
        let instr = Instruction::decode(0);
        assert_eq!(instr.op, Opcode::Hlt);
        assert_eq!(instr.src, Src::Lit(0));
        assert_eq!(instr.dst, Dst::Acc);
    }

    #[test]
    fn test_opcode_codes() {
        assert_eq!(Opcode::Mov.code(), 1);
        assert_eq!(Opcode::Hlt.code(), 13);
        for code in 1..=13 {
            assert_eq!(Opcode::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_port_opposites() {
        assert_eq!(Port::Up.opposite(), Port::Down);
        assert_eq!(Port::Down.opposite(), Port::Up);
        assert_eq!(Port::Left.opposite(), Port::Right);
        assert_eq!(Port::Right.opposite(), Port::Left);
    }

    #[test]
    fn test_distinct_instructions_encode_distinctly() {
        let samples = [
            Instruction::mov(Src::Lit(1), Dst::Acc),
            Instruction::mov(Src::Lit(2), Dst::Acc),
            Instruction::mov(Src::Acc, Dst::Acc),
            Instruction::mov(Src::Acc, Dst::Nil),
            Instruction::add(Src::Lit(1)),
            Instruction::sub(Src::Lit(1)),
            Instruction::jmp(Src::Lit(1)),
            Instruction::nop(),
            Instruction::hlt(),
        ];
        for (i, a) in samples.iter().enumerate() {
            for (j, b) in samples.iter().enumerate() {
                let (wa, wb) = (a.encode().unwrap(), b.encode().unwrap());
                assert_eq!(i == j, wa == wb, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Instruction::mov(Src::Lit(42), Dst::Out).to_string(),
            "MOV 42, OUT"
        );
        assert_eq!(
            Instruction::add(Src::Port(Port::Left)).to_string(),
            "ADD LEFT"
        );
        assert_eq!(Instruction::jgz(Src::Lit(3)).to_string(), "JGZ 3");
        assert_eq!(Instruction::swp().to_string(), "SWP");
    }
}
