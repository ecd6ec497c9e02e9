//! Cell condition flags.
//!
//! Each cell carries two flags derived from its accumulator:
//!
//! ```text
//! 1  0
//! N  Z
//! │  └─ Zero: accumulator equals zero
//! └──── Negative: bit 31 of the accumulator is set
//! ```
//!
//! The conditional jumps consult these flags, which are refreshed by the
//! arithmetic instructions (`ADD`, `SUB`, `NEG`, `SWP`) and left untouched by
//! everything else, including `MOV` into the accumulator.

use bitflags::bitflags;

bitflags! {
    /// Cell condition flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u8 {
        /// Zero flag - set when the accumulator is zero.
        const Z = 1 << 0;

        /// Negative flag - set when the accumulator, read as a signed
        /// 32-bit value, is negative.
        const N = 1 << 1;
    }
}

impl Flags {
    /// Flags of a freshly created cell (accumulator is zero).
    pub const POWER_ON: Self = Self::Z;

    /// Derive the flags for an accumulator value.
    #[inline]
    #[must_use]
    pub fn from_acc(acc: u32) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::Z, acc == 0);
        flags.set(Self::N, acc >> 31 != 0);
        flags
    }

    /// Is the zero flag set?
    #[inline]
    #[must_use]
    pub const fn zero(self) -> bool {
        self.contains(Self::Z)
    }

    /// Is the negative flag set?
    #[inline]
    #[must_use]
    pub const fn negative(self) -> bool {
        self.contains(Self::N)
    }
}
