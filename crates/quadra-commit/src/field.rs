//! Conversions between machine integers and field elements.
//!
//! Counters and stream values are unsigned machine integers inside the VM
//! and field elements on the proving side. Widening is total; narrowing
//! reports values outside the integer's range.

use starknet_types_core::felt::Felt;

/// Narrow a field element to a `u64`, or `None` if it does not fit.
#[must_use]
pub fn felt_to_u64(value: Felt) -> Option<u64> {
    let bytes = value.to_bytes_be();
    if bytes[..24].iter().any(|&b| b != 0) {
        return None;
    }
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&bytes[24..]);
    Some(u64::from_be_bytes(tail))
}

/// Narrow a field element to a `u32`, or `None` if it does not fit.
#[must_use]
pub fn felt_to_u32(value: Felt) -> Option<u32> {
    let bytes = value.to_bytes_be();
    if bytes[..28].iter().any(|&b| b != 0) {
        return None;
    }
    let mut tail = [0u8; 4];
    tail.copy_from_slice(&bytes[28..]);
    Some(u32::from_be_bytes(tail))
}

/// The low 32 bits of a field element, discarding the rest.
#[must_use]
pub fn felt_low_u32(value: Felt) -> u32 {
    let bytes = value.to_bytes_be();
    let mut tail = [0u8; 4];
    tail.copy_from_slice(&bytes[28..]);
    u32::from_be_bytes(tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_roundtrip() {
        for value in [0u64, 1, 42, u64::from(u32::MAX), u64::MAX] {
            assert_eq!(felt_to_u64(Felt::from(value)), Some(value));
        }
    }

    #[test]
    fn test_u64_overflow_detected() {
        let wide = Felt::from(u64::MAX) + Felt::ONE;
        assert_eq!(felt_to_u64(wide), None);
        assert_eq!(felt_to_u64(Felt::MAX), None);
    }

    #[test]
    fn test_u32_roundtrip_and_overflow() {
        assert_eq!(felt_to_u32(Felt::from(u32::MAX)), Some(u32::MAX));
        assert_eq!(felt_to_u32(Felt::from(u64::from(u32::MAX) + 1)), None);
    }

    #[test]
    fn test_low_u32_truncates() {
        assert_eq!(felt_low_u32(Felt::from(0xDEAD_BEEFu32)), 0xDEAD_BEEF);
        assert_eq!(felt_low_u32(Felt::from(0x1_0000_0001u64)), 1);
    }
}
