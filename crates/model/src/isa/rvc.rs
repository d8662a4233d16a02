//! Compressed instruction length decoding.
//!
//! The trap dispatcher only needs the base length rule: an instruction whose
//! first halfword has both low bits set is at least 32 bits wide, anything else
//! is a 16-bit RVC encoding. Longer (48/64-bit) encodings are not used by the
//! target and fall into the 32-bit class, matching the handler.

/// Mask of the low two bits that select the instruction quadrant.
pub const QUADRANT_MASK: u16 = 0b11;

/// Quadrant value of uncompressed (32-bit) instructions.
pub const QUADRANT_FULL: u16 = 0b11;

/// Returns the quadrant (low two bits) of an instruction's first halfword.
#[inline]
pub const fn quadrant(halfword: u16) -> u16 {
    halfword & QUADRANT_MASK
}

/// Returns `true` if the halfword starts a 16-bit compressed instruction.
#[inline]
pub const fn is_compressed(halfword: u16) -> bool {
    quadrant(halfword) != QUADRANT_FULL
}

/// Length in bytes of the instruction starting with `halfword`.
#[inline]
pub const fn instruction_len(halfword: u16) -> u64 {
    if is_compressed(halfword) { 2 } else { 4 }
}
