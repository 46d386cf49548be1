//! Small bit-twiddling helpers shared by the CPU and cartridge code.
//!
//! Everything here is a pure function over plain integers.

/// Carry out of bit 3 when adding the low nibbles of two bytes.
#[inline]
pub fn check_half_carry_add8(x: u8, y: u8) -> bool {
    (((x & 0x0F) + (y & 0x0F)) & 0x10) != 0
}

/// Carry out of bit 11 when adding two 16-bit values.
#[inline]
pub fn check_half_carry_add16(x: u16, y: u16) -> bool {
    (((x & 0x0FFF) + (y & 0x0FFF)) & 0x1000) != 0
}

/// Half carry for ADC: the incoming carry bit joins the nibble sum.
#[inline]
pub fn check_half_carry_adc8(x: u8, y: u8, carry: u8) -> bool {
    (((x & 0x0F) + (y & 0x0F) + (carry & 0x01)) & 0x10) != 0
}

/// Borrow into bit 4 when subtracting the low nibbles of two bytes.
///
/// The nibble difference is taken in wrapping arithmetic and bit 4 of the
/// result is inspected.
#[inline]
pub fn check_half_carry_sub8(x: u8, y: u8) -> bool {
    ((x & 0x0F).wrapping_sub(y & 0x0F) & 0x10) != 0
}

/// Borrow into bit 12 when subtracting two 16-bit values.
#[inline]
pub fn check_half_carry_sub16(x: u16, y: u16) -> bool {
    ((x & 0x0FFF).wrapping_sub(y & 0x0FFF) & 0x1000) != 0
}

/// Half carry for SBC: the incoming carry bit is subtracted as well.
#[inline]
pub fn check_half_carry_sbc8(x: u8, y: u8, carry: u8) -> bool {
    ((x & 0x0F)
        .wrapping_sub(y & 0x0F)
        .wrapping_sub(carry & 0x01)
        & 0x10)
        != 0
}

/// Returns bit `n` (0 = LSB) of `value` as 0 or 1.
#[inline]
pub fn get_bit(value: u8, n: u8) -> u8 {
    (value >> n) & 0b1
}

/// Clears bit `n` of `value` and ORs in `new_value << n`.
///
/// `new_value` must be 0 or 1.
#[inline]
pub fn modify_bit(value: u8, n: u8, new_value: u8) -> u8 {
    (value & !(1 << n)) | (new_value << n)
}

#[inline]
pub fn high_nibble(value: u8) -> u8 {
    (value >> 4) & 0x0F
}

#[inline]
pub fn low_nibble(value: u8) -> u8 {
    value & 0x0F
}

#[inline]
pub fn swap_nibbles(value: u8) -> u8 {
    value.rotate_left(4)
}

/// Builds a 16-bit word from its low and high bytes.
#[inline]
pub fn concat_bytes(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}
