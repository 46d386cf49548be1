use sm83boy_common::bits::{
    check_half_carry_adc8, check_half_carry_add16, check_half_carry_add8,
    check_half_carry_sbc8, check_half_carry_sub8,
};

use super::{Cpu, Flag};

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = if use_carry { self.flag_bit(Flag::C) } else { 0 };

        let result = a.wrapping_add(value).wrapping_add(carry_in);
        let carry = if use_carry {
            (a as u16) + (value as u16) + (carry_in as u16) > 0xFF
        } else {
            result < a
        };

        self.regs.a = result;

        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, check_half_carry_adc8(a, value, carry_in));
        self.set_flag(Flag::C, carry);
    }

    /// Subtraction core shared by SUB, SBC and CP. Returns the 8-bit
    /// result and sets all four flags.
    fn alu_sub_flags(&mut self, value: u8, carry_in: u8) -> u8 {
        let a = self.regs.a;
        let result = a.wrapping_sub(value).wrapping_sub(carry_in);

        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, check_half_carry_sbc8(a, value, carry_in));
        self.set_flag(Flag::C, (value as u16) + (carry_in as u16) > a as u16);
        result
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let carry_in = if use_carry { self.flag_bit(Flag::C) } else { 0 };
        self.regs.a = self.alu_sub_flags(value, carry_in);
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.alu_sub_flags(value, 0);
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, true);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// After an addition (N=0) A is corrected by +0x06 when the low nibble is
    /// out of BCD range or H is set, and by +0x60 when A > 0x99 or C is set.
    /// After a subtraction (N=1) only H and C select the -0x06/-0x60
    /// corrections. N is preserved, H is cleared.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flag::N) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flag::C, adjust >= 0x60);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// 8-bit increment helper used by INC r and INC (HL).
    ///
    /// Updates Z, N, H from the pre-increment value while leaving C
    /// unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, check_half_carry_add8(value, 1));
        result
    }

    /// 8-bit decrement helper used by DEC r and DEC (HL). C is unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, check_half_carry_sub8(value, 1));
        result
    }

    /// 16-bit add helper for `ADD HL,rr`.
    ///
    /// Z is unaffected; N is cleared; H is the carry out of bit 11 and C the
    /// carry out of bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, check_half_carry_add16(hl, value));
        self.set_flag(Flag::C, result < hl);

        self.regs.set_hl(result);
    }

    /// Add a signed 8-bit immediate to a 16-bit base (ADD SP,e8 and
    /// LD HL,SP+e8).
    ///
    /// Z and N are cleared; H and C come from the unsigned addition of the
    /// low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let low = base as u8;
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, check_half_carry_add8(low, imm8));
        self.set_flag(Flag::C, low.checked_add(imm8).is_none());
        base.wrapping_add_signed(imm8 as i8 as i16)
    }

    // Rotate/shift primitives. Each returns the new value and the bit that
    // was shifted out; callers decide how Z is treated.

    #[inline]
    pub(super) fn rlc(value: u8) -> (u8, bool) {
        (value.rotate_left(1), value & 0x80 != 0)
    }

    #[inline]
    pub(super) fn rrc(value: u8) -> (u8, bool) {
        (value.rotate_right(1), value & 0x01 != 0)
    }

    #[inline]
    pub(super) fn rl(value: u8, carry_in: u8) -> (u8, bool) {
        ((value << 1) | carry_in, value & 0x80 != 0)
    }

    #[inline]
    pub(super) fn rr(value: u8, carry_in: u8) -> (u8, bool) {
        ((value >> 1) | (carry_in << 7), value & 0x01 != 0)
    }

    /// Store the result flags of a rotate/shift: N=0, H=0, C=shifted-out
    /// bit, Z from the result or forced clear for the accumulator forms.
    #[inline]
    pub(super) fn set_shift_flags(&mut self, result: u8, carry_out: bool, compute_zero: bool) {
        self.set_flag(Flag::Z, compute_zero && result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, carry_out);
    }
}
