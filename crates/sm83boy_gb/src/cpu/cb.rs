use sm83boy_common::bits::{get_bit, modify_bit, swap_nibbles};

use super::{Bus, Cpu, Flag, Reg8};

impl Cpu {
    /// Execute a CB-prefixed instruction. The prefix byte has already been
    /// consumed; this fetches the second opcode byte.
    ///
    /// The second byte splits into `x` (bits 6..7: shift group, BIT, RES,
    /// SET), `y` (bits 3..5: shift kind or bit index) and `z` (bits 0..2:
    /// operand register).
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let reg = Reg8::from_index(cb);
        let value = self.read_reg8(bus, reg);

        match x {
            0 => {
                let result = self.cb_shift(y, value);
                self.write_reg8(bus, reg, result);
            }
            1 => {
                // BIT b,r: Z is the complement of the tested bit, C is kept.
                self.set_flag(Flag::Z, get_bit(value, y) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
                return if reg.is_memory() { 12 } else { 8 };
            }
            2 => self.write_reg8(bus, reg, modify_bit(value, y, 0)),
            _ => self.write_reg8(bus, reg, modify_bit(value, y, 1)),
        }

        if reg.is_memory() {
            16
        } else {
            8
        }
    }

    /// RLC, RRC, RL, RR, SLA, SRA, SWAP, SRL selected by `kind`.
    fn cb_shift(&mut self, kind: u8, value: u8) -> u8 {
        let carry_in = self.flag_bit(Flag::C);
        let (result, carry_out) = match kind {
            0 => Self::rlc(value),
            1 => Self::rrc(value),
            2 => Self::rl(value, carry_in),
            3 => Self::rr(value, carry_in),
            4 => (value << 1, value & 0x80 != 0),
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            6 => (swap_nibbles(value), false),
            _ => (value >> 1, value & 0x01 != 0),
        };
        self.set_shift_flags(result, carry_out, true);
        result
    }
}
