use sm83boy_common::bits::{concat_bytes, get_bit, modify_bit};

use super::Cpu;

/// Register file of the SM83.
///
/// The 16-bit pairs are views over two 8-bit fields; the first-named
/// register of a pair is its high byte.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        concat_bytes(self.f, self.a)
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        // Lower 4 bits of F are always zero.
        self.f = f & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        concat_bytes(self.c, self.b)
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        concat_bytes(self.e, self.d)
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        concat_bytes(self.l, self.h)
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.flag_bit(flag) != 0
    }

    /// Flag value as a 0/1 byte.
    #[inline]
    pub fn flag_bit(&self, flag: Flag) -> u8 {
        get_bit(self.regs.f, flag as u8)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.set_flag_bit(flag, u8::from(value));
    }

    /// Set a flag from a raw 0/1 byte. Only bit 0 of `value` is used.
    #[inline]
    pub fn set_flag_bit(&mut self, flag: Flag, value: u8) {
        self.regs.f = modify_bit(self.regs.f, flag as u8, value & 0x01);
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }
}
