use sm83boy_common::bits::concat_bytes;

use super::{Bus, Cpu};

/// 8-bit operand selector used by every per-register instruction family.
///
/// The discriminants follow the register field encoding of the opcode
/// tables: 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Reg8 {
    B = 0,
    C = 1,
    D = 2,
    E = 3,
    H = 4,
    L = 5,
    HlIndirect = 6,
    A = 7,
}

impl Reg8 {
    /// Decode a 3-bit register field. Only the low three bits are used.
    #[inline]
    pub(crate) fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => Reg8::B,
            1 => Reg8::C,
            2 => Reg8::D,
            3 => Reg8::E,
            4 => Reg8::H,
            5 => Reg8::L,
            6 => Reg8::HlIndirect,
            _ => Reg8::A,
        }
    }

    #[inline]
    pub(crate) fn is_memory(self) -> bool {
        self == Reg8::HlIndirect
    }
}

impl Cpu {
    #[inline]
    pub(super) fn read_reg8<B: Bus>(&mut self, bus: &mut B, reg: Reg8) -> u8 {
        match reg {
            Reg8::B => self.regs.b,
            Reg8::C => self.regs.c,
            Reg8::D => self.regs.d,
            Reg8::E => self.regs.e,
            Reg8::H => self.regs.h,
            Reg8::L => self.regs.l,
            Reg8::HlIndirect => bus.read8(self.regs.hl()),
            Reg8::A => self.regs.a,
        }
    }

    #[inline]
    pub(super) fn write_reg8<B: Bus>(&mut self, bus: &mut B, reg: Reg8, value: u8) {
        match reg {
            Reg8::B => self.regs.b = value,
            Reg8::C => self.regs.c = value,
            Reg8::D => self.regs.d = value,
            Reg8::E => self.regs.e = value,
            Reg8::H => self.regs.h = value,
            Reg8::L => self.regs.l = value,
            Reg8::HlIndirect => bus.write8(self.regs.hl(), value),
            Reg8::A => self.regs.a = value,
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        concat_bytes(lo, hi)
    }

    /// Push a word: high byte at SP-1, low byte at SP-2.
    #[inline]
    pub(crate) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(crate) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        concat_bytes(lo, hi)
    }

    /// Relative jump helper used by JR/JR cc.
    ///
    /// The displacement is a signed 8-bit offset relative to the address
    /// following the operand.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add_signed(offset as i16);
            12
        } else {
            8
        }
    }

    /// Absolute jump helper used by JP cc,a16.
    pub(super) fn jp_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            self.regs.pc = addr;
            16
        } else {
            12
        }
    }

    /// Conditional call helper used by CALL cc,a16.
    pub(super) fn call_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
            24
        } else {
            12
        }
    }

    /// Conditional return helper used by RET cc.
    pub(super) fn ret_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        if cond {
            self.regs.pc = self.pop_u16(bus);
            20
        } else {
            8
        }
    }
}
