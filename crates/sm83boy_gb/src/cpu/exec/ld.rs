use crate::cpu::{Bus, Cpu, Reg8};

const HIGH_PAGE: u16 = 0xFF00;

impl Cpu {
    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = self.fetch16(bus);
        self.write_rr_sp(opcode, value);
        12
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let dst = Reg8::from_index(opcode >> 3);
        let value = self.fetch8(bus);
        self.write_reg8(bus, dst, value);

        if dst.is_memory() {
            12
        } else {
            8
        }
    }

    /// `LD r,r'` for the whole 0x40..0x7F block except 0x76 (HALT).
    pub(super) fn exec_ld_r_r<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!((0x40..=0x7F).contains(&opcode) && opcode != 0x76);
        let dst = Reg8::from_index(opcode >> 3);
        let src = Reg8::from_index(opcode);
        let value = self.read_reg8(bus, src);
        self.write_reg8(bus, dst, value);

        if dst.is_memory() || src.is_memory() {
            8
        } else {
            4
        }
    }

    /// Stores SP little-endian at a16.
    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        let [lo, hi] = self.regs.sp.to_le_bytes();
        bus.write8(addr, lo);
        bus.write8(addr.wrapping_add(1), hi);
        20
    }

    pub(super) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = HIGH_PAGE | self.fetch8(bus) as u16;
        if opcode == 0xE0 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        12
    }

    pub(super) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = HIGH_PAGE | self.regs.c as u16;
        if opcode == 0xE2 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        8
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = self.fetch16(bus);
        if opcode == 0xEA {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        16
    }

    /// Address for the `(BC)`, `(DE)`, `(HL+)` and `(HL-)` forms. The HL
    /// variants post-increment or post-decrement HL.
    fn indirect_addr(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = self.indirect_addr(opcode);
        bus.write8(addr, self.regs.a);
        8
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = self.indirect_addr(opcode);
        self.regs.a = bus.read8(addr);
        8
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }
}
