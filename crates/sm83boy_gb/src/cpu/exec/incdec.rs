use crate::cpu::{Bus, Cpu, Reg8};

impl Cpu {
    pub(super) fn exec_inc8_reg<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let reg = Reg8::from_index(opcode >> 3);
        let value = self.read_reg8(bus, reg);
        let result = self.alu_inc8(value);
        self.write_reg8(bus, reg, result);

        if reg.is_memory() {
            12
        } else {
            4
        }
    }

    pub(super) fn exec_dec8_reg<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let reg = Reg8::from_index(opcode >> 3);
        let value = self.read_reg8(bus, reg);
        let result = self.alu_dec8(value);
        self.write_reg8(bus, reg, result);

        if reg.is_memory() {
            12
        } else {
            4
        }
    }

    /// INC rr. No flags are touched.
    pub(super) fn exec_inc16_rr(&mut self, opcode: u8) -> u32 {
        let value = self.read_rr_sp(opcode).wrapping_add(1);
        self.write_rr_sp(opcode, value);
        8
    }

    /// DEC rr. No flags are touched.
    pub(super) fn exec_dec16_rr(&mut self, opcode: u8) -> u32 {
        let value = self.read_rr_sp(opcode).wrapping_sub(1);
        self.write_rr_sp(opcode, value);
        8
    }
}
