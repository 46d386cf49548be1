use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// Branch condition encoded in bits 3..4: NZ, Z, NC, C.
    #[inline]
    fn condition(&self, opcode: u8) -> bool {
        match (opcode >> 3) & 0x03 {
            0 => !self.get_flag(Flag::Z),
            1 => self.get_flag(Flag::Z),
            2 => !self.get_flag(Flag::C),
            _ => self.get_flag(Flag::C),
        }
    }

    pub(super) fn exec_jr_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let taken = self.condition(opcode);
        self.jr(bus, taken)
    }

    pub(super) fn exec_jp_a16<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.jp_cond(bus, true)
    }

    pub(super) fn exec_jp_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let taken = self.condition(opcode);
        self.jp_cond(bus, taken)
    }

    pub(super) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        4
    }

    pub(super) fn exec_call_a16<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.call_cond(bus, true)
    }

    pub(super) fn exec_call_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let taken = self.condition(opcode);
        self.call_cond(bus, taken)
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        16
    }

    pub(super) fn exec_ret_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let taken = self.condition(opcode);
        self.ret_cond(bus, taken)
    }

    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        16
    }

    /// RST n: call to the fixed vector `opcode & 0x38`.
    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = (opcode & 0x38) as u16;
        16
    }
}
