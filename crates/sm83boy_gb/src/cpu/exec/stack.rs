use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_push_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = self.read_rr_af(opcode);
        self.push_u16(bus, value);
        16
    }

    /// POP AF drops the low nibble of F through `set_af`.
    pub(super) fn exec_pop_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = self.pop_u16(bus);
        self.write_rr_af(opcode, value);
        12
    }
}
