use super::{Bus, Cpu};

impl Cpu {
    /// Fetch, decode and execute one instruction at PC.
    ///
    /// Returns the T-cycles consumed. 0 means an unassigned opcode was hit
    /// (or the CPU is locked from an earlier one) and nothing executed.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.locked {
            return 0;
        }

        let opcode = self.fetch8(bus);
        self.exec_opcode(bus, opcode)
    }
}
