use crate::config::IllegalOpcodePolicy;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// HALT. The core has no interrupt controller to wake it, so this only
    /// burns one machine cycle and execution continues with the next byte.
    pub(super) fn exec_halt(&mut self) -> u32 {
        log::trace!("HALT at {:#06X}", self.regs.pc.wrapping_sub(1));
        4
    }

    /// STOP is a 2-byte instruction; the padding byte is fetched and
    /// discarded. Low-power mode is not modelled.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let _padding = self.fetch8(bus);
        log::trace!("STOP at {:#06X}", self.regs.pc.wrapping_sub(2));
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        4
    }

    /// EI takes effect immediately; there is no one-instruction delay.
    pub(super) fn exec_ei(&mut self) -> u32 {
        self.ime = true;
        4
    }

    /// One of the unassigned opcode slots. PC already points past it.
    pub(super) fn exec_illegal(&mut self, opcode: u8) -> u32 {
        let addr = self.regs.pc.wrapping_sub(1);
        log::error!("illegal opcode {opcode:#04X} at {addr:#06X}");
        if self.illegal_opcode_policy == IllegalOpcodePolicy::Lock {
            self.locked = true;
        }
        0
    }
}
