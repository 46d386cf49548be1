mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod regs;
mod state;
mod step;

pub use bus::Bus;
pub use exec::{is_illegal_opcode, ILLEGAL_OPCODES};
pub(crate) use helpers::Reg8;
pub use regs::{Flag, Registers};
pub use state::CpuState;

use crate::config::IllegalOpcodePolicy;

/// Sharp SM83 CPU core.
///
/// The CPU holds no reference to memory; every `step` borrows the bus it
/// executes against.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub(crate) regs: Registers,
    pub(crate) ime: bool,
    illegal_opcode_policy: IllegalOpcodePolicy,
    /// Set after an illegal opcode under `IllegalOpcodePolicy::Lock`.
    locked: bool,
}
