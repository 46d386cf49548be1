use std::fmt;

use super::{Cpu, Registers};

/// Plain snapshot of everything the CPU owns.
///
/// Test harnesses use this to inject a starting state and read back the
/// result of a single step without going through instructions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CpuState {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub f: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    pub ime: bool,
}

impl fmt::Display for CpuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A:{:02X} F:{:02X} B:{:02X} C:{:02X} D:{:02X} E:{:02X} H:{:02X} L:{:02X} SP:{:04X} PC:{:04X} IME:{}",
            self.a,
            self.f,
            self.b,
            self.c,
            self.d,
            self.e,
            self.h,
            self.l,
            self.sp,
            self.pc,
            u8::from(self.ime),
        )
    }
}

impl Cpu {
    pub fn state(&self) -> CpuState {
        let Registers {
            a,
            f,
            b,
            c,
            d,
            e,
            h,
            l,
            sp,
            pc,
        } = self.regs;
        CpuState {
            a,
            b,
            c,
            d,
            e,
            f,
            h,
            l,
            sp,
            pc,
            ime: self.ime,
        }
    }

    /// Overwrite the register file and IME with `state`.
    ///
    /// The low nibble of F is masked off; it can never hold data.
    pub fn set_state(&mut self, state: CpuState) {
        self.regs = Registers {
            a: state.a,
            f: state.f & 0xF0,
            b: state.b,
            c: state.c,
            d: state.d,
            e: state.e,
            h: state.h,
            l: state.l,
            sp: state.sp,
            pc: state.pc,
        };
        self.ime = state.ime;
    }
}
