use crate::config::GameBoyConfig;
use crate::cpu::{Cpu, CpuState};
use crate::error::CartridgeError;
use crate::CYCLES_PER_FRAME;

use super::{CartHeader, Cartridge, Mmu};

/// Cycles charged for a step that executed nothing (illegal opcode) so a
/// frame loop always makes progress.
const STALLED_STEP_CYCLES: u32 = 4;

/// High-level Game Boy machine.
///
/// Owns the CPU and the MMU (which in turn owns the cartridge). Front-ends
/// and test harnesses drive it one instruction or one frame at a time.
#[derive(Clone, Debug)]
pub struct GameBoy {
    pub cpu: Cpu,
    mmu: Mmu,
    config: GameBoyConfig,
}

impl GameBoy {
    pub fn new(mut cartridge: Cartridge, config: GameBoyConfig) -> Self {
        cartridge.set_rom_write_policy(config.rom_write_policy);
        Self {
            cpu: Cpu::with_illegal_opcode_policy(config.illegal_opcode_policy),
            mmu: Mmu::new(cartridge),
            config,
        }
    }

    pub fn from_rom(rom: Vec<u8>, config: GameBoyConfig) -> Result<Self, CartridgeError> {
        Ok(Self::new(Cartridge::from_bytes(rom)?, config))
    }

    /// Machine on a blank ROM-only cartridge with zeroed memory.
    pub fn for_tests() -> Self {
        let mut gb = Self::new(Cartridge::blank(), GameBoyConfig::default());
        gb.init_for_tests();
        gb
    }

    /// Put the CPU back into the post-boot-ROM state. Memory and cartridge
    /// are left as they are.
    pub fn init(&mut self) {
        self.cpu.reset();
    }

    /// Reset everything for a fresh test case: blank cartridge, zeroed
    /// memory, boot-state registers.
    pub fn init_for_tests(&mut self) {
        let mut cartridge = Cartridge::blank();
        cartridge.set_rom_write_policy(self.config.rom_write_policy);
        self.mmu.reset(cartridge);
        self.cpu.reset();
    }

    /// Execute one instruction and return the T-cycles it took.
    pub fn step(&mut self) -> u32 {
        self.cpu.step(&mut self.mmu)
    }

    /// Step once and log the resulting CPU state.
    pub fn run(&mut self) -> u32 {
        let cycles = self.step();
        log::debug!("{}", self.cpu.state());
        cycles
    }

    /// Step until roughly one frame's worth of T-cycles has elapsed, or the
    /// CPU locks. Returns the cycles consumed.
    pub fn step_frame(&mut self) -> u32 {
        self.advance(CYCLES_PER_FRAME, false)
    }

    /// Like `step_frame` with a caller-chosen budget, logging the CPU
    /// state after every instruction the way `run` does.
    pub fn run_cycles(&mut self, budget: u32) -> u32 {
        self.advance(budget, true)
    }

    fn advance(&mut self, budget: u32, trace_state: bool) -> u32 {
        let mut elapsed = 0u32;
        while elapsed < budget && !self.cpu.is_locked() {
            let cycles = if trace_state { self.run() } else { self.step() };
            let taken = match cycles {
                0 => STALLED_STEP_CYCLES,
                cycles => cycles,
            };
            elapsed = elapsed.saturating_add(taken);
        }
        elapsed
    }

    #[inline]
    pub fn state(&self) -> CpuState {
        self.cpu.state()
    }

    #[inline]
    pub fn set_state(&mut self, state: CpuState) {
        self.cpu.set_state(state);
    }

    #[inline]
    pub fn memory_read(&self, addr: u16) -> u8 {
        self.mmu.read(addr)
    }

    #[inline]
    pub fn memory_write(&mut self, addr: u16, value: u8) {
        self.mmu.write(addr, value);
    }

    pub fn cartridge_header(&self) -> &CartHeader {
        self.mmu.cartridge().header()
    }

    pub fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    pub fn config(&self) -> GameBoyConfig {
        self.config
    }
}
