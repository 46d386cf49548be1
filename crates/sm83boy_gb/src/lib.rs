pub mod config;
pub mod cpu;
pub mod error;
pub mod machine;

pub use config::{GameBoyConfig, IllegalOpcodePolicy, RomWritePolicy};
pub use cpu::{Bus, Cpu, CpuState, Flag, Registers};
pub use error::CartridgeError;
pub use machine::{CartHeader, Cartridge, GameBoy, Mapper, Mmu};

/// DMG clock rate in T-cycles per second.
pub const CYCLES_PER_SECOND: u32 = 4_194_304;
/// T-cycles in one DMG frame (154 scanlines of 456 cycles).
pub const CYCLES_PER_FRAME: u32 = 70_224;
