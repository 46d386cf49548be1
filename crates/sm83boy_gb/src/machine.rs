mod cartridge;
mod gameboy;
mod mmu;

pub use cartridge::{CartHeader, Cartridge, Mapper, NoMbc};
pub use gameboy::GameBoy;
pub use mmu::Mmu;

/// Total addressable memory for the Game Boy (64 KiB).
///
/// Everything outside the cartridge window lives in one flat array; the
/// MMU only special-cases echo RAM and LY.
const MEMORY_SIZE: usize = 0x10000;
