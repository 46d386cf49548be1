use crate::cpu::Bus;

use super::{Cartridge, MEMORY_SIZE};

/// LY (current scanline). There is no PPU yet, so reads report line 144,
/// the first VBlank line, which is what most boot loops wait for.
const LY_ADDR: u16 = 0xFF44;
const LY_STUB_VALUE: u8 = 0x90;

/// Distance between echo RAM (0xE000..=0xFDFF) and the WRAM it mirrors.
const ECHO_OFFSET: u16 = 0x2000;

/// Memory bus: routes CPU accesses to the cartridge or to internal memory.
///
/// Memory map:
/// - 0x0000..=0x7FFF cartridge ROM (through the mapper)
/// - 0x8000..=0x9FFF VRAM
/// - 0xA000..=0xBFFF external RAM (placeholder, backed internally)
/// - 0xC000..=0xDFFF WRAM
/// - 0xE000..=0xFDFF echo of 0xC000..=0xDDFF
/// - 0xFE00..=0xFE9F OAM, 0xFEA0..=0xFEFF unusable
/// - 0xFF00..=0xFF7F I/O (LY reads as a constant)
/// - 0xFF80..=0xFFFE HRAM, 0xFFFF IE
#[derive(Clone, Debug)]
pub struct Mmu {
    memory: Box<[u8]>,
    cartridge: Cartridge,
}

impl Mmu {
    pub fn new(cartridge: Cartridge) -> Self {
        Self {
            memory: vec![0; MEMORY_SIZE].into_boxed_slice(),
            cartridge,
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_read(addr),
            0xE000..=0xFDFF => self.memory[(addr - ECHO_OFFSET) as usize],
            LY_ADDR => LY_STUB_VALUE,
            _ => self.memory[addr as usize],
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_write(addr, value),
            0xE000..=0xFDFF => self.memory[(addr - ECHO_OFFSET) as usize] = value,
            _ => self.memory[addr as usize] = value,
        }
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    /// Swap in a new cartridge and clear internal memory.
    pub fn reset(&mut self, cartridge: Cartridge) {
        self.memory.fill(0);
        self.cartridge = cartridge;
    }
}

impl Bus for Mmu {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }
}
