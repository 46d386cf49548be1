use crate::config::RomWritePolicy;

/// ROM-only cartridge: the 32 KiB window maps straight onto the ROM image
/// with no bank switching.
#[derive(Clone, Debug, Default)]
pub struct NoMbc {
    rom_write_policy: RomWritePolicy,
}

impl NoMbc {
    pub fn rom_write_policy(&self) -> RomWritePolicy {
        self.rom_write_policy
    }

    pub(super) fn set_rom_write_policy(&mut self, policy: RomWritePolicy) {
        self.rom_write_policy = policy;
    }

    /// Bytes past the end of a short image read as an open bus (0xFF).
    pub(super) fn rom_read(&self, rom: &[u8], addr: u16) -> u8 {
        rom.get(addr as usize).copied().unwrap_or(0xFF)
    }

    pub(super) fn rom_write(&mut self, rom: &mut [u8], addr: u16, value: u8) {
        if self.rom_write_policy == RomWritePolicy::Ignore {
            log::trace!("dropped ROM write {value:#04X} -> {addr:#06X}");
            return;
        }
        match rom.get_mut(addr as usize) {
            Some(byte) => *byte = value,
            None => log::trace!("ROM write past end of image at {addr:#06X}"),
        }
    }
}
