/// Abstraction over the Game Boy bus as seen by the CPU.
///
/// The machine's `Mmu` implements this; tests plug in flat 64 KiB buses.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
}
