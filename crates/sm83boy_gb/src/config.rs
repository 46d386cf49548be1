use typed_builder::TypedBuilder;

/// What the CPU does after decoding one of the unassigned opcode slots
/// (D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD).
///
/// In both cases the error is logged, `pc` has already moved past the
/// offending byte and the step reports 0 cycles.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum IllegalOpcodePolicy {
    /// Carry on decoding at the next byte.
    #[default]
    Continue,
    /// Hard-lock the CPU like the real hardware does: every further `step`
    /// returns 0 cycles until the CPU is reset.
    Lock,
}

/// Whether writes into the cartridge ROM window reach a ROM-only
/// cartridge's backing buffer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum RomWritePolicy {
    /// Writes land in the ROM buffer. Test fixtures rely on this to place
    /// code and data anywhere in the address space.
    #[default]
    Allow,
    /// Writes are dropped, matching physically read-only cartridges.
    Ignore,
}

/// Machine-level options for a `GameBoy`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct GameBoyConfig {
    #[builder(default)]
    pub illegal_opcode_policy: IllegalOpcodePolicy,
    #[builder(default)]
    pub rom_write_policy: RomWritePolicy,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
