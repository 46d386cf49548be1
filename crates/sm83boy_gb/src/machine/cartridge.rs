mod nombc;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sm83boy_common::bits::concat_bytes;
use sm83boy_common::dialog::FilePicker;

use crate::config::RomWritePolicy;
use crate::error::CartridgeError;

pub use nombc::NoMbc;

pub const ROM_DIALOG_TITLE: &str = "Open GB ROM File";
pub const ROM_DIALOG_FILTERS: &[&str] = &["*.gb"];
pub const ROM_DIALOG_DESCRIPTION: &str = "Game Boy ROMs";

/// Shortest image accepted as having a header at all.
const MIN_ROM_LEN: usize = 325;

const TITLE_START: usize = 0x0134;
const TITLE_END: usize = 0x0143;
const CART_TYPE: usize = 0x0147;
const ROM_SIZE: usize = 0x0148;
const RAM_SIZE: usize = 0x0149;
const HEADER_CHECKSUM: usize = 0x014D;
const GLOBAL_CHECKSUM: usize = 0x014E;

const RAM_BANK_SIZE: usize = 8 * 1024;
const BLANK_ROM_SIZE: usize = 32 * 1024;

/// Cartridge type byte of a plain ROM-only cartridge.
pub const CART_TYPE_ROM_ONLY: u8 = 0x01;

/// Metadata parsed from the cartridge header (Pan Docs, "The Cartridge
/// Header").
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CartHeader {
    pub title: String,
    pub cart_type: u8,
    /// Number of 16 KiB ROM banks.
    pub rom_banks: u16,
    /// Number of 8 KiB external RAM banks.
    pub ram_banks: u8,
    pub header_checksum: u8,
    pub global_checksum: u16,
}

impl CartHeader {
    pub fn parse(rom: &[u8]) -> Result<Self, CartridgeError> {
        if rom.len() < MIN_ROM_LEN {
            return Err(CartridgeError::HeaderTooSmall { len: rom.len() });
        }

        // The type, size and checksum bytes sit past the minimum length;
        // a short image reads them as zero.
        let byte = |index: usize| rom.get(index).copied().unwrap_or(0);

        let title = rom[TITLE_START..=TITLE_END]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect();

        let rom_size_code = byte(ROM_SIZE);
        let rom_banks = match rom_size_code {
            0x00..=0x08 => 2u16 << rom_size_code,
            0x52 => 72,
            0x53 => 80,
            0x54 => 96,
            other => {
                log::warn!("Unknown ROM size code in cartridge header: {other:#04X}");
                0
            }
        };

        let ram_banks = match byte(RAM_SIZE) {
            0x00 | 0x01 => 0,
            0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            other => {
                log::warn!("Unknown value given for number of RAM banks: {other:#04X}");
                0
            }
        };

        Ok(Self {
            title,
            cart_type: byte(CART_TYPE),
            rom_banks,
            ram_banks,
            header_checksum: byte(HEADER_CHECKSUM),
            // 0x14E is the low byte, 0x14F the high byte.
            global_checksum: concat_bytes(byte(GLOBAL_CHECKSUM), byte(GLOBAL_CHECKSUM + 1)),
        })
    }

    /// The checksum the boot ROM verifies over 0x0134..=0x014C.
    pub fn computed_header_checksum(rom: &[u8]) -> u8 {
        rom.get(TITLE_START..HEADER_CHECKSUM)
            .unwrap_or_default()
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1))
    }

    pub fn ram_size(&self) -> usize {
        self.ram_banks as usize * RAM_BANK_SIZE
    }
}

/// Bank-switching strategy of a cartridge.
#[derive(Clone, Debug)]
pub enum Mapper {
    NoMbc(NoMbc),
}

impl Mapper {
    pub fn rom_read(&self, rom: &[u8], addr: u16) -> u8 {
        match self {
            Mapper::NoMbc(m) => m.rom_read(rom, addr),
        }
    }

    pub fn rom_write(&mut self, rom: &mut [u8], addr: u16, value: u8) {
        match self {
            Mapper::NoMbc(m) => m.rom_write(rom, addr, value),
        }
    }

    fn set_rom_write_policy(&mut self, policy: RomWritePolicy) {
        match self {
            Mapper::NoMbc(m) => m.set_rom_write_policy(policy),
        }
    }
}

/// Pick the mapper for a header cartridge type byte.
pub fn select_mapper(cart_type: u8) -> Result<Mapper, CartridgeError> {
    match cart_type {
        CART_TYPE_ROM_ONLY => Ok(Mapper::NoMbc(NoMbc::default())),
        other => Err(CartridgeError::UnsupportedCartridgeType(other)),
    }
}

/// A loaded cartridge: ROM image, external RAM and the mapper that routes
/// CPU accesses into them.
#[derive(Clone, Debug)]
pub struct Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    header: CartHeader,
    mapper: Mapper,
}

impl Cartridge {
    /// Ask `picker` for a ROM file and read it fully into memory.
    pub fn load<P: FilePicker + ?Sized>(picker: &mut P) -> Result<Vec<u8>, CartridgeError> {
        let path = picker.open_file(ROM_DIALOG_TITLE, ROM_DIALOG_FILTERS, ROM_DIALOG_DESCRIPTION);
        if path.is_empty() {
            return Err(CartridgeError::EmptyPath);
        }
        Self::load_path(path)
    }

    pub fn load_path(path: impl AsRef<Path>) -> Result<Vec<u8>, CartridgeError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(CartridgeError::EmptyPath);
        }

        let mut file = File::open(path).map_err(|source| CartridgeError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let mut rom = Vec::new();
        file.read_to_end(&mut rom)
            .map_err(|source| CartridgeError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;

        log::info!("Loaded ROM: {} ({} bytes)", path.display(), rom.len());
        Ok(rom)
    }

    /// Pick a file, load it and build the cartridge in one go.
    pub fn open<P: FilePicker + ?Sized>(picker: &mut P) -> Result<Self, CartridgeError> {
        Self::from_bytes(Self::load(picker)?)
    }

    pub fn from_bytes(rom: Vec<u8>) -> Result<Self, CartridgeError> {
        let header = CartHeader::parse(&rom)?;

        let computed = CartHeader::computed_header_checksum(&rom);
        if computed != header.header_checksum {
            log::warn!(
                "Header checksum mismatch: stored {:#04X}, computed {:#04X}",
                header.header_checksum,
                computed
            );
        }

        let mapper = select_mapper(header.cart_type)?;
        let ram = vec![0; header.ram_size()];

        log::info!(
            "Cartridge \"{}\": type {:#04X}, {} ROM banks, {} RAM banks",
            header.title,
            header.cart_type,
            header.rom_banks,
            header.ram_banks
        );

        Ok(Self {
            rom,
            ram,
            header,
            mapper,
        })
    }

    /// Zero-filled 32 KiB ROM-only cartridge with a valid header checksum.
    pub fn blank() -> Self {
        let mut rom = vec![0; BLANK_ROM_SIZE];
        rom[CART_TYPE] = CART_TYPE_ROM_ONLY;
        rom[HEADER_CHECKSUM] = CartHeader::computed_header_checksum(&rom);

        let header = CartHeader {
            cart_type: CART_TYPE_ROM_ONLY,
            rom_banks: 2,
            header_checksum: rom[HEADER_CHECKSUM],
            ..CartHeader::default()
        };

        Self {
            rom,
            ram: Vec::new(),
            header,
            mapper: Mapper::NoMbc(NoMbc::default()),
        }
    }

    #[inline]
    pub fn rom_read(&self, addr: u16) -> u8 {
        self.mapper.rom_read(&self.rom, addr)
    }

    #[inline]
    pub fn rom_write(&mut self, addr: u16, value: u8) {
        self.mapper.rom_write(&mut self.rom, addr, value);
    }

    pub fn set_rom_write_policy(&mut self, policy: RomWritePolicy) {
        self.mapper.set_rom_write_policy(policy);
    }

    pub fn header(&self) -> &CartHeader {
        &self.header
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    /// External RAM backing store, sized from the header.
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }
}
