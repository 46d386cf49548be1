use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that prevent a cartridge (and therefore a `GameBoy`) from being
/// constructed.
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("no ROM file was selected")]
    EmptyPath,

    #[error("failed to open ROM file {path:?}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read ROM file {path:?}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ROM is {len} bytes, too small to contain the cartridge header")]
    HeaderTooSmall { len: usize },

    #[error("cartridge type 0x{0:02X} is not supported")]
    UnsupportedCartridgeType(u8),
}
