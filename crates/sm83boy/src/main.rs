use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sm83boy::RunOptions;
use sm83boy_gb::{GameBoyConfig, IllegalOpcodePolicy, RomWritePolicy};

/// Headless SM83 Game Boy runner.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to ROM file. Asks for one when omitted.
    rom: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Frame pacing target, 0 runs unthrottled
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Drop writes into the cartridge ROM area
    #[arg(long)]
    ignore_rom_writes: bool,

    /// Lock the CPU on an illegal opcode instead of carrying on
    #[arg(long)]
    lock_on_illegal: bool,
}

impl Args {
    fn config(&self) -> GameBoyConfig {
        GameBoyConfig::builder()
            .rom_write_policy(if self.ignore_rom_writes {
                RomWritePolicy::Ignore
            } else {
                RomWritePolicy::Allow
            })
            .illegal_opcode_policy(if self.lock_on_illegal {
                IllegalOpcodePolicy::Lock
            } else {
                IllegalOpcodePolicy::Continue
            })
            .build()
    }

    fn into_options(self) -> RunOptions {
        RunOptions::builder()
            .config(self.config())
            .rom_path(self.rom)
            .frames(self.frames)
            .fps(self.fps)
            .build()
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    match &args.rom {
        Some(path) => log::info!("Playing ROM path: '{}'", path.display()),
        None => log::info!("No ROM path provided, asking for one"),
    }

    sm83boy::run(args.into_options())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let options = Args::try_parse_from(["sm83boy"]).unwrap().into_options();

        assert_eq!(options.rom_path, None);
        assert_eq!(options.frames, None);
        assert_eq!(options.fps, 60);
        assert_eq!(options.config, GameBoyConfig::default());
    }

    #[test]
    fn flags_accept_separate_and_inline_values() {
        let args = Args::try_parse_from([
            "sm83boy",
            "game.gb",
            "--fps=30",
            "--frames",
            "120",
            "--ignore-rom-writes",
            "--lock-on-illegal",
        ])
        .unwrap();
        let options = args.into_options();

        assert_eq!(options.rom_path, Some(PathBuf::from("game.gb")));
        assert_eq!(options.frames, Some(120));
        assert_eq!(options.fps, 30);
        assert_eq!(options.config.rom_write_policy, RomWritePolicy::Ignore);
        assert_eq!(
            options.config.illegal_opcode_policy,
            IllegalOpcodePolicy::Lock
        );
    }

    #[test]
    fn bad_frame_count_is_rejected() {
        assert!(Args::try_parse_from(["sm83boy", "--frames", "many"]).is_err());
        assert!(Args::try_parse_from(["sm83boy", "--turbo"]).is_err());
    }
}
