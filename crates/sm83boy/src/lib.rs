use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sm83boy_common::dialog::{FilePicker, FixedPath};
use sm83boy_gb::{Cartridge, GameBoy, GameBoyConfig, CYCLES_PER_FRAME, CYCLES_PER_SECOND};
use typed_builder::TypedBuilder;

/// How the headless runner should load and drive a cartridge.
#[derive(Clone, Debug, TypedBuilder)]
pub struct RunOptions {
    /// ROM to load. When absent the user is asked through a file picker.
    #[builder(default)]
    pub rom_path: Option<PathBuf>,
    /// Stop after this many frames. Runs until the CPU locks otherwise.
    #[builder(default)]
    pub frames: Option<u64>,
    /// Frame pacing target; 0 runs unthrottled.
    #[builder(default = 60)]
    pub fps: u32,
    #[builder(default = CYCLES_PER_FRAME)]
    pub cycles_per_frame: u32,
    #[builder(default)]
    pub config: GameBoyConfig,
}

/// What a finished run did.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub cycles: u64,
    pub locked: bool,
}

impl RunSummary {
    /// Wall-clock time the executed cycles take on real hardware.
    pub fn emulated_time(&self) -> Duration {
        Duration::from_secs_f64(self.cycles as f64 / f64::from(CYCLES_PER_SECOND))
    }
}

pub fn run(options: RunOptions) -> Result<RunSummary> {
    let cartridge = match &options.rom_path {
        Some(path) => open_cartridge(&mut FixedPath::new(path))?,
        #[cfg(feature = "native-dialog")]
        None => open_cartridge(&mut sm83boy_common::dialog::NativeDialog)?,
        #[cfg(not(feature = "native-dialog"))]
        None => open_cartridge(&mut sm83boy_common::dialog::PromptPicker::stdio())?,
    };
    let mut gb = GameBoy::new(cartridge, options.config);
    gb.init();

    log::info!("Running \"{}\"", gb.cartridge_header().title);
    Ok(run_machine(&mut gb, &options))
}

fn open_cartridge<P: FilePicker + ?Sized>(picker: &mut P) -> Result<Cartridge> {
    Cartridge::open(picker).context("Failed to load cartridge")
}

/// Drive `gb` frame by frame, sleeping off whatever is left of each frame's
/// time slice.
pub fn run_machine(gb: &mut GameBoy, options: &RunOptions) -> RunSummary {
    let target_frame = match options.fps {
        0 => Duration::ZERO,
        fps => Duration::from_secs(1) / fps,
    };

    let mut summary = RunSummary::default();
    loop {
        if options.frames.is_some_and(|limit| summary.frames >= limit) {
            break;
        }

        let frame_start = Instant::now();
        summary.cycles += u64::from(gb.run_cycles(options.cycles_per_frame));
        summary.frames += 1;

        if gb.cpu.is_locked() {
            log::warn!(
                "CPU locked at {:#06X} after {} frames",
                gb.state().pc,
                summary.frames
            );
            summary.locked = true;
            break;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < target_frame {
            std::thread::sleep(target_frame - elapsed);
        }
    }

    log::info!(
        "Stopped after {} frames ({} cycles, {:.3}s emulated)",
        summary.frames,
        summary.cycles,
        summary.emulated_time().as_secs_f64()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use sm83boy_gb::{CartHeader, IllegalOpcodePolicy};

    fn rom_with_program(program: &[u8]) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x0134..0x0134 + 6].copy_from_slice(b"RUNNER");
        rom[0x0147] = 0x01;
        rom[0x014D] = CartHeader::computed_header_checksum(&rom);
        rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
        rom
    }

    #[test]
    fn runs_requested_number_of_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runner.gb");
        // JR -2: spin forever.
        std::fs::write(&path, rom_with_program(&[0x18, 0xFE])).unwrap();

        let options = RunOptions::builder()
            .rom_path(Some(path))
            .frames(Some(3))
            .fps(0)
            .cycles_per_frame(120)
            .build();
        let summary = run(options).unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.cycles, 3 * 120);
        assert!(!summary.locked);
    }

    #[test]
    fn stops_when_cpu_locks() {
        let config = GameBoyConfig::builder()
            .illegal_opcode_policy(IllegalOpcodePolicy::Lock)
            .build();
        // NOP, NOP, illegal.
        let mut gb = GameBoy::from_rom(rom_with_program(&[0x00, 0x00, 0xD3]), config).unwrap();
        let options = RunOptions::builder().fps(0).build();

        let summary = run_machine(&mut gb, &options);
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.cycles, 8 + 4);
        assert!(summary.locked);
    }

    #[test]
    fn emulated_time_uses_dmg_clock() {
        let summary = RunSummary {
            frames: 60,
            cycles: u64::from(CYCLES_PER_SECOND),
            locked: false,
        };
        assert_eq!(summary.emulated_time(), Duration::from_secs(1));

        let frame = RunSummary {
            cycles: u64::from(CYCLES_PER_FRAME),
            ..RunSummary::default()
        };
        let millis = frame.emulated_time().as_secs_f64() * 1000.0;
        assert!((millis - 16.74).abs() < 0.01, "{millis}");
    }

    #[test]
    fn missing_rom_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions::builder()
            .rom_path(Some(dir.path().join("nope.gb")))
            .fps(0)
            .build();

        let err = run(options).unwrap_err();
        assert_eq!(err.to_string(), "Failed to load cartridge");
        assert!(err.chain().count() >= 2);
    }
}
