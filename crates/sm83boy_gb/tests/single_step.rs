//! Golden tests in the SingleStepTests SM83 JSON format.
//!
//! Each case describes the registers and memory before and after one
//! instruction, plus one entry per M-cycle. A handful of hand-checked
//! fixtures live in `tests/data/`; the full upstream suite can be pointed
//! at with `SM83_TESTS_DIR` and run with `--ignored`.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::Deserialize;
use sm83boy_gb::{Bus, Cpu, CpuState};

/// Flat 64 KiB RAM bus.
struct TestBus {
    ram: Box<[u8]>,
}

impl TestBus {
    fn new() -> Self {
        Self {
            ram: vec![0; 0x10000].into_boxed_slice(),
        }
    }

    fn load_ram(&mut self, entries: &[(u16, u8)]) {
        for &(addr, value) in entries {
            self.ram[addr as usize] = value;
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }
}

#[derive(Deserialize)]
struct TestCase {
    name: String,
    initial: JsonState,
    #[serde(rename = "final")]
    final_state: JsonState,
    cycles: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct JsonState {
    pc: u16,
    sp: u16,
    a: u8,
    b: u8,
    c: u8,
    d: u8,
    e: u8,
    f: u8,
    h: u8,
    l: u8,
    ime: u8,
    ram: Vec<(u16, u8)>,
}

impl JsonState {
    fn cpu_state(&self) -> CpuState {
        CpuState {
            a: self.a,
            b: self.b,
            c: self.c,
            d: self.d,
            e: self.e,
            f: self.f,
            h: self.h,
            l: self.l,
            sp: self.sp,
            pc: self.pc,
            ime: self.ime != 0,
        }
    }
}

/// Run one case and return every mismatch found.
fn run_case(case: &TestCase) -> Vec<String> {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::new();
    bus.load_ram(&case.initial.ram);
    cpu.set_state(case.initial.cpu_state());

    let cycles = cpu.step(&mut bus);

    let mut errors = Vec::new();
    let expected_cycles = 4 * case.cycles.len() as u32;
    if cycles != expected_cycles {
        errors.push(format!("cycles: got {cycles}, want {expected_cycles}"));
    }

    let got = cpu.state();
    let want = case.final_state.cpu_state();
    for (name, actual, expected) in [
        ("A", got.a, want.a),
        ("F", got.f, want.f),
        ("B", got.b, want.b),
        ("C", got.c, want.c),
        ("D", got.d, want.d),
        ("E", got.e, want.e),
        ("H", got.h, want.h),
        ("L", got.l, want.l),
    ] {
        if actual != expected {
            errors.push(format!("{name}: got ${actual:02X}, want ${expected:02X}"));
        }
    }
    for (name, actual, expected) in [("SP", got.sp, want.sp), ("PC", got.pc, want.pc)] {
        if actual != expected {
            errors.push(format!("{name}: got ${actual:04X}, want ${expected:04X}"));
        }
    }
    if got.ime != want.ime {
        errors.push(format!("IME: got {}, want {}", got.ime, want.ime));
    }

    for &(addr, expected) in &case.final_state.ram {
        let actual = bus.peek(addr);
        if actual != expected {
            errors.push(format!(
                "RAM[${addr:04X}]: got ${actual:02X}, want ${expected:02X}"
            ));
        }
    }

    errors
}

fn load_cases(path: &Path) -> Vec<TestCase> {
    let data = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    serde_json::from_str(&data)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}

/// Run every case in `files`, returning "file [case]: errors" lines.
fn run_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a [TestCase])>) -> Vec<String> {
    let mut failures = Vec::new();
    for (file, cases) in files {
        for case in cases {
            let errors = run_case(case);
            if !errors.is_empty() {
                failures.push(format!("{file} [{}]: {}", case.name, errors.join(", ")));
            }
        }
    }
    failures
}

static BUNDLED: Lazy<Vec<(String, Vec<TestCase>)>> = Lazy::new(|| {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data");
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to list {}: {e}", dir.display()))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();

    entries
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            (name, load_cases(path))
        })
        .collect()
});

fn bundled(cb: bool) -> impl Iterator<Item = (&'static str, &'static [TestCase])> {
    BUNDLED
        .iter()
        .filter(move |(name, _)| name.starts_with("cb ") == cb)
        .map(|(name, cases)| (name.as_str(), cases.as_slice()))
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn bundled_base_opcodes() {
    init_logger();
    assert!(bundled(false).count() > 0, "no base opcode fixtures found");
    let failures = run_files(bundled(false));
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn bundled_cb_opcodes() {
    init_logger();
    assert!(bundled(true).count() > 0, "no CB fixtures found");
    let failures = run_files(bundled(true));
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

/// Opcodes whose upstream expectations depend on behaviour this core does
/// not model: STOP (low-power mode), HALT (waits for an interrupt) and EI
/// (one-instruction delay).
const UNMODELLED: [u8; 3] = [0x10, 0x76, 0xFB];

#[test]
#[ignore = "requires the SingleStepTests sm83 suite in SM83_TESTS_DIR"]
fn upstream_suite() {
    init_logger();
    let Some(dir) = std::env::var_os("SM83_TESTS_DIR").map(PathBuf::from) else {
        eprintln!("SM83_TESTS_DIR not set, skipping");
        return;
    };

    let mut files = Vec::new();
    for opcode in 0..=0xFFu8 {
        if opcode == 0xCB
            || UNMODELLED.contains(&opcode)
            || sm83boy_gb::cpu::is_illegal_opcode(opcode)
        {
            continue;
        }
        files.push(format!("{opcode:02x}.json"));
    }
    for opcode in 0..=0xFFu8 {
        files.push(format!("cb {opcode:02x}.json"));
    }

    let mut total_cases = 0usize;
    let mut failures = Vec::new();
    for file in &files {
        let path = dir.join(file);
        if !path.exists() {
            continue;
        }
        let cases = load_cases(&path);
        total_cases += cases.len();

        let file_failures = run_files([(file.as_str(), cases.as_slice())]);
        println!(
            "{file}: {}/{} passed",
            cases.len() - file_failures.len(),
            cases.len()
        );
        failures.extend(file_failures.into_iter().take(5));
    }

    println!("{total_cases} cases, {} failures shown", failures.len());
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
