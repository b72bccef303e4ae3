#![doc = r#"
Rustvaders library crate.

A cycle-counted emulator core for the Intel 8080 as wired into the Taito/
Midway Space Invaders cabinet.

Modules:
- bus: 64 KiB memory fabric with ROM guard and RAM mirroring, plus I/O port
  routing to the cabinet peripherals
- cpu: 8080 core: registers/flags, ALU helpers, cycle table, and the
  per-family instruction dispatcher
- disasm: 8080 mnemonic table backing the instruction trace
- input: button state translated into the cabinet's three read ports
- machine: frame scheduler gating RST 1/RST 2 to half-frame boundaries,
  plus the CP/M diagnostics harness
- rom: four-bank cabinet ROM set and single-file diagnostic loading
- shifter: the MB14241 bit-shift register peripheral
- sound: OUT 3/5 latches with rising-edge sample events
- video: packed 1-bpp VRAM to a rotated RGBA frame

In tests, shared program builders are available under `crate::test_utils`.
"#]

// Core emulator modules
pub mod bus;
pub mod cpu;
pub mod disasm;
pub mod input;
pub mod machine;
pub mod rom;
pub mod shifter;
pub mod sound;
pub mod video;

// Re-export commonly used types at the crate root for convenience.
pub use bus::Bus;
pub use cpu::Cpu8080;
pub use machine::Machine;
pub use rom::RomImage;

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
