//! Shared test utilities for wiring small 8080 programs into a CPU/Bus
//! pair or a full machine.
//!
//! These helpers de-duplicate setup across the CPU, bus and machine test
//! modules. Programs are injected through `Bus::load`, which bypasses the
//! ROM write guard the same way the real loader does. Machines are built
//! with pacing disabled so timing tests run flat out.

use crate::bus::Bus;
use crate::cpu::Cpu8080;
use crate::machine::{Machine, MachineOptions};
use crate::rom::{DIAG_ORIGIN, RomImage};

/// A CPU and a bus with `program` placed at $0000.
pub fn cpu_with_program(program: &[u8]) -> (Cpu8080, Bus) {
    let mut bus = Bus::new();
    bus.load(0x0000, program);
    (Cpu8080::new(), bus)
}

/// A cabinet machine with `program` as its ROM and pacing disabled.
pub fn machine_with_program(program: &[u8]) -> Machine {
    let rom = RomImage::from_bytes(program.to_vec(), 0);
    Machine::new(&rom, MachineOptions::default()).expect("machine construction")
}

/// A diagnostics-mode machine with `program` loaded at $0100.
pub fn diag_machine(program: &[u8]) -> Machine {
    let rom = RomImage::from_bytes(program.to_vec(), DIAG_ORIGIN);
    let options = MachineOptions {
        cpm_mode: true,
        ..MachineOptions::default()
    };
    Machine::new(&rom, options).expect("machine construction")
}
