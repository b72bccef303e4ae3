/*!
dispatch - Orchestrator for a single 8080 instruction step.

Overview
========
Coordinates one fetch/decode/execute round:
1. Fetch the opcode at PC (advancing PC past it).
2. Look up the base cycle cost.
3. Walk the family handler chain until one claims the opcode. Operand
   bytes are fetched by the handler that needs them, so PC always ends up
   past the full instruction.
4. Anything no family claims is NOP: 0x00 or one of the seven unassigned
   slots that behave identically. All 256 slots are therefore total and
   `step` cannot fail.

Cycle accounting
================
`step` returns the cycles the instruction consumed. Handlers that take a
conditional branch bump the count through the `&mut u32` they receive;
everything else is covered by the base table.

Register operand encoding
=========================
The 8080 encodes source operands in bits 0-2 and destinations in bits 3-5:
0=B 1=C 2=D 3=E 4=H 5=L 6=M (byte at HL) 7=A. The helpers here resolve a
3-bit code to a register read or write so the MOV block and the ALU block
collapse to a handful of match arms.
*/

pub(crate) mod arithmetic;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;

use crate::bus::Bus;
use crate::cpu::cycles::base_cycles;
use crate::cpu::state::CpuState;

/// Execute one instruction and return the machine cycles it consumed.
pub(crate) fn step(cpu: &mut CpuState, bus: &mut Bus) -> u32 {
    let opcode = cpu.fetch_u8(bus);
    let mut cycles = base_cycles(opcode);

    // Unclaimed slots are NOP (0x00 and the unassigned 0x08/0x10/0x18/
    // 0x20/0x28/0x30/0x38 aliases); PC and cycles are already correct.
    let _ = load_store::handle(opcode, cpu, bus)
        || arithmetic::handle(opcode, cpu, bus)
        || logical::handle(opcode, cpu, bus)
        || control_flow::handle(opcode, cpu, bus, &mut cycles)
        || misc::handle(opcode, cpu, bus);

    cycles
}

/// Read the register (or memory) operand selected by a 3-bit code.
#[inline]
pub(super) fn read_operand(cpu: &mut CpuState, bus: &mut Bus, code: u8) -> u8 {
    match code & 0x07 {
        0 => cpu.b,
        1 => cpu.c,
        2 => cpu.d,
        3 => cpu.e,
        4 => cpu.h,
        5 => cpu.l,
        6 => bus.read(cpu.hl()),
        _ => cpu.a,
    }
}

/// Write the register (or memory) operand selected by a 3-bit code.
#[inline]
pub(super) fn write_operand(cpu: &mut CpuState, bus: &mut Bus, code: u8, value: u8) {
    match code & 0x07 {
        0 => cpu.b = value,
        1 => cpu.c = value,
        2 => cpu.d = value,
        3 => cpu.e = value,
        4 => cpu.h = value,
        5 => cpu.l = value,
        6 => bus.write(cpu.hl(), value),
        _ => cpu.a = value,
    }
}
