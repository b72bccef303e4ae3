/*!
control_flow.rs - Jump / call / return opcode family handler.

Covers:
  JMP adr        (0xC3; alias 0xCB)
  Jcc adr        (0xC2, 0xCA, 0xD2, 0xDA, 0xE2, 0xEA, 0xF2, 0xFA)
  CALL adr       (0xCD; aliases 0xDD, 0xED, 0xFD)
  Ccc adr        (0xC4, 0xCC, 0xD4, 0xDC, 0xE4, 0xEC, 0xF4, 0xFC)
  RET            (0xC9; alias 0xD9)
  Rcc            (0xC0, 0xC8, 0xD0, 0xD8, 0xE0, 0xE8, 0xF0, 0xF8)
  RST n          (0xC7, 0xCF, 0xD7, 0xDF, 0xE7, 0xEF, 0xF7, 0xFF)
  PCHL           (0xE9)

Behavior details
================
- PC has already advanced past the opcode, and operand fetches advance it
  past the immediate word, so CALL pushes the address of the following
  instruction and RST n pushes the address after its single byte.
- Condition codes live in bits 3-5 of the opcode: NZ Z NC C PO PE P M.
- Taken conditional CALL/RET add +6 over their not-taken base cost;
  conditional jumps cost the same either way. Untaken branches still fetch
  the immediate word (that keeps PC correct).
*/

use crate::bus::Bus;
use crate::cpu::state::{CARRY, CpuState, PARITY, SIGN, ZERO};

/// Extra cycles consumed by a taken conditional CALL or RET.
const TAKEN_PENALTY: u32 = 6;

pub(super) fn handle(opcode: u8, cpu: &mut CpuState, bus: &mut Bus, cycles: &mut u32) -> bool {
    match opcode {
        // ---------------- Jumps ----------------
        0xC3 | 0xCB => {
            cpu.pc = cpu.fetch_u16(bus);
        }
        0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => {
            let target = cpu.fetch_u16(bus);
            if condition(cpu, opcode >> 3) {
                cpu.pc = target;
            }
        }

        // ---------------- Calls ----------------
        0xCD | 0xDD | 0xED | 0xFD => {
            let target = cpu.fetch_u16(bus);
            let ret = cpu.pc;
            cpu.push_u16(bus, ret);
            cpu.pc = target;
        }
        0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => {
            let target = cpu.fetch_u16(bus);
            if condition(cpu, opcode >> 3) {
                let ret = cpu.pc;
                cpu.push_u16(bus, ret);
                cpu.pc = target;
                *cycles += TAKEN_PENALTY;
            }
        }

        // ---------------- Returns ----------------
        0xC9 | 0xD9 => {
            cpu.pc = cpu.pop_u16(bus);
        }
        0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => {
            if condition(cpu, opcode >> 3) {
                cpu.pc = cpu.pop_u16(bus);
                *cycles += TAKEN_PENALTY;
            }
        }

        // ---------------- Restarts ----------------
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            let ret = cpu.pc;
            cpu.push_u16(bus, ret);
            cpu.pc = (opcode & 0x38) as u16;
        }

        // ---------------- PCHL ----------------
        0xE9 => cpu.pc = cpu.hl(),

        _ => return false,
    }
    true
}

/// Evaluate the 3-bit condition code from opcode bits 3-5.
#[inline]
fn condition(cpu: &CpuState, code: u8) -> bool {
    match code & 0x07 {
        0 => !cpu.flag(ZERO),   // NZ
        1 => cpu.flag(ZERO),    // Z
        2 => !cpu.flag(CARRY),  // NC
        3 => cpu.flag(CARRY),   // C
        4 => !cpu.flag(PARITY), // PO
        5 => cpu.flag(PARITY),  // PE
        6 => !cpu.flag(SIGN),   // P
        _ => cpu.flag(SIGN),    // M
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::cpu_with_program;

    #[test]
    fn jmp_sets_pc() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xC3, 0x34, 0x12]);
        assert_eq!(cpu.step(&mut bus), 10);
        assert_eq!(cpu.state.pc, 0x1234);
    }

    #[test]
    fn jmp_alias_matches_canonical() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x21, 0x43]);
        cpu.step(&mut bus);
        assert_eq!(cpu.state.pc, 0x4321);
    }

    #[test]
    fn conditional_jump_not_taken_skips_operand() {
        // JNZ with Z set: falls through, still 10 cycles.
        let (mut cpu, mut bus) = cpu_with_program(&[0xAF, 0xC2, 0x00, 0x30]);
        cpu.step(&mut bus); // XRA A sets Z
        assert_eq!(cpu.step(&mut bus), 10);
        assert_eq!(cpu.state.pc, 4);
    }

    #[test]
    fn call_pushes_following_address() {
        // CALL at 0: return address 3 lands on the stack.
        let (mut cpu, mut bus) = cpu_with_program(&[0xCD, 0x00, 0x10]);
        cpu.state.sp = 0x2400;
        assert_eq!(cpu.step(&mut bus), 17);
        assert_eq!(cpu.state.pc, 0x1000);
        assert_eq!(cpu.state.sp, 0x23FE);
        assert_eq!(bus.read(0x23FE), 0x03);
        assert_eq!(bus.read(0x23FF), 0x00);
    }

    #[test]
    fn call_then_ret_round_trip() {
        // CALL 0x2000; at 0x2000 a RET bounces straight back.
        let (mut cpu, mut bus) = cpu_with_program(&[0xCD, 0x00, 0x20]);
        cpu.state.sp = 0x2400;
        bus.write(0x2000, 0xC9);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 10);
        assert_eq!(cpu.state.pc, 0x0003);
        assert_eq!(cpu.state.sp, 0x2400);
    }

    #[test]
    fn conditional_call_costs() {
        // CNZ with Z set: not taken, 11 cycles. Then CNZ with Z clear: 17.
        let (mut cpu, mut bus) = cpu_with_program(&[0xAF, 0xC4, 0x00, 0x20, 0x3C, 0xC4, 0x00, 0x20]);
        cpu.state.sp = 0x2400;
        cpu.step(&mut bus); // XRA A
        assert_eq!(cpu.step(&mut bus), 11);
        assert_eq!(cpu.state.pc, 4);
        cpu.step(&mut bus); // INR A clears Z
        assert_eq!(cpu.step(&mut bus), 17);
        assert_eq!(cpu.state.pc, 0x2000);
    }

    #[test]
    fn conditional_ret_costs() {
        // RC taken after STC: 11 cycles; RC untaken: 5.
        let (mut cpu, mut bus) = cpu_with_program(&[0x37, 0xD8]);
        cpu.state.sp = 0x23FE;
        bus.write(0x23FE, 0x50);
        bus.write(0x23FF, 0x20);
        cpu.step(&mut bus); // STC
        assert_eq!(cpu.step(&mut bus), 11);
        assert_eq!(cpu.state.pc, 0x2050);

        let (mut cpu, mut bus) = cpu_with_program(&[0xD8]);
        assert_eq!(cpu.step(&mut bus), 5);
        assert_eq!(cpu.state.pc, 1);
    }

    #[test]
    fn rst_pushes_next_and_vectors() {
        // RST 2 at address 0: pushes 1, jumps to 0x10.
        let (mut cpu, mut bus) = cpu_with_program(&[0xD7]);
        cpu.state.sp = 0x2400;
        assert_eq!(cpu.step(&mut bus), 11);
        assert_eq!(cpu.state.pc, 0x0010);
        assert_eq!(bus.read(0x23FE), 0x01);
        assert_eq!(bus.read(0x23FF), 0x00);
    }

    #[test]
    fn pchl_loads_pc_from_hl() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xE9]);
        cpu.state.set_hl(0x1D03);
        assert_eq!(cpu.step(&mut bus), 5);
        assert_eq!(cpu.state.pc, 0x1D03);
    }

    #[test]
    fn sign_condition_follows_bit7() {
        // ORA A refreshes flags from A=0x80, then JM is taken.
        let (mut cpu, mut bus) = cpu_with_program(&[0xB7, 0xFA, 0x00, 0x21]);
        cpu.state.a = 0x80;
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.state.pc, 0x2100);
    }

    #[test]
    fn parity_condition_follows_population_count() {
        // ORA A with A=0x03 (even parity), then JPE is taken.
        let (mut cpu, mut bus) = cpu_with_program(&[0xB7, 0xEA, 0x00, 0x22]);
        cpu.state.a = 0x03;
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.state.pc, 0x2200);
    }
}
