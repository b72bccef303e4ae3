/*!
cycles.rs - Machine-cycle costs for the 8080 instruction set.

`base_cycles(op)` is the unconditional cost of an opcode. Conditional CALL
and RET are listed at their not-taken cost; the control-flow handler adds
the +6 taken penalty. Conditional jumps cost 10 either way.

Every one of the 256 slots is covered: the seven unassigned 8080 slots are
NOPs at 4 cycles, and the alias slots (0xCB JMP, 0xD9 RET, 0xDD/0xED/0xFD
CALL) cost the same as their canonical encodings.
*/

/// Return the base cycle count for an 8080 opcode.
pub(crate) fn base_cycles(op: u8) -> u32 {
    match op {
        // Memory-operand variants of the register groups below.
        0x34 | 0x35 | 0x36 => 10, // INR M / DCR M / MVI M
        0x76 => 7,                // HLT

        // LXI rp,d16
        0x01 | 0x11 | 0x21 | 0x31 => 10,
        // STAX / LDAX
        0x02 | 0x12 | 0x0A | 0x1A => 7,
        // INX / DCX (no flags)
        0x03 | 0x13 | 0x23 | 0x33 | 0x0B | 0x1B | 0x2B | 0x3B => 5,
        // INR / DCR r
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x3C => 5,
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x3D => 5,
        // MVI r,d8
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x3E => 7,
        // Rotates and flag complements
        0x07 | 0x0F | 0x17 | 0x1F | 0x2F | 0x37 | 0x3F | 0x27 => 4,
        // DAD rp
        0x09 | 0x19 | 0x29 | 0x39 => 10,
        // SHLD / LHLD
        0x22 | 0x2A => 16,
        // STA / LDA
        0x32 | 0x3A => 13,

        // MOV r,r' (M as source or destination costs 7)
        0x40..=0x7F => {
            if op & 0x07 == 6 || (op >> 3) & 0x07 == 6 {
                7
            } else {
                5
            }
        }

        // ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r
        0x80..=0xBF => {
            if op & 0x07 == 6 {
                7
            } else {
                4
            }
        }

        // Conditional RET (not taken; +6 when taken)
        0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => 5,
        // POP / PUSH rp
        0xC1 | 0xD1 | 0xE1 | 0xF1 => 10,
        0xC5 | 0xD5 | 0xE5 | 0xF5 => 11,
        // Jumps (conditional or not)
        0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA | 0xC3 | 0xCB => 10,
        // Conditional CALL (not taken; +6 when taken)
        0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => 11,
        // CALL and its aliases
        0xCD | 0xDD | 0xED | 0xFD => 17,
        // Immediate ALU
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => 7,
        // RST n
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => 11,
        // RET and its alias
        0xC9 | 0xD9 => 10,
        // OUT / IN
        0xD3 | 0xDB => 10,
        // XTHL
        0xE3 => 18,
        // PCHL / SPHL / XCHG
        0xE9 | 0xF9 | 0xEB => 5,
        // DI / EI
        0xF3 | 0xFB => 4,

        // NOP and the unassigned slots that alias it.
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representative_costs() {
        assert_eq!(base_cycles(0x00), 4); // NOP
        assert_eq!(base_cycles(0x08), 4); // unassigned -> NOP
        assert_eq!(base_cycles(0x01), 10); // LXI B
        assert_eq!(base_cycles(0x41), 5); // MOV B,C
        assert_eq!(base_cycles(0x46), 7); // MOV B,M
        assert_eq!(base_cycles(0x70), 7); // MOV M,B
        assert_eq!(base_cycles(0x76), 7); // HLT
        assert_eq!(base_cycles(0x86), 7); // ADD M
        assert_eq!(base_cycles(0x87), 4); // ADD A
        assert_eq!(base_cycles(0xC3), 10); // JMP
        assert_eq!(base_cycles(0xCD), 17); // CALL
        assert_eq!(base_cycles(0xC0), 5); // RNZ not taken
        assert_eq!(base_cycles(0xE3), 18); // XTHL
        assert_eq!(base_cycles(0x34), 10); // INR M
    }

    #[test]
    fn aliases_match_canonical() {
        assert_eq!(base_cycles(0xCB), base_cycles(0xC3));
        assert_eq!(base_cycles(0xD9), base_cycles(0xC9));
        assert_eq!(base_cycles(0xDD), base_cycles(0xCD));
        assert_eq!(base_cycles(0xED), base_cycles(0xCD));
        assert_eq!(base_cycles(0xFD), base_cycles(0xCD));
    }
}
