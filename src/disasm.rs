/*!
8080 disassembler used by the instruction trace.

`format` renders one instruction from its opcode and the two bytes that
follow (ignored when the instruction is shorter); `instruction_len` gives
the encoded length in bytes. The MOV and ALU quadrants are decoded from
their register fields, everything else comes from a fixed table. Alias
slots print their canonical mnemonic.
*/

/// Register field names, index 0-7 (M is the byte at HL).
const REGS: [&str; 8] = ["B", "C", "D", "E", "H", "L", "M", "A"];
/// ALU family names for the 0x80-0xBF quadrant, index (op >> 3) & 7.
const ALU_OPS: [&str; 8] = ["ADD", "ADC", "SUB", "SBB", "ANA", "XRA", "ORA", "CMP"];

/// Encoded instruction length in bytes (1, 2 or 3).
pub fn instruction_len(op: u8) -> u16 {
    match op {
        // LXI rp,d16; SHLD/LHLD; STA/LDA; jumps and calls
        0x01 | 0x11 | 0x21 | 0x31 | 0x22 | 0x2A | 0x32 | 0x3A => 3,
        0xC2 | 0xC3 | 0xC4 | 0xCA | 0xCB | 0xCC | 0xCD => 3,
        0xD2 | 0xD4 | 0xDA | 0xDC | 0xDD => 3,
        0xE2 | 0xE4 | 0xEA | 0xEC | 0xED => 3,
        0xF2 | 0xF4 | 0xFA | 0xFC | 0xFD => 3,
        // MVI r,d8; immediate ALU; IN/OUT
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => 2,
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => 2,
        0xD3 | 0xDB => 2,
        _ => 1,
    }
}

/// Render one instruction. `lo` and `hi` are the bytes after the opcode.
pub fn format(op: u8, lo: u8, hi: u8) -> String {
    let name = match op {
        0x76 => return "HLT".to_string(),
        0x40..=0x7F => {
            let dst = REGS[(op as usize >> 3) & 7];
            let src = REGS[op as usize & 7];
            return format!("MOV    {dst},{src}");
        }
        0x80..=0xBF => {
            let family = ALU_OPS[(op as usize >> 3) & 7];
            let src = REGS[op as usize & 7];
            return format!("{family:<6} {src}");
        }
        _ => fixed_name(op),
    };
    match instruction_len(op) {
        2 => format!("{name:<6} #${lo:02x}"),
        3 => format!("{name:<6} ${:04x}", (hi as u16) << 8 | lo as u16),
        _ => name.to_string(),
    }
}

fn fixed_name(op: u8) -> &'static str {
    match op {
        0x01 => "LXI B,",
        0x02 => "STAX B",
        0x03 => "INX B",
        0x04 => "INR B",
        0x05 => "DCR B",
        0x06 => "MVI B,",
        0x07 => "RLC",
        0x09 => "DAD B",
        0x0A => "LDAX B",
        0x0B => "DCX B",
        0x0C => "INR C",
        0x0D => "DCR C",
        0x0E => "MVI C,",
        0x0F => "RRC",
        0x11 => "LXI D,",
        0x12 => "STAX D",
        0x13 => "INX D",
        0x14 => "INR D",
        0x15 => "DCR D",
        0x16 => "MVI D,",
        0x17 => "RAL",
        0x19 => "DAD D",
        0x1A => "LDAX D",
        0x1B => "DCX D",
        0x1C => "INR E",
        0x1D => "DCR E",
        0x1E => "MVI E,",
        0x1F => "RAR",
        0x21 => "LXI H,",
        0x22 => "SHLD",
        0x23 => "INX H",
        0x24 => "INR H",
        0x25 => "DCR H",
        0x26 => "MVI H,",
        0x27 => "DAA",
        0x29 => "DAD H",
        0x2A => "LHLD",
        0x2B => "DCX H",
        0x2C => "INR L",
        0x2D => "DCR L",
        0x2E => "MVI L,",
        0x2F => "CMA",
        0x31 => "LXI SP,",
        0x32 => "STA",
        0x33 => "INX SP",
        0x34 => "INR M",
        0x35 => "DCR M",
        0x36 => "MVI M,",
        0x37 => "STC",
        0x39 => "DAD SP",
        0x3A => "LDA",
        0x3B => "DCX SP",
        0x3C => "INR A",
        0x3D => "DCR A",
        0x3E => "MVI A,",
        0x3F => "CMC",
        0xC0 => "RNZ",
        0xC1 => "POP B",
        0xC2 => "JNZ",
        0xC3 | 0xCB => "JMP",
        0xC4 => "CNZ",
        0xC5 => "PUSH B",
        0xC6 => "ADI",
        0xC7 => "RST 0",
        0xC8 => "RZ",
        0xC9 | 0xD9 => "RET",
        0xCA => "JZ",
        0xCC => "CZ",
        0xCD | 0xDD | 0xED | 0xFD => "CALL",
        0xCE => "ACI",
        0xCF => "RST 1",
        0xD0 => "RNC",
        0xD1 => "POP D",
        0xD2 => "JNC",
        0xD3 => "OUT",
        0xD4 => "CNC",
        0xD5 => "PUSH D",
        0xD6 => "SUI",
        0xD7 => "RST 2",
        0xD8 => "RC",
        0xDA => "JC",
        0xDB => "IN",
        0xDC => "CC",
        0xDE => "SBI",
        0xDF => "RST 3",
        0xE0 => "RPO",
        0xE1 => "POP H",
        0xE2 => "JPO",
        0xE3 => "XTHL",
        0xE4 => "CPO",
        0xE5 => "PUSH H",
        0xE6 => "ANI",
        0xE7 => "RST 4",
        0xE8 => "RPE",
        0xE9 => "PCHL",
        0xEA => "JPE",
        0xEB => "XCHG",
        0xEC => "CPE",
        0xEE => "XRI",
        0xEF => "RST 5",
        0xF0 => "RP",
        0xF1 => "POP PSW",
        0xF2 => "JP",
        0xF3 => "DI",
        0xF4 => "CP",
        0xF5 => "PUSH PSW",
        0xF6 => "ORI",
        0xF7 => "RST 6",
        0xF8 => "RM",
        0xF9 => "SPHL",
        0xFA => "JM",
        0xFB => "EI",
        0xFC => "CM",
        0xFE => "CPI",
        0xFF => "RST 7",
        _ => "NOP",
    }
}
