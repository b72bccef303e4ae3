/*!
Machine glue: the frame scheduler that interleaves CPU stepping with
interrupt injection, video extraction and real-time pacing.

Timing model
============
The 2 MHz 8080 executes ~33 333 cycles per 60 Hz frame. The cabinet raises
RST 1 when the CRT beam reaches mid-screen (~scan line 96) and RST 2 at
end-of-frame (scan line 224). The scheduler mirrors that: it steps
instructions until the cycle accumulator crosses 16 667 (mid) or 33 333
(end) with interrupts enabled, waits out the remainder of the 1/120 s
half-frame against the host monotonic clock, then injects the interrupt and
extracts a fresh frame. Crossing the end boundary resets the accumulator;
crossing the mid boundary clamps it so overshoot does not accumulate drift.

The interpreter itself never reads the host clock; pacing lives entirely
here, which keeps instruction execution deterministic and replayable.

Diagnostics mode
================
With `cpm_mode` set, the machine starts PC at $0100, lifts the memory
guards, seeds OUT 1; RET at the BDOS entry ($0005) and intercepts calls to
it: C=2 prints the character in E, C=9 the $-terminated string at DE. The
run ends on a warm-boot jump to $0000 or when the binary reports through
OUT 1. No interrupts and no pacing; diagnostic binaries run flat out.
*/

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::bus::Bus;
use crate::cpu::Cpu8080;
use crate::disasm;
use crate::input::Button;
use crate::rom::{DIAG_ORIGIN, RomImage};
use crate::sound::SoundEvent;
use crate::video::{self, FRAME_HEIGHT, FRAME_WIDTH};

/// Cycle budget of the first half of a frame (RST 1 fires here).
pub const HALF_FRAME_CYCLES: u64 = 16_667;
/// Cycle budget of a whole frame (RST 2 fires here).
pub const FRAME_CYCLES: u64 = 33_333;
/// Real-time gate between interrupts: half of a 60 Hz frame.
const INTERRUPT_GATE: Duration = Duration::from_micros(8_333);

/// CP/M BDOS entry point intercepted in diagnostics mode.
const BDOS_ENTRY: u16 = 0x0005;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum NextInterrupt {
    Mid,
    End,
}

/// Startup-time configuration. No runtime reconfiguration.
#[derive(Debug, Default)]
pub struct MachineOptions {
    /// Run a CP/M diagnostic binary instead of the cabinet ROM set.
    pub cpm_mode: bool,
    /// Log every instruction to stdout.
    pub trace_print: bool,
    /// Log every instruction to this file.
    pub trace_file: Option<PathBuf>,
    /// Pace execution against the host clock. Tests switch this off.
    pub throttle: bool,
}

impl MachineOptions {
    /// Options for a normal cabinet run.
    pub fn cabinet() -> Self {
        Self {
            throttle: true,
            ..Self::default()
        }
    }
}

pub struct Machine {
    pub cpu: Cpu8080,
    pub bus: Bus,
    frame: Vec<u32>,
    next_interrupt: NextInterrupt,
    last_boundary: Instant,
    throttle: bool,
    cpm_mode: bool,
    trace_print: bool,
    trace_file: Option<BufWriter<File>>,
    instructions: u64,
}

impl Machine {
    pub fn new(rom: &RomImage, options: MachineOptions) -> Result<Self, String> {
        let mut bus = Bus::new();
        bus.load(rom.origin(), rom.bytes());

        let mut cpu = Cpu8080::new();
        if options.cpm_mode {
            bus.set_rom_writable(true);
            cpu.state.pc = DIAG_ORIGIN;
            // OUT 1; RET at the BDOS entry: a call that slips past the
            // intercept still reports and falls through cleanly.
            bus.load(BDOS_ENTRY, &[0xD3, 0x01, 0xC9]);
        }

        let trace_file = match options.trace_file {
            Some(path) => {
                let file = File::create(&path)
                    .map_err(|e| format!("failed to create trace file {}: {e}", path.display()))?;
                Some(BufWriter::new(file))
            }
            None => None,
        };

        Ok(Self {
            cpu,
            bus,
            frame: vec![0; FRAME_WIDTH * FRAME_HEIGHT],
            next_interrupt: NextInterrupt::Mid,
            last_boundary: Instant::now(),
            throttle: options.throttle,
            cpm_mode: options.cpm_mode,
            trace_print: options.trace_print,
            trace_file,
            instructions: 0,
        })
    }

    /// The most recently extracted frame (FRAME_WIDTH x FRAME_HEIGHT RGBA).
    pub fn frame(&self) -> &[u32] {
        &self.frame
    }

    /// Mirror a host key into the cabinet's button matrix.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.bus.inputs.set_button(button, pressed);
    }

    /// Drain one pending sound event for the audio collaborator.
    pub fn pop_sound(&mut self) -> Option<SoundEvent> {
        self.bus.sound.pop_event()
    }

    /// Total instructions executed since power-on.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    // ---------------------------------------------------------------------
    // Cabinet run loop
    // ---------------------------------------------------------------------

    /// Step instructions until the next half-frame interrupt has been
    /// injected and a fresh frame extracted. The front-end calls this twice
    /// per 16.67 ms and polls the window for shutdown in between.
    pub fn run_half_frame(&mut self) {
        loop {
            self.step_one();
            if !self.cpu.state.int_enable {
                continue;
            }
            match self.next_interrupt {
                NextInterrupt::Mid if self.cpu.state.cycles >= HALF_FRAME_CYCLES => {
                    self.pace();
                    // Clamp overshoot so the second half keeps its budget.
                    self.cpu.state.cycles = HALF_FRAME_CYCLES;
                    self.cpu.interrupt(&mut self.bus, 1);
                    video::render_into(self.bus.vram(), &mut self.frame);
                    self.next_interrupt = NextInterrupt::End;
                    self.last_boundary = Instant::now();
                    return;
                }
                NextInterrupt::End if self.cpu.state.cycles >= FRAME_CYCLES => {
                    self.pace();
                    self.cpu.state.cycles = 0;
                    self.cpu.interrupt(&mut self.bus, 2);
                    video::render_into(self.bus.vram(), &mut self.frame);
                    self.next_interrupt = NextInterrupt::Mid;
                    self.last_boundary = Instant::now();
                    return;
                }
                _ => {}
            }
        }
    }

    /// Sleep out the remainder of the 1/120 s half-frame.
    fn pace(&mut self) {
        if !self.throttle {
            return;
        }
        let elapsed = self.last_boundary.elapsed();
        if elapsed < INTERRUPT_GATE {
            std::thread::sleep(INTERRUPT_GATE - elapsed);
        }
    }

    /// Execute one instruction, tracing it first if enabled.
    fn step_one(&mut self) {
        if self.trace_print || self.trace_file.is_some() {
            self.trace_instruction();
        }
        self.cpu.step(&mut self.bus);
        self.instructions += 1;
    }

    fn trace_instruction(&mut self) {
        let pc = self.cpu.state.pc;
        let op = self.bus.read(pc);
        let lo = self.bus.read(pc.wrapping_add(1));
        let hi = self.bus.read(pc.wrapping_add(2));
        let line = format!(
            "{:6} {pc:04x}  {op:02x}  {}",
            self.instructions,
            disasm::format(op, lo, hi)
        );
        if self.trace_print {
            println!("{line}");
        }
        if let Some(file) = &mut self.trace_file {
            // Trace output is best-effort; a full disk must not stop the run.
            let _ = writeln!(file, "{line}");
        }
    }

    // ---------------------------------------------------------------------
    // Diagnostics run loop
    // ---------------------------------------------------------------------

    /// Run a CP/M diagnostic binary to completion.
    pub fn run_diagnostic(&mut self) {
        assert!(self.cpm_mode, "machine was not built in diagnostics mode");
        loop {
            if self.cpu.state.pc == BDOS_ENTRY {
                self.bdos_call();
            }
            if self.cpu.state.pc == 0x0000 {
                // Warm boot: the test jumped back to the CP/M origin.
                break;
            }
            self.step_one();
            if self.bus.diag_done() {
                break;
            }
        }
    }

    /// Intercept a BDOS console call and return to the caller.
    fn bdos_call(&mut self) {
        match self.cpu.state.c {
            2 => print!("{}", self.cpu.state.e as char),
            9 => {
                let mut addr = self.cpu.state.de();
                loop {
                    let ch = self.bus.read(addr);
                    if ch == b'$' {
                        break;
                    }
                    print!("{}", ch as char);
                    addr = addr.wrapping_add(1);
                }
                println!();
            }
            _ => {}
        }
        let ret = self.cpu.state.pop_u16(&mut self.bus);
        self.cpu.state.pc = ret;
    }
}
