/*!
Desktop front-end: window, key polling, frame pacing and sound forwarding.

The core runs two half-frames per 16.67 ms; each one hands back a rotated
224x256 frame that goes straight to the window. Key state is mirrored into
the cabinet's button matrix before every half-frame, and pending sound
events are drained afterwards for the audio collaborator (logged here).

Exit status: 0 on window close, 1 when startup fails (missing ROM bank,
window creation), 2 on a command-line error.
*/

use std::env;
use std::path::PathBuf;
use std::process;

use log::{debug, error, info};
use minifb::{Key, Scale, Window, WindowOptions};

use rustvaders::input::Button;
use rustvaders::machine::{Machine, MachineOptions};
use rustvaders::rom::RomImage;
use rustvaders::video::{FRAME_HEIGHT, FRAME_WIDTH};

const USAGE: &str = "usage: rustvaders [OPTIONS] [PATH]

PATH                 directory holding invaders.h/g/f/e (default: roms),
                     or a single binary when --cpm is given
    --cpm            run a CP/M diagnostic binary loaded at 0100h
    --trace          log every instruction to stdout
    --trace-file F   log every instruction to file F
    -h, --help       show this help";

struct Config {
    path: PathBuf,
    cpm_mode: bool,
    trace_print: bool,
    trace_file: Option<PathBuf>,
}

impl Config {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut config = Config {
            path: PathBuf::from("roms"),
            cpm_mode: false,
            trace_print: false,
            trace_file: None,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--cpm" => config.cpm_mode = true,
                "--trace" => config.trace_print = true,
                "--trace-file" => {
                    let path = args
                        .next()
                        .ok_or_else(|| "--trace-file needs a file argument".to_string())?;
                    config.trace_file = Some(PathBuf::from(path));
                }
                "-h" | "--help" => {
                    println!("{USAGE}");
                    process::exit(0);
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown option {other}"));
                }
                other => config.path = PathBuf::from(other),
            }
        }
        Ok(config)
    }
}

fn main() {
    env_logger::init();

    let config = match Config::parse(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(config) {
        error!("{e}");
        eprintln!("rustvaders: {e}");
        process::exit(1);
    }
}

fn run(config: Config) -> Result<(), String> {
    let rom = if config.cpm_mode {
        RomImage::diagnostic(&config.path)?
    } else {
        RomImage::invaders_set(&config.path)?
    };
    info!(
        "loaded {} bytes at {:#06x} from {}",
        rom.bytes().len(),
        rom.origin(),
        config.path.display()
    );

    let options = MachineOptions {
        cpm_mode: config.cpm_mode,
        trace_print: config.trace_print,
        trace_file: config.trace_file,
        ..MachineOptions::cabinet()
    };
    let mut machine = Machine::new(&rom, options)?;

    if config.cpm_mode {
        machine.run_diagnostic();
        info!(
            "diagnostic finished after {} instructions",
            machine.instructions()
        );
        return Ok(());
    }

    let mut window = Window::new(
        "Space Invaders",
        FRAME_WIDTH,
        FRAME_HEIGHT,
        WindowOptions {
            scale: Scale::X2,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| format!("failed to create window: {e}"))?;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        sync_inputs(&window, &mut machine);
        machine.run_half_frame();
        window
            .update_with_buffer(machine.frame(), FRAME_WIDTH, FRAME_HEIGHT)
            .map_err(|e| format!("failed to present frame: {e}"))?;
        while let Some(event) = machine.pop_sound() {
            // Playback is the audio collaborator's job; surface the edge.
            debug!("sound event: {event:?}");
        }
    }

    info!("window closed after {} instructions", machine.instructions());
    Ok(())
}

fn sync_inputs(window: &Window, machine: &mut Machine) {
    machine.set_button(Button::Coin, window.is_key_down(Key::C));
    machine.set_button(Button::Start1P, window.is_key_down(Key::Enter));
    machine.set_button(Button::Start2P, window.is_key_down(Key::Key2));
    machine.set_button(Button::Fire1P, window.is_key_down(Key::Space));
    machine.set_button(Button::Left1P, window.is_key_down(Key::Left));
    machine.set_button(Button::Right1P, window.is_key_down(Key::Right));
    machine.set_button(Button::Fire2P, window.is_key_down(Key::S));
    machine.set_button(Button::Left2P, window.is_key_down(Key::A));
    machine.set_button(Button::Right2P, window.is_key_down(Key::D));
    machine.set_button(Button::Tilt, window.is_key_down(Key::T));
}
