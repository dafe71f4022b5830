use std::path::PathBuf;

use structopt::clap::AppSettings;
use structopt::StructOpt;

use chip8_emu::emulator::config::Config;
use chip8_emu::emulator::Emulator;

mod crossterm_io;
mod key_buffer;
mod key_manager;
use crossterm_io::CrosstermBackend;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The program options.
#[derive(StructOpt, Debug)]
#[structopt(name = "chip8-emu", global_settings = &[AppSettings::DisableVersion])]
struct Opt {
    /// Instructions per second
    #[structopt(short = "r", long = "rate", default_value = "500", parse(try_from_str = parse_rate))]
    rate: u16,

    /// Path to the ROM file to load
    #[structopt(short = "f", long = "rom", parse(from_os_str))]
    rom: Option<PathBuf>,

    /// Path to the ROM file to load, if not given with --rom
    #[structopt(name = "ROM", parse(from_os_str))]
    rom_path: Option<PathBuf>,

    /// Print version information
    #[structopt(short = "v", long = "version")]
    version: bool,
}

fn parse_rate(value: &str) -> Result<u16, String> {
    let rate: u16 = value.parse().map_err(|err| format!("invalid rate {:?}: {}", value, err))?;
    Config::new(rate)
        .map(|config| config.rate)
        .ok_or_else(|| String::from("rate must be at least 1 instruction per second"))
}

fn run(opt: Opt) -> i32 {
    if opt.version {
        println!("{} {}", NAME, VERSION);
        return 0;
    }

    let rom = match opt.rom.or(opt.rom_path) {
        Some(rom) => rom,
        None => {
            eprintln!("Error: ROM is required, use --help for more info");
            return 1;
        }
    };

    let config = Config::new(opt.rate).unwrap_or_default();
    let mut emulator = Emulator::with_backend(CrosstermBackend::new(), config);

    // Load instructions into emulator memory
    if let Err(err) = emulator.load_rom(&rom) {
        eprintln!("Error: {}", err);
        return 1;
    }
    log::info!("Executing {:?} at {} instructions per second", &rom, config.rate);

    // Start execution
    match emulator.start() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {}", err);
            1
        }
    }
}

fn main() {
    env_logger::init();

    // Get configuration, argument errors exit here before anything is set up
    let opt = Opt::from_args();
    log::debug!("{:?}", opt);

    std::process::exit(run(opt));
}
