//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

pub mod backend;
pub mod clock;
pub mod config;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod error;
pub mod input;
pub mod instruction;
pub mod keymap;
pub mod memory;
pub mod opcode;
pub mod output;
pub mod scheduler;

pub use self::backend::{Backend, HeadlessBackend};
pub use self::config::Config;
pub use self::emulator::Emulator;
pub use self::error::{BackendError, LoadRomError, RunError};
