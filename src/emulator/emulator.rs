//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::backend::{Backend, HeadlessBackend};
use crate::emulator::clock::{Clock, SystemClock};
use crate::emulator::config::Config;
use crate::emulator::cpu::Cpu;
use crate::emulator::display::Display;
use crate::emulator::error::{LoadRomError, RunError};
use crate::emulator::instruction::Instruction;
use crate::emulator::memory::{Memory, MAX_PROGRAM_SIZE};
use crate::emulator::scheduler::{Scheduler, LOOP_QUANTUM};
use std::path::Path;

/// Owns the whole machine: memory, screen, CPU state and the backend it talks to.
pub struct Emulator<B: Backend> {
    memory: Memory,
    display: Display,
    cpu: Cpu,
    backend: B,
    config: Config,
    rom_loaded: bool,
}

impl Emulator<HeadlessBackend> {
    /// Create a new emulator without a screen, running at the default rate
    pub fn new() -> Emulator<HeadlessBackend> {
        Emulator::with_backend(HeadlessBackend::new(), Config::default())
    }
}

impl Default for Emulator<HeadlessBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Emulator<B> {

    /// Create a new emulator talking to `backend`
    pub fn with_backend(backend: B, config: Config) -> Emulator<B> {
        Emulator::with_cpu(backend, config, Cpu::new())
    }

    /// Create a new emulator with a given CPU, for example one with a seeded random source
    pub fn with_cpu(backend: B, config: Config, cpu: Cpu) -> Emulator<B> {
        Emulator {
            memory: Memory::new(),
            display: Display::new(),
            cpu,
            backend,
            config,
            rom_loaded: false,
        }
    }

    /// Copy a program into memory at 0x200, truncating what does not fit.
    pub fn load(&mut self, program: &[u8]) {
        self.memory.load(program);
        self.rom_loaded = true;
    }

    /// Check the size of a ROM and copy it into memory at 0x200.
    pub fn load_rom_bytes(&mut self, rom: &[u8]) -> Result<(), LoadRomError> {
        if rom.is_empty() {
            return Err(LoadRomError::RomEmpty);
        }
        if rom.len() > MAX_PROGRAM_SIZE {
            return Err(LoadRomError::RomTooBig { size: rom.len() });
        }

        self.load(rom);
        log::info!("ROM loaded ({} bytes)", rom.len());
        Ok(())
    }

    /// Read a ROM file and copy it into memory at 0x200.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadRomError> {
        let path = path.as_ref();
        log::info!("Loading ROM {:?}", path);
        let rom = std::fs::read(path).map_err(|source| LoadRomError::RomNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_rom_bytes(&rom)
    }

    /// Perform a single CPU tick, then present the screen if it changed.
    pub fn step(&mut self) {
        self.cpu.tick(&mut self.memory, &mut self.display, &mut self.backend);
        self.display.present(&mut self.backend);
    }

    /// Count down the delay and sound timers once.
    pub fn update_timers(&mut self) {
        self.cpu.update_timers(&mut self.backend);
    }

    /// Execute a single instruction
    pub fn execute_single(&mut self, instruction: Instruction) {
        self.cpu.execute_single(instruction, &mut self.memory, &mut self.display);
    }

    /// Execute instructions in order
    pub fn execute_many(&mut self, instructions: &[Instruction]) {
        for &instruction in instructions {
            self.execute_single(instruction);
        }
    }

    /// Start the backend and run in real time until it asks to quit.
    pub fn start(&mut self) -> Result<(), RunError> {
        self.run_with_clock(&mut SystemClock::new())
    }

    /// Start the backend and run until it asks to quit, taking time from `clock`.
    ///
    /// Every iteration polls the backend, then fires at most one timer update
    /// and at most one CPU tick, as decided by the scheduler.
    pub fn run_with_clock<C: Clock + ?Sized>(&mut self, clock: &mut C) -> Result<(), RunError> {
        if !self.rom_loaded {
            return Err(RunError::NoRomLoaded);
        }
        self.backend.start()?;
        log::info!("Backend started, running at {} instructions per second", self.config.rate);

        let mut scheduler = Scheduler::new(self.config.rate);
        let mut previous = clock.now();

        while self.backend.update() {
            let now = clock.now();
            let ticks = scheduler.advance(now - previous);

            if ticks.timers {
                self.update_timers();
            }

            if ticks.cpu {
                self.step();
            }

            previous = now;
            clock.sleep(LOOP_QUANTUM);
        }
        log::debug!("Quit requested after {} cycles", self.cpu.cycles());

        self.backend.stop();
        log::info!("Backend stopped");
        Ok(())
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> Config {
        self.config
    }
}
