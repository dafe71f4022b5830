use chip8_emu::emulator::backend::Backend;
use chip8_emu::emulator::display::{Pixels, SCREEN_HEIGHT, SCREEN_WIDTH};
use chip8_emu::emulator::error::BackendError;
use chip8_emu::emulator::input::{EmulatorInput, Keys, NUM_KEYS};
use chip8_emu::emulator::keymap::chip8_key;
use chip8_emu::emulator::output::EmulatorOutput;

use super::key_manager::KeyManager;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

/// Terminals only report presses, so a key counts as held this long after its last press or repeat.
const KEY_HOLD: Duration = Duration::from_millis(250);

fn backend_error<E: std::fmt::Display>(err: E) -> BackendError {
    BackendError::new(err.to_string())
}

/// A backend drawing in the terminal, two characters per pixel, and beeping with the bell character.
pub struct CrosstermBackend {
    stdout: Stdout,
    key_manager: Option<KeyManager>,
    last_pressed: [Option<Instant>; NUM_KEYS],
    running: bool,
}

impl CrosstermBackend {
    pub fn new() -> CrosstermBackend {
        CrosstermBackend {
            stdout: stdout(),
            key_manager: None,
            last_pressed: [None; NUM_KEYS],
            running: false,
        }
    }

    fn draw_border(&mut self) -> crossterm::Result<()> {
        let bottom = SCREEN_HEIGHT as u16 + 1;
        let right = 2 * SCREEN_WIDTH as u16 + 1;
        let horizontal = "━".repeat(2 * SCREEN_WIDTH);
        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            Print(format!("┏{}┓", horizontal)),
            cursor::MoveTo(0, bottom),
            Print(format!("┗{}┛", horizontal))
        )?;
        for y in 1..bottom {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y),
                Print('┃'),
                cursor::MoveTo(right, y),
                Print('┃')
            )?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn draw(&mut self, pixels: &Pixels) -> crossterm::Result<()> {
        for (y, row) in pixels.iter().enumerate() {
            let line: String = row.iter().map(|&on| if on { "██" } else { "  " }).collect();
            queue!(self.stdout, cursor::MoveTo(1, y as u16 + 1), Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    /// Handle one key event, returning false if it asks to quit.
    fn handle_key(&mut self, key_event: KeyEvent, at: Instant) -> bool {
        match key_event.code {
            KeyCode::Esc => false,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => false,
            KeyCode::Char(c) => {
                if let Some(key) = chip8_key(c) {
                    self.last_pressed[key as usize] = Some(at);
                }
                true
            }
            _ => true,
        }
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        if self.running {
            self.stop();
        }
    }
}

impl EmulatorInput for CrosstermBackend {
    fn fetch_keys(&mut self, keys: &mut Keys, additive: bool) {
        if !additive {
            *keys = [false; NUM_KEYS];
        }
        for (key, last_pressed) in keys.iter_mut().zip(self.last_pressed.iter()) {
            if let Some(at) = last_pressed {
                *key |= at.elapsed() < KEY_HOLD;
            }
        }
    }
}

impl EmulatorOutput for CrosstermBackend {
    fn render(&mut self, pixels: &Pixels) {
        if let Err(err) = self.draw(pixels) {
            log::warn!("Could not draw frame: {}", err);
        }
    }

    fn play_beep(&mut self) {
        let result = write!(self.stdout, "\x07").and_then(|_| self.stdout.flush());
        if let Err(err) = result {
            log::warn!("Could not beep: {}", err);
        }
    }
}

impl Backend for CrosstermBackend {
    fn start(&mut self) -> Result<(), BackendError> {
        // Set first, so that stop and drop restore the terminal after a partial start
        self.running = true;
        terminal::enable_raw_mode().map_err(backend_error)?;
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All)).map_err(backend_error)?;
        self.draw_border().map_err(backend_error)?;
        self.key_manager = Some(KeyManager::new());
        log::info!("Terminal backend started");
        Ok(())
    }

    fn update(&mut self) -> bool {
        let events = match &self.key_manager {
            Some(key_manager) => key_manager.key_buffer().drain(),
            None => return true,
        };
        let mut keep_running = true;
        for (key_event, at) in events {
            keep_running &= self.handle_key(key_event, at);
        }
        keep_running
    }

    fn stop(&mut self) {
        // Joins the listener thread before the terminal leaves raw mode
        self.key_manager = None;
        let restored = execute!(self.stdout, LeaveAlternateScreen, cursor::Show)
            .and_then(|_| terminal::disable_raw_mode());
        if let Err(err) = restored {
            log::error!("Could not restore the terminal: {}", err);
        }
        self.running = false;
        log::info!("Terminal backend stopped");
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
