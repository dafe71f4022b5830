use crate::emulator::display::Pixels;
use crate::emulator::error::BackendError;
use crate::emulator::input::{EmulatorInput, Keys, ScriptedInput};
use crate::emulator::output::{EmulatorOutput, RecordingOutput};

/// Everything the run loop needs from the outside world:
/// keys to read, a screen and a speaker, and a way to be told to quit.
pub trait Backend: EmulatorInput + EmulatorOutput {
    /// Acquire the screen, input and audio resources.
    fn start(&mut self) -> Result<(), BackendError>;

    /// Process pending events. Returns false once the user asked to quit.
    fn update(&mut self) -> bool;

    /// Release everything acquired by `start`.
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

/// A backend without a screen, for tests and batch runs.
/// Keys are set by hand, frames and beeps are recorded,
/// and it can be told to quit after a number of updates.
pub struct HeadlessBackend {
    pub input: ScriptedInput,
    pub output: RecordingOutput,
    quit_after: Option<usize>,
    updates: usize,
    running: bool,
}

impl HeadlessBackend {
    /// A backend that never asks to quit.
    pub fn new() -> HeadlessBackend {
        HeadlessBackend {
            input: ScriptedInput::new(),
            output: RecordingOutput::new(),
            quit_after: None,
            updates: 0,
            running: false,
        }
    }

    /// A backend that lets `updates` calls to `update` through and asks to quit on the next one.
    pub fn quit_after(updates: usize) -> HeadlessBackend {
        HeadlessBackend {
            quit_after: Some(updates),
            ..HeadlessBackend::new()
        }
    }

    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorInput for HeadlessBackend {
    fn fetch_keys(&mut self, keys: &mut Keys, additive: bool) {
        self.input.fetch_keys(keys, additive);
    }
}

impl EmulatorOutput for HeadlessBackend {
    fn render(&mut self, pixels: &Pixels) {
        self.output.render(pixels);
    }

    fn play_beep(&mut self) {
        self.output.play_beep();
    }
}

impl Backend for HeadlessBackend {
    fn start(&mut self) -> Result<(), BackendError> {
        self.running = true;
        Ok(())
    }

    fn update(&mut self) -> bool {
        if let Some(limit) = self.quit_after {
            if self.updates >= limit {
                return false;
            }
        }
        self.updates += 1;
        true
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quits_after_the_given_number_of_updates() {
        let mut backend = HeadlessBackend::quit_after(2);
        assert!(backend.update());
        assert!(backend.update());
        assert!(!backend.update());
        assert_eq!(backend.updates(), 2);
    }

    #[test]
    fn start_and_stop_toggle_running() {
        let mut backend = HeadlessBackend::new();
        assert!(!backend.is_running());
        backend.start().unwrap();
        assert!(backend.is_running());
        backend.stop();
        assert!(!backend.is_running());
    }
}
