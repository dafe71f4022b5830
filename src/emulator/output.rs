use crate::emulator::display::{Pixels, BLANK};

/// Represents an output device: a screen to present frames on and a speaker to beep with.
pub trait EmulatorOutput {
    /// Present a full frame.
    fn render(&mut self, pixels: &Pixels);
    /// Sound a short tone. Called once per timer tick while the sound timer runs.
    fn play_beep(&mut self);
}

/// An output device that only remembers what it was asked to do.
pub struct RecordingOutput {
    last_frame: Pixels,
    frames: usize,
    beeps: usize,
}

impl RecordingOutput {
    pub fn new() -> RecordingOutput {
        RecordingOutput {
            last_frame: BLANK,
            frames: 0,
            beeps: 0,
        }
    }

    /// The most recently rendered frame, blank if nothing was rendered yet.
    pub fn last_frame(&self) -> &Pixels {
        &self.last_frame
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Number of beeps requested so far.
    pub fn beeps(&self) -> usize {
        self.beeps
    }
}

impl Default for RecordingOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorOutput for RecordingOutput {
    fn render(&mut self, pixels: &Pixels) {
        self.last_frame = *pixels;
        self.frames += 1;
    }

    fn play_beep(&mut self) {
        self.beeps += 1;
    }
}
