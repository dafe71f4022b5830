use crate::emulator::output::EmulatorOutput;
use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SPRITE_WIDTH: usize = 8;

/// Row-major pixel grid, `pixels[y][x]`.
pub type Pixels = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
pub const BLANK: Pixels = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// The monochrome 64x32 screen, with a dirty flag so that
/// unchanged frames are not pushed to the output again.
pub struct Display {
    pixels: Pixels,
    dirty: bool,
}

impl Display {
    pub fn new() -> Display {
        Display {
            pixels: BLANK,
            dirty: false,
        }
    }

    pub fn clear(&mut self) {
        self.pixels = BLANK;
        self.dirty = true;
    }

    /// XOR a sprite onto the screen with its top left corner at (`x`, `y`),
    /// one byte per row, most significant bit leftmost.
    ///
    /// Clipping is asymmetric: the first row that falls below the bottom edge
    /// ends the draw, while pixels past the right edge are skipped one by one.
    /// Nothing wraps around.
    ///
    /// Returns true if any set pixel was turned off.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        self.dirty = true;

        let mut collision = false;
        for (row_index, &row) in sprite.iter().enumerate() {
            let py = y as usize + row_index;
            if py >= SCREEN_HEIGHT {
                break;
            }
            for bit in 0..SPRITE_WIDTH {
                let px = x as usize + bit;
                if px >= SCREEN_WIDTH {
                    continue;
                }
                let new_pixel = (row >> (SPRITE_WIDTH - 1 - bit)) & 1 == 1;
                let pixel = &mut self.pixels[py][px];
                if *pixel && new_pixel {
                    collision = true;
                }
                *pixel ^= new_pixel;
            }
        }

        collision
    }

    /// Push the frame to `output` if it changed since the last time.
    pub fn present<O: EmulatorOutput + ?Sized>(&mut self, output: &mut O) {
        if !self.dirty {
            return;
        }
        output.render(&self.pixels);
        self.dirty = false;
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.iter() {
            for &pixel in row.iter() {
                write!(f, "{}", if pixel { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
