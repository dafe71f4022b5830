pub const MEM_SIZE: usize = 4096;
pub const FONT_ADDR: u16 = 0x050;
pub const PROGRAM_START: u16 = 0x200;
/// The largest program that fits between the program start and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PROGRAM_START as usize;
/// Each font glyph is 5 rows of 8 pixels.
pub const GLYPH_SIZE: u16 = 5;

pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The 4KB address space, holding the font and the loaded program.
pub struct Memory {
    data: [u8; MEM_SIZE],
}

impl Memory {
    /// Create zeroed memory with the built-in font in place.
    pub fn new() -> Memory {
        let mut data = [0; MEM_SIZE];
        let font_start = FONT_ADDR as usize;
        data[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
        Memory { data }
    }

    /// Copy a program into memory at 0x200.
    ///
    /// The caller makes sure the program fits, anything past the end of memory is dropped.
    pub fn load(&mut self, program: &[u8]) {
        let start = PROGRAM_START as usize;
        let len = std::cmp::min(program.len(), MAX_PROGRAM_SIZE);
        self.data[start..start + len].copy_from_slice(&program[..len]);
    }

    pub fn data(&self) -> &[u8; MEM_SIZE] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8; MEM_SIZE] {
        &mut self.data
    }

    /// Read a byte. Addresses past the end wrap around to the start.
    pub fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize % MEM_SIZE]
    }

    /// Write a byte. Addresses past the end wrap around to the start.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize % MEM_SIZE] = value;
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn font_is_in_place_before_loading() {
        let memory = Memory::new();
        assert_eq!(&memory.data()[0x050..0x0A0], &FONT[..]);
        assert!(memory.data()[..0x050].iter().all(|&b| b == 0));
        assert!(memory.data()[0x0A0..].iter().all(|&b| b == 0));
    }

    #[test]
    fn load_starts_at_program_space() {
        let mut memory = Memory::new();
        memory.load(&[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(&memory.data()[0x200..0x204], &[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(memory.data()[0x1FF], 0);
        assert_eq!(memory.data()[0x204], 0);
    }

    #[test]
    fn accesses_wrap_around() {
        let mut memory = Memory::new();
        memory.write(0x1000, 0xAB);
        assert_eq!(memory.read(0x0000), 0xAB);
        assert_eq!(memory.read(0x1000), 0xAB);
    }

    proptest! {
        #[test]
        fn loaded_program_is_unchanged(program in proptest::collection::vec(any::<u8>(), 1..=MAX_PROGRAM_SIZE)) {
            let mut memory = Memory::new();
            memory.load(&program);
            let start = PROGRAM_START as usize;
            prop_assert_eq!(&memory.data()[start..start + program.len()], &program[..]);
            prop_assert_eq!(&memory.data()[0x050..0x0A0], &FONT[..]);
        }
    }
}
