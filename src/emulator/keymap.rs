//! The conventional mapping from the left side of a QWERTY keyboard to the CHIP-8 hex keypad.
//!
//! ```text
//! 1 2 3 4      1 2 3 C
//! q w e r  ->  4 5 6 D
//! a s d f      7 8 9 E
//! z x c v      A 0 B F
//! ```

/// The CHIP-8 key for a keyboard character, if it has one. Case insensitive.
pub fn chip8_key(c: char) -> Option<u8> {
    let key = match c.to_ascii_lowercase() {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xC,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xD,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xE,
        'z' => 0xA,
        'x' => 0x0,
        'c' => 0xB,
        'v' => 0xF,
        _ => return None,
    };
    Some(key)
}
