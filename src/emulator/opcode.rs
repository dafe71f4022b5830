/// A raw 16-bit instruction word, with accessors for
/// the fixed bit fields every CHIP-8 opcode is made of.
///
/// ```text
/// 0xDXYN
///   |||+- n:   lowest nibble
///   ||+-- y:   third nibble
///   |+--- x:   second nibble
///   +---- kind: highest nibble
/// nn = lowest byte, nnn = lowest 12 bits
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

const KIND_MASK: u16 = 0xF000;
const X_MASK: u16 = 0x0F00;
const Y_MASK: u16 = 0x00F0;
const N_MASK: u16 = 0x000F;
const NN_MASK: u16 = Y_MASK | N_MASK;
const NNN_MASK: u16 = X_MASK | NN_MASK;

impl Opcode {
    /// Combine a high and a low byte, big-endian.
    pub fn from_bytes(high: u8, low: u8) -> Opcode {
        Opcode(((high as u16) << 8) | low as u16)
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// Split into the high and the low byte.
    pub fn to_bytes(self) -> (u8, u8) {
        ((self.0 >> 8) as u8, (self.0 & 0x00FF) as u8)
    }

    /// The highest nibble, selecting the instruction group.
    pub fn kind(self) -> u8 {
        ((self.0 & KIND_MASK) >> 12) as u8
    }

    pub fn x(self) -> u8 {
        ((self.0 & X_MASK) >> 8) as u8
    }

    pub fn y(self) -> u8 {
        ((self.0 & Y_MASK) >> 4) as u8
    }

    pub fn n(self) -> u8 {
        (self.0 & N_MASK) as u8
    }

    pub fn nn(self) -> u8 {
        (self.0 & NN_MASK) as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & NNN_MASK
    }

    /// Keep the group nibble and the lowest nibble, used to tell 8XY_ instructions apart.
    pub fn masked_low_nibble(self) -> u16 {
        self.0 & (KIND_MASK | N_MASK)
    }

    /// Keep the group nibble and the lowest byte, used for the E and F groups.
    pub fn masked_low_byte(self) -> u16 {
        self.0 & (KIND_MASK | NN_MASK)
    }
}

impl From<u16> for Opcode {
    fn from(value: u16) -> Self {
        Opcode(value)
    }
}
