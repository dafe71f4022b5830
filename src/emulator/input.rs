pub const NUM_KEYS: usize = 16;

/// Pressed state of the 16 CHIP-8 keys, indexed by key code.
pub type Keys = [bool; NUM_KEYS];

/// Represents an input device that can report which of the keys 0x0..=0xF are held down.
pub trait EmulatorInput {
    /// Write the currently pressed keys into `keys`.
    /// Without `additive` the previous contents are cleared first,
    /// with it pressed keys are merged into what is already there.
    fn fetch_keys(&mut self, keys: &mut Keys, additive: bool);
}

/// An input device that reports whatever keys it has been told are pressed.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    pressed: Keys,
}

impl ScriptedInput {
    pub fn new() -> ScriptedInput {
        ScriptedInput::default()
    }

    pub fn press(&mut self, key: u8) {
        self.pressed[key as usize & 0xF] = true;
    }

    pub fn release(&mut self, key: u8) {
        self.pressed[key as usize & 0xF] = false;
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; NUM_KEYS];
    }
}

impl EmulatorInput for ScriptedInput {
    fn fetch_keys(&mut self, keys: &mut Keys, additive: bool) {
        if !additive {
            *keys = [false; NUM_KEYS];
        }
        for (key, &pressed) in keys.iter_mut().zip(self.pressed.iter()) {
            *key |= pressed;
        }
    }
}
