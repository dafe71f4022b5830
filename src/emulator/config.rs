pub const DEFAULT_RATE: u16 = 500;

/// Runtime settings of the emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// CPU instructions executed per second.
    pub rate: u16,
}

impl Config {
    /// Returns `None` for a zero rate, which would never execute anything.
    pub fn new(rate: u16) -> Option<Config> {
        if rate == 0 {
            None
        } else {
            Some(Config { rate })
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config { rate: DEFAULT_RATE }
    }
}
