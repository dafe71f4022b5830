use crossterm::event::KeyEvent;
use std::{collections::VecDeque, sync::Mutex, time::Instant};

/// A thread-safe buffer for storing key events and when they arrived.
/// For use with a producer and a consumer of keys.
/// Wrap it in an `std::sync::Arc` and you are good to go.
pub struct KeyBuffer {
    buffer: Mutex<VecDeque<(KeyEvent, Instant)>>,
}

impl KeyBuffer {
    pub fn new() -> KeyBuffer {
        KeyBuffer {
            buffer: Mutex::new(VecDeque::new()),
        }
    }

    /// Push a new key event to the buffer.
    pub fn push(&self, key_event: KeyEvent) {
        match self.buffer.lock() {
            Ok(mut guard) => guard.push_back((key_event, Instant::now())),
            Err(poisoned) => poisoned.into_inner().push_back((key_event, Instant::now())),
        }
    }

    /// Take every buffered key event, oldest first.
    pub fn drain(&self) -> Vec<(KeyEvent, Instant)> {
        match self.buffer.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }
}
