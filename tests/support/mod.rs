#![allow(dead_code)]

pub mod mock_buffer;

use mock_buffer::MockBuffer;
use vim_modal::{Dispatch, Engine, KeyCode, KeyEvent};

/// Feed every character of `keys` as a plain key press.
pub fn feed(eng: &mut Engine, buf: &mut MockBuffer, keys: &str) -> Vec<Dispatch> {
    keys.chars()
        .map(|c| eng.handle_key(buf, KeyEvent::char(c)))
        .collect()
}

pub fn esc() -> KeyEvent {
    KeyEvent::from(KeyCode::Esc)
}
