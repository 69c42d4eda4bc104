//! Raw keystroke capability
//!
//! `RawByteSource` is the injected "read one raw, unbuffered, non-echoed
//! byte" primitive. The read takes a timeout and may return nothing, so
//! a loop parked on input still observes the shutdown flag with bounded
//! latency instead of requiring forced thread termination.
//!
//! The crossterm-backed implementation reads key events and encodes them
//! into the byte sequences an xterm-style terminal would deliver, so the
//! byte-oriented decoder downstream sees arrows as `ESC [ A` and friends.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ansi::key;

/// One raw keystroke byte per call, selected per platform at startup.
pub trait RawByteSource {
    /// Wait up to `timeout` for the next byte. `Ok(None)` means the
    /// timeout elapsed with no input.
    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>>;
}

/// Keyboard source backed by crossterm's event stream.
///
/// Requires the terminal to be in raw mode; the facade takes care of
/// that. A single key event can decode to several bytes, so leftovers
/// are buffered and drained one byte per call.
#[derive(Default)]
pub struct CrosstermByteSource {
    pending: VecDeque<u8>,
}

impl CrosstermByteSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RawByteSource for CrosstermByteSource {
    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>> {
        if let Some(byte) = self.pending.pop_front() {
            return Ok(Some(byte));
        }
        if !event::poll(timeout)? {
            return Ok(None);
        }
        if let Event::Key(key) = event::read()? {
            // Press and repeat both produce input; releases don't.
            if key.kind != KeyEventKind::Release {
                self.pending.extend(encode_key(key));
            }
        }
        Ok(self.pending.pop_front())
    }
}

/// Encode a key event into the bytes a raw terminal would deliver.
fn encode_key(key: KeyEvent) -> Vec<u8> {
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char(c) => encode_char(c, has_ctrl, has_alt),
        // Enter always submits as LF, regardless of the terminal's
        // carriage-return convention.
        KeyCode::Enter => vec![key::LF],
        KeyCode::Backspace => vec![key::DEL],
        KeyCode::Tab => vec![b'\t'],
        KeyCode::Esc => vec![key::ESC],
        KeyCode::Up => vec![key::ESC, key::CSI, key::UP],
        KeyCode::Down => vec![key::ESC, key::CSI, key::DOWN],
        KeyCode::Right => vec![key::ESC, key::CSI, b'C'],
        KeyCode::Left => vec![key::ESC, key::CSI, b'D'],
        KeyCode::Home => vec![key::ESC, key::CSI, b'H'],
        KeyCode::End => vec![key::ESC, key::CSI, b'F'],
        _ => vec![],
    }
}

fn encode_char(c: char, has_ctrl: bool, has_alt: bool) -> Vec<u8> {
    if has_ctrl && !has_alt {
        // Ctrl+char: the corresponding control byte
        vec![(c.to_ascii_lowercase() as u8) & 0x1f]
    } else if has_alt {
        // Alt/Option+char: ESC prefix (meta key encoding)
        let mut buf = [0u8; 4];
        let s = c.encode_utf8(&mut buf);
        let mut bytes = vec![key::ESC];
        bytes.extend_from_slice(s.as_bytes());
        bytes
    } else {
        let mut buf = [0u8; 4];
        c.encode_utf8(&mut buf).as_bytes().to_vec()
    }
}
