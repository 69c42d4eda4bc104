//! Keystroke consumption loop
//!
//! Runs on its own thread. Reads raw bytes through the injected
//! [`RawByteSource`], updates the edit buffer and history under their
//! own locks, and hands completed lines to the command queue on `\n`.
//! Every read carries a timeout so the shutdown flag is re-checked with
//! bounded latency; no forced thread termination is ever needed.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::ansi::key;
use crate::console::Shared;
use crate::source::RawByteSource;

/// How long a single raw read waits before re-checking shutdown.
pub(crate) const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Outer submit-loop and inner per-byte loop; both check the shutdown
/// flag so the thread exits between reads.
pub(crate) fn input_loop(
    mut source: Box<dyn RawByteSource + Send>,
    shared: Arc<Shared>,
    commands: Sender<String>,
) {
    while !shared.is_shutdown() {
        let mut submitted = false;
        while !shared.is_shutdown() {
            let byte = match source.read_byte(READ_TIMEOUT) {
                Ok(Some(byte)) => byte,
                Ok(None) => continue,
                // The source is gone; no more input will ever arrive.
                Err(_) => return,
            };
            if shared.key_debug.load(Ordering::Relaxed) {
                eprintln!("key: {}", std::ascii::escape_default(byte));
            }
            match byte {
                key::LF => {
                    submitted = true;
                    break;
                }
                key::BS | key::DEL => handle_backspace(&shared),
                key::ESC => handle_escape(source.as_mut(), &shared),
                byte if is_printable(byte) => append_and_echo(&shared, byte),
                _ => {}
            }
        }
        if submitted && !shared.is_shutdown() {
            submit(&shared, &commands);
        }
    }
}

/// Printable range for byte-oriented editing. Anything outside it that
/// is not a recognized control byte is ignored.
fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

fn append_and_echo(shared: &Shared, byte: u8) {
    shared.buffer.lock().unwrap().append(byte);
    shared.echo_byte(byte);
}

fn handle_backspace(shared: &Shared) {
    let removed = shared.buffer.lock().unwrap().backspace();
    if removed {
        shared.redraw();
    }
}

/// Decode the two bytes following ESC.
///
/// `[A` / `[B` navigate history when it is enabled and non-empty; every
/// other combination inserts both bytes literally, so an unrecognized
/// escape sequence is never silently dropped.
fn handle_escape(source: &mut dyn RawByteSource, shared: &Shared) {
    let Some(c2) = read_blocking(source, shared) else {
        return;
    };
    let Some(c3) = read_blocking(source, shared) else {
        return;
    };

    if c2 == key::CSI && (c3 == key::UP || c3 == key::DOWN) && navigate(shared, c3) {
        return;
    }

    append_and_echo(shared, c2);
    append_and_echo(shared, c3);
}

/// Move the history cursor and display the selected entry, or the saved
/// in-progress line when back at the live position. Returns false when
/// history is disabled or empty; the caller then falls back to literal
/// insertion.
fn navigate(shared: &Shared, direction: u8) -> bool {
    let displayed = {
        let mut history = shared.history.lock().unwrap();
        if !history.enabled() || history.is_empty() {
            return false;
        }
        if direction == key::UP {
            history.go_back();
        } else {
            history.go_forward();
        }
        history.current().map(str::to_owned)
    };

    {
        let mut buffer = shared.buffer.lock().unwrap();
        match displayed {
            Some(entry) => buffer.replace(entry.as_bytes()),
            None => {
                let snapshot = buffer.snapshot().to_vec();
                buffer.replace(&snapshot);
            }
        }
    }
    shared.redraw();
    true
}

/// Wait for one escape-sequence byte, still honoring shutdown.
fn read_blocking(source: &mut dyn RawByteSource, shared: &Shared) -> Option<u8> {
    while !shared.is_shutdown() {
        match source.read_byte(READ_TIMEOUT) {
            Ok(Some(byte)) => return Some(byte),
            Ok(None) => continue,
            Err(_) => return None,
        }
    }
    None
}

/// Push the finished line to history (when enabled) and to the command
/// queue, then reset the buffer. History and queue are two independent
/// critical sections; no two containers are ever locked at once.
fn submit(shared: &Shared, commands: &Sender<String>) {
    let line = {
        let mut buffer = shared.buffer.lock().unwrap();
        let line = buffer.to_line();
        buffer.reset();
        line
    };
    {
        let mut history = shared.history.lock().unwrap();
        if history.enabled() {
            history.push(line.clone());
        }
    }
    // The receiver lives on the facade; a send only fails mid-drop.
    let _ = commands.send(line.clone());
    // Queued first, so the callback can take the line via get_command.
    if let Some(callback) = shared.on_command.lock().unwrap().as_deref() {
        callback(&line);
    }
}
