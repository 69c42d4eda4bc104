//! Asynchronous output loop and redraw protocol
//!
//! Runs on its own thread. Blocks on the write queue so an enqueued
//! line wakes it immediately; the receive timeout exists only to
//! re-check the shutdown flag. Every printed line is preceded by a
//! clear-line + column-0 sequence and followed by a fresh render of the
//! prompt and the in-progress edit line, so pending async output never
//! clobbers what the user is typing.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::console::Shared;

/// Upper bound on how long shutdown goes unnoticed by this loop.
pub(crate) const WRITE_POLL_TIMEOUT: Duration = Duration::from_millis(50);

pub(crate) fn output_loop(shared: Arc<Shared>, writes: Receiver<String>) {
    while !shared.is_shutdown() {
        match writes.recv_timeout(WRITE_POLL_TIMEOUT) {
            Ok(line) => shared.print_line(&line),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // Flush everything still queued so no asynchronous output is lost
    // at teardown. No trailing buffer re-render here; the session is
    // over.
    while let Ok(line) = writes.try_recv() {
        shared.print_line_raw(&line);
    }
    shared.flush();
}
