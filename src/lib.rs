//! termline — interactive console line input with history and
//! async-safe output
//!
//! Captures keystrokes in raw mode (no echo, no line buffering),
//! supports backspace editing and up/down history recall, queues
//! completed lines for the application, and lets the application print
//! output lines at any time without corrupting the line being typed.
//! It is the input layer beneath a shell-like tool; it does not
//! interpret commands.
//!
//! Two threads cooperate: an input loop consuming raw bytes and an
//! output loop draining queued writes and redrawing the edit line.
//! Both shut down cooperatively when the [`Console`] is dropped.
//!
//! ```no_run
//! use termline::Console;
//!
//! let console = Console::new("> ")?;
//! console.write("hello from another thread");
//! while console.has_command() {
//!     let line = console.get_command()?;
//!     console.write(&format!("you typed: {line}"));
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod ansi;
mod buffer;
mod console;
mod error;
mod history;
mod input;
mod output;
mod source;

pub use ansi::strip_ansi_escape_codes;
pub use console::Console;
pub use error::Error;
pub use history::DEFAULT_HISTORY_LIMIT;
pub use source::{CrosstermByteSource, RawByteSource};
