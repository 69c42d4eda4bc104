//! The console facade
//!
//! Owns the edit buffer, the history store, both hand-off queues, the
//! shutdown flag, and the two loop threads. Applications talk only to
//! [`Console`]: enqueue output with `write`, poll `has_command` and take
//! lines with `get_command`, and manage history and the prompt.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::terminal;

use crate::ansi::{self, strip_ansi_escape_codes};
use crate::buffer::EditBuffer;
use crate::error::Error;
use crate::history::HistoryStore;
use crate::input::input_loop;
use crate::output::output_loop;
use crate::source::{CrosstermByteSource, RawByteSource};

/// State shared between the facade and the two loops. Each container
/// has its own lock; mutation is per-container, never across containers
/// atomically.
pub(crate) struct Shared {
    pub(crate) buffer: Mutex<EditBuffer>,
    pub(crate) history: Mutex<HistoryStore>,
    pub(crate) prompt: Mutex<String>,
    pub(crate) term: Mutex<Box<dyn Write + Send>>,
    pub(crate) shutdown: AtomicBool,
    pub(crate) key_debug: AtomicBool,
    /// Invoked on the input thread right after a submitted line is
    /// queued, so the callback can already see it via `get_command`.
    pub(crate) on_command: Mutex<Option<Box<dyn Fn(&str) + Send>>>,
}

impl Shared {
    fn new(prompt: String, sink: Box<dyn Write + Send>) -> Self {
        Self {
            buffer: Mutex::new(EditBuffer::new()),
            history: Mutex::new(HistoryStore::new()),
            prompt: Mutex::new(prompt),
            term: Mutex::new(sink),
            shutdown: AtomicBool::new(false),
            key_debug: AtomicBool::new(false),
            on_command: Mutex::new(None),
        }
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Echo a single just-typed byte without disturbing the rest of the
    /// line.
    pub(crate) fn echo_byte(&self, byte: u8) {
        let mut term = self.term.lock().unwrap();
        let _ = term.write_all(&[byte]);
        let _ = term.flush();
    }

    /// Erase the current terminal line and rewrite prompt plus the
    /// in-progress edit line. The buffer content is copied out under
    /// its own lock before the terminal lock is taken.
    pub(crate) fn redraw(&self) {
        let content = self.buffer.lock().unwrap().content().to_vec();
        let prompt = self.prompt.lock().unwrap().clone();

        let mut term = self.term.lock().unwrap();
        let _ = write!(term, "{}{}{}", ansi::CLEAR_LINE, ansi::CURSOR_COLUMN_0, prompt);
        let _ = term.write_all(&content);
        let _ = term.flush();
    }

    /// Print one queued output line, then re-render the edit line below
    /// it so the user's typing reappears.
    pub(crate) fn print_line(&self, line: &str) {
        self.print_line_raw(line);
        self.redraw();
    }

    /// Print one queued output line without re-rendering the edit line.
    /// Used when draining the write queue at teardown.
    pub(crate) fn print_line_raw(&self, line: &str) {
        let mut term = self.term.lock().unwrap();
        let _ = writeln!(term, "{}{}{}", ansi::CLEAR_LINE, ansi::CURSOR_COLUMN_0, line);
        let _ = term.flush();
    }

    pub(crate) fn flush(&self) {
        let _ = self.term.lock().unwrap().flush();
    }
}

/// Interactive line input with history recall and async-safe output.
///
/// Starting a `Console` spawns the input and output loops immediately;
/// dropping it signals shutdown, joins both loops, flushes any output
/// still queued, and restores the terminal mode.
pub struct Console {
    shared: Arc<Shared>,
    commands: Receiver<String>,
    writes: Sender<String>,
    input_thread: Option<JoinHandle<()>>,
    output_thread: Option<JoinHandle<()>>,
    on_write: Option<Box<dyn Fn(&str) + Send>>,
    strip_writes: bool,
    owns_raw_mode: bool,
}

impl Console {
    /// Start on the real terminal: raw mode on, keystrokes from stdin,
    /// output to stdout.
    pub fn new(prompt: &str) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable terminal raw mode")?;
        let mut console = Self::with_source(
            prompt,
            Box::new(CrosstermByteSource::new()),
            Box::new(io::stdout()),
        );
        console.owns_raw_mode = true;
        Ok(console)
    }

    /// Start with an injected keystroke capability and terminal sink.
    /// This is how a platform-specific byte source is selected at
    /// startup, and how tests drive the engine end to end. Raw-mode
    /// handling is the caller's business here.
    pub fn with_source(
        prompt: &str,
        source: Box<dyn RawByteSource + Send>,
        sink: Box<dyn Write + Send>,
    ) -> Self {
        let shared = Arc::new(Shared::new(prompt.to_string(), sink));
        let (command_tx, command_rx) = unbounded();
        let (write_tx, write_rx) = unbounded();

        shared.redraw();

        let input_shared = Arc::clone(&shared);
        let input_thread = thread::spawn(move || input_loop(source, input_shared, command_tx));

        let output_shared = Arc::clone(&shared);
        let output_thread = thread::spawn(move || output_loop(output_shared, write_rx));

        Self {
            shared,
            commands: command_rx,
            writes: write_tx,
            input_thread: Some(input_thread),
            output_thread: Some(output_thread),
            on_write: None,
            strip_writes: false,
            owns_raw_mode: false,
        }
    }

    /// Enqueue a line for asynchronous output. The output loop prints
    /// it without corrupting the in-progress edit line. If an
    /// `on_write` callback is registered it receives the text here,
    /// ANSI-stripped first when escape removal is enabled.
    pub fn write(&self, line: &str) {
        if let Some(callback) = &self.on_write {
            if self.strip_writes {
                callback(&strip_ansi_escape_codes(line));
            } else {
                callback(line);
            }
        }
        // Fails only once the output loop is gone, i.e. mid-drop.
        let _ = self.writes.send(line.to_string());
    }

    /// Whether a completed line is waiting in the command queue.
    pub fn has_command(&self) -> bool {
        !self.commands.is_empty()
    }

    /// Take the oldest completed line. Check [`has_command`] first;
    /// calling this on an empty queue is [`Error::EmptyQueue`].
    ///
    /// [`has_command`]: Console::has_command
    pub fn get_command(&self) -> Result<String, Error> {
        self.commands.try_recv().map_err(|_| Error::EmptyQueue)
    }

    /// Register a callback invoked whenever a completed line lands in
    /// the command queue. It runs on the input thread and receives the
    /// submitted line; the line is already queued, so `get_command`
    /// works from inside it. Polling with [`has_command`] stays
    /// available regardless.
    ///
    /// [`has_command`]: Console::has_command
    pub fn set_on_command<F>(&mut self, callback: F)
    where
        F: Fn(&str) + Send + 'static,
    {
        *self.shared.on_command.lock().unwrap() = Some(Box::new(callback));
    }

    /// Register a callback invoked on every [`write`](Console::write),
    /// e.g. to mirror output into a log file.
    pub fn set_on_write<F>(&mut self, callback: F)
    where
        F: Fn(&str) + Send + 'static,
    {
        self.on_write = Some(Box::new(callback));
    }

    /// Strip ANSI escape codes from write content before it reaches the
    /// `on_write` callback, e.g. to drop color codes when logging.
    /// Disabled by default. The line sent to the terminal is untouched.
    pub fn enable_ansi_escape_removal_on_write(&mut self) {
        self.strip_writes = true;
    }

    /// Opposite of [`enable_ansi_escape_removal_on_write`].
    ///
    /// [`enable_ansi_escape_removal_on_write`]: Console::enable_ansi_escape_removal_on_write
    pub fn disable_ansi_escape_removal_on_write(&mut self) {
        self.strip_writes = false;
    }

    pub fn history_enabled(&self) -> bool {
        self.shared.history.lock().unwrap().enabled()
    }

    pub fn enable_history(&self) {
        self.shared.history.lock().unwrap().set_enabled(true);
    }

    pub fn disable_history(&self) {
        self.shared.history.lock().unwrap().set_enabled(false);
    }

    /// Cap the number of history entries; the oldest entry is evicted
    /// when a push would exceed the limit.
    pub fn set_history_limit(&self, limit: usize) {
        self.shared.history.lock().unwrap().set_limit(limit);
    }

    pub fn history_size(&self) -> usize {
        self.shared.history.lock().unwrap().len()
    }

    pub fn clear_history(&self) {
        self.shared.history.lock().unwrap().clear();
    }

    /// Snapshot of the history entries, oldest first. The hook for
    /// persisting history across sessions.
    pub fn history(&self) -> Vec<String> {
        self.shared.history.lock().unwrap().entries().to_vec()
    }

    /// Replace the history list, e.g. with entries loaded from disk.
    pub fn set_history(&self, entries: Vec<String>) {
        self.shared.history.lock().unwrap().set_entries(entries);
    }

    pub fn prompt(&self) -> String {
        self.shared.prompt.lock().unwrap().clone()
    }

    pub fn set_prompt(&self, prompt: &str) {
        *self.shared.prompt.lock().unwrap() = prompt.to_string();
        self.shared.redraw();
    }

    /// Mirror raw key bytes, escaped, to stderr. A diagnostics aid for
    /// figuring out what sequences a terminal actually sends.
    pub fn enable_key_debug(&self) {
        self.shared.key_debug.store(true, Ordering::Relaxed);
    }

    pub fn disable_key_debug(&self) {
        self.shared.key_debug.store(false, Ordering::Relaxed);
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::SeqCst);
        // The output loop drains the write queue on its way out; the
        // input loop notices shutdown at its next read timeout. Both
        // join cleanly.
        if let Some(handle) = self.output_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.input_thread.take() {
            let _ = handle.join();
        }
        if self.owns_raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}
