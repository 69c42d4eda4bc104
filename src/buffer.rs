//! The line currently being typed
//!
//! `EditBuffer` is byte-oriented and append/pop-back only: there is no
//! interior cursor, so the cursor position always equals the content
//! length. Alongside the live content it keeps a snapshot of the
//! in-progress line so that browsing into history and back restores
//! unsaved keystrokes.

/// The in-progress input line and its cursor.
#[derive(Default)]
pub struct EditBuffer {
    content: Vec<u8>,
    cursor: usize,
    snapshot: Vec<u8>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one printable byte and refresh the snapshot, so switching
    /// into history browsing and back preserves unsaved keystrokes.
    /// The caller echoes the byte to the terminal.
    pub fn append(&mut self, byte: u8) {
        self.content.push(byte);
        self.cursor += 1;
        self.snapshot = self.content.clone();
    }

    /// Remove the last byte. No-op on an empty buffer. Returns whether
    /// anything was removed, so the caller knows to redraw.
    pub fn backspace(&mut self) -> bool {
        if self.content.is_empty() {
            return false;
        }
        self.cursor -= 1;
        self.content.pop();
        true
    }

    /// Replace the displayed content without touching the snapshot.
    /// Used by history navigation.
    pub fn replace(&mut self, bytes: &[u8]) {
        self.content = bytes.to_vec();
        self.cursor = self.content.len();
    }

    /// Clear everything after a line is submitted.
    pub fn reset(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.snapshot.clear();
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn snapshot(&self) -> &[u8] {
        &self.snapshot
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The current content as a string, for submission.
    pub fn to_line(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_advances_cursor() {
        let mut buf = EditBuffer::new();
        buf.append(b'a');
        buf.append(b'b');
        assert_eq!(buf.content(), b"ab");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_append_refreshes_snapshot() {
        let mut buf = EditBuffer::new();
        buf.append(b'h');
        buf.append(b'i');
        assert_eq!(buf.snapshot(), b"hi");
    }

    #[test]
    fn test_backspace() {
        let mut buf = EditBuffer::new();
        buf.append(b'a');
        buf.append(b'b');
        assert!(buf.backspace());
        assert_eq!(buf.content(), b"a");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut buf = EditBuffer::new();
        assert!(!buf.backspace());
        assert_eq!(buf.content(), b"");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_replace_keeps_snapshot() {
        let mut buf = EditBuffer::new();
        buf.append(b'x');
        buf.replace(b"history entry");
        assert_eq!(buf.content(), b"history entry");
        assert_eq!(buf.cursor(), 13);
        assert_eq!(buf.snapshot(), b"x");
    }

    #[test]
    fn test_reset() {
        let mut buf = EditBuffer::new();
        buf.append(b'a');
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.snapshot(), b"");
    }

    #[test]
    fn test_to_line() {
        let mut buf = EditBuffer::new();
        for b in b"status" {
            buf.append(*b);
        }
        assert_eq!(buf.to_line(), "status");
    }
}
