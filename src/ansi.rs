//! ANSI escape sequence constants and helpers
//!
//! Centralizes the terminal control codes used by the redraw protocol,
//! the control bytes recognized on input, and the escape-stripping
//! scanner used to sanitize text before it reaches a logging callback.

// === Redraw Protocol ===

/// Erase the entire current line (CSI 2 K)
pub const CLEAR_LINE: &str = "\x1b[2K";

/// Move the cursor to column 0 by moving far left (CSI 1000 D)
pub const CURSOR_COLUMN_0: &str = "\x1b[1000D";

// === Control Bytes ===

pub mod key {
    /// Escape byte (0x1b / 27)
    pub const ESC: u8 = 0x1b;

    /// Delete byte (0x7f / 127), sent by most terminals for backspace
    pub const DEL: u8 = 0x7f;

    /// Backspace byte (0x08)
    pub const BS: u8 = 0x08;

    /// Line feed byte, submits the current line
    pub const LF: u8 = b'\n';

    /// CSI introducer, the byte following ESC in arrow-key sequences
    pub const CSI: u8 = b'[';

    /// Arrow key terminators (ESC [ direction)
    pub const UP: u8 = b'A';
    pub const DOWN: u8 = b'B';
}

/// Terminator bytes that end a CSI-like escape sequence for the stripper:
/// cursor movement, erase, scroll, and graphics-mode codes.
const STRIP_TERMINATORS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'T', 'f', 'm',
];

enum StripState {
    Normal,
    Escaped,
}

/// Remove ANSI escape sequences from a string.
///
/// A two-state scanner: ESC switches to the escaped state, where every
/// character is discarded up to and including the first terminator in
/// `{A,B,C,D,E,F,G,H,J,K,T,f,m}`. Parameter bytes between ESC and the
/// terminator are discarded with it. An ESC never followed by a
/// terminator swallows the rest of the input; that greediness matches
/// the sequences this crate emits and is an accepted limitation.
pub fn strip_ansi_escape_codes(original: &str) -> String {
    let mut out = String::with_capacity(original.len());
    let mut state = StripState::Normal;

    for c in original.chars() {
        match state {
            StripState::Normal if c == '\x1b' => {
                state = StripState::Escaped;
            }
            StripState::Normal => out.push(c),
            StripState::Escaped => {
                if STRIP_TERMINATORS.contains(&c) {
                    state = StripState::Normal;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(strip_ansi_escape_codes("hello"), "hello");
        assert_eq!(strip_ansi_escape_codes(""), "");
    }

    #[test]
    fn test_graphics_mode_with_parameters() {
        assert_eq!(
            strip_ansi_escape_codes("\x1b[1;2mhello world"),
            "hello world"
        );
        assert_eq!(strip_ansi_escape_codes("\x1b[mfoo bar baz"), "foo bar baz");
    }

    #[test]
    fn test_cursor_movement() {
        assert_eq!(strip_ansi_escape_codes("\x1b[Ahello\nworld"), "hello\nworld");
        assert_eq!(strip_ansi_escape_codes("\x1b[Bfoo bar"), "foo bar");
        assert_eq!(strip_ansi_escape_codes("\x1b[Cfoo\nbar"), "foo\nbar");
        assert_eq!(strip_ansi_escape_codes("\x1b[Dfoo\tbar"), "foo\tbar");
        assert_eq!(strip_ansi_escape_codes("\x1b[Efoo\rbar"), "foo\rbar");
        assert_eq!(strip_ansi_escape_codes("\x1b[Fhello world!"), "hello world!");
        assert_eq!(strip_ansi_escape_codes("\x1b[Gfoo bar baz"), "foo bar baz");
        assert_eq!(
            strip_ansi_escape_codes("\x1b[Hfoo\nbar\nbaz"),
            "foo\nbar\nbaz"
        );
        assert_eq!(strip_ansi_escape_codes("\x1b[fhello\tworld!"), "hello\tworld!");
    }

    #[test]
    fn test_erase_and_scroll() {
        assert_eq!(
            strip_ansi_escape_codes("\x1b[Jfoo\tbar\tbaz"),
            "foo\tbar\tbaz"
        );
        assert_eq!(
            strip_ansi_escape_codes("\x1b[Kfoo\rbar\rbaz"),
            "foo\rbar\rbaz"
        );
        assert_eq!(strip_ansi_escape_codes("\x1b[Thello\nworld!"), "hello\nworld!");
    }

    #[test]
    fn test_redraw_protocol_sequences() {
        let line = format!("{}{}> pending", CLEAR_LINE, CURSOR_COLUMN_0);
        assert_eq!(strip_ansi_escape_codes(&line), "> pending");
    }

    #[test]
    fn test_sequence_in_the_middle() {
        assert_eq!(
            strip_ansi_escape_codes("before\x1b[38;5;83mafter"),
            "beforeafter"
        );
    }

    #[test]
    fn test_unterminated_escape_swallows_rest() {
        // Greedy by design: no terminator means nothing after ESC survives.
        assert_eq!(strip_ansi_escape_codes("keep\x1b[12;34"), "keep");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "hello",
            "\x1b[1;2mhello world",
            "a\x1b[Kb\x1b[mc",
            "keep\x1b[12;34",
        ];
        for input in inputs {
            let once = strip_ansi_escape_codes(input);
            assert_eq!(strip_ansi_escape_codes(&once), once);
        }
    }
}
