//! Submitted-line history with a navigation cursor
//!
//! A bounded, ordered list of previously submitted lines. The cursor is
//! always in `[0, entries.len()]`; the one-past-the-end position means
//! "not browsing history, show the live buffer".

/// Default number of entries kept before the oldest is evicted.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

pub struct HistoryStore {
    entries: Vec<String>,
    cursor: usize,
    limit: usize,
    enabled: bool,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit: DEFAULT_HISTORY_LIMIT,
            enabled: true,
        }
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submitted line. If adding one entry would put the list
    /// over the limit, the oldest entries are removed first. The cursor
    /// is reset to one past the last entry. A zero limit stores
    /// nothing; eviction is silent policy, never an error.
    pub fn push(&mut self, line: String) {
        if self.limit == 0 {
            self.cursor = self.entries.len();
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.remove(0);
        }
        self.entries.push(line);
        self.cursor = self.entries.len();
    }

    /// Move the cursor toward older entries. No-op at the oldest.
    /// Returns whether the cursor moved.
    pub fn go_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move the cursor toward newer entries. No-op at the live-buffer
    /// position. Returns whether the cursor moved.
    pub fn go_forward(&mut self) -> bool {
        if self.cursor == self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// The entry under the cursor, or `None` when the cursor sits at
    /// the live-buffer position.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Cap the entry count, dropping the oldest entries right away if
    /// the list is already over the new limit. The cursor shifts with
    /// the removals so it keeps pointing at the same entry (or stays at
    /// the live-buffer position).
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        if self.entries.len() > limit {
            let removed = self.entries.len() - limit;
            self.entries.drain(..removed);
            self.cursor = self.cursor.saturating_sub(removed);
        }
    }

    /// Replace the whole list, e.g. when loading persisted history.
    pub fn set_entries(&mut self, entries: Vec<String>) {
        self.entries = entries;
        self.cursor = self.entries.len();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(lines: &[&str]) -> HistoryStore {
        let mut store = HistoryStore::new();
        for line in lines {
            store.push(line.to_string());
        }
        store
    }

    #[test]
    fn test_push_resets_cursor_to_end() {
        let store = store_with(&["a", "b"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut store = HistoryStore::new();
        store.set_limit(2);
        store.push("a".to_string());
        store.push("b".to_string());
        store.push("c".to_string());
        assert_eq!(store.entries(), ["b", "c"]);
    }

    #[test]
    fn test_len_never_exceeds_limit() {
        let mut store = HistoryStore::new();
        store.set_limit(3);
        for i in 0..10 {
            store.push(format!("line {i}"));
            assert!(store.len() <= 3);
        }
        assert_eq!(store.entries(), ["line 7", "line 8", "line 9"]);
    }

    #[test]
    fn test_zero_limit_stores_nothing() {
        let mut store = HistoryStore::new();
        store.set_limit(0);
        store.push("a".to_string());
        store.push("b".to_string());
        assert!(store.is_empty());
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_lowering_limit_truncates_oldest() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        store.set_limit(2);
        assert_eq!(store.entries(), ["c", "d"]);
        // Still at the live-buffer position.
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_lowering_limit_shifts_browsing_cursor() {
        let mut store = store_with(&["a", "b", "c"]);
        store.go_back();
        assert_eq!(store.current(), Some("c"));
        store.set_limit(1);
        assert_eq!(store.current(), Some("c"));
    }

    #[test]
    fn test_limit_to_zero_then_back_up() {
        let mut store = store_with(&["a", "b"]);
        store.set_limit(0);
        assert!(store.is_empty());
        store.set_limit(2);
        store.push("c".to_string());
        assert_eq!(store.entries(), ["c"]);
    }

    #[test]
    fn test_go_back_clamps_at_zero() {
        let mut store = store_with(&["a"]);
        assert!(store.go_back());
        assert_eq!(store.current(), Some("a"));
        assert!(!store.go_back());
        assert_eq!(store.current(), Some("a"));
    }

    #[test]
    fn test_go_forward_clamps_at_end() {
        let mut store = store_with(&["a"]);
        assert!(!store.go_forward());
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_back_then_forward_returns_to_live() {
        let mut store = store_with(&["a", "b"]);
        assert!(store.go_back());
        assert_eq!(store.current(), Some("b"));
        assert!(store.go_forward());
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_clear() {
        let mut store = store_with(&["a", "b"]);
        store.go_back();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_set_entries_points_past_last() {
        let mut store = HistoryStore::new();
        store.set_entries(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.current(), None);
        store.go_back();
        assert_eq!(store.current(), Some("y"));
    }
}
