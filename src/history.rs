//! Bidirectional move history with a cursor.
//!
//! Entries up to and including the cursor are the past; entries after it are
//! a future that can be redone. Pushing a new entry discards that future.

#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    /// Number of entries in the past (cursor + 1).
    len: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            len: 0,
        }
    }

    /// Append after the cursor, dropping any abandoned future.
    pub fn push(&mut self, entry: T) {
        self.entries.truncate(self.len);
        self.entries.push(entry);
        self.len += 1;
    }

    /// The entry at the cursor.
    pub fn latest(&self) -> Option<&T> {
        self.len.checked_sub(1).map(|i| &self.entries[i])
    }

    /// The entry just before the cursor.
    pub fn previous(&self) -> Option<&T> {
        self.len.checked_sub(2).map(|i| &self.entries[i])
    }

    /// Move the cursor back one entry and return the entry it left.
    pub fn step_back(&mut self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(&self.entries[self.len])
    }

    /// Move the cursor forward one entry and return the entry it reached.
    pub fn step_forward(&mut self) -> Option<&T> {
        if self.len == self.entries.len() {
            return None;
        }
        self.len += 1;
        Some(&self.entries[self.len - 1])
    }

    pub fn has_past(&self) -> bool {
        self.len > 0
    }

    pub fn has_future(&self) -> bool {
        self.len < self.entries.len()
    }

    /// Number of entries in the past.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries in the past, oldest first.
    pub fn past(&self) -> &[T] {
        &self.entries[..self.len]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_back_and_forward() {
        let mut h = History::new();
        h.push(1);
        h.push(2);
        assert_eq!(h.latest(), Some(&2));
        assert_eq!(h.previous(), Some(&1));
        assert_eq!(h.step_back(), Some(&2));
        assert_eq!(h.latest(), Some(&1));
        assert!(h.has_future());
        assert_eq!(h.step_forward(), Some(&2));
        assert_eq!(h.step_forward(), None);
    }

    #[test]
    fn test_push_discards_future() {
        let mut h = History::new();
        h.push('a');
        h.push('b');
        h.push('c');
        h.step_back();
        h.step_back();
        h.push('x');
        assert_eq!(h.past(), &['a', 'x']);
        assert!(!h.has_future());
    }

    #[test]
    fn test_empty() {
        let mut h: History<u8> = History::default();
        assert!(h.is_empty());
        assert_eq!(h.latest(), None);
        assert_eq!(h.step_back(), None);
        assert!(!h.has_past());
    }
}
