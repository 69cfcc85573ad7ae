// src/history.rs
//! Paging through a newest-first list of weekly summaries.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("already at the oldest week")]
    AtOldest,
    #[error("already at the current week")]
    AtNewest,
    #[error("week {index} is out of range (history has {len} weeks)")]
    OutOfRange { index: usize, len: usize },
}

/// Where the cursor currently points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum Position {
    /// Nothing has been synthesized yet.
    NoHistory,
    /// Index 0, the week in progress.
    Current,
    /// A past week, `1..len`.
    Past(usize),
}

/// Index into a newest-first history. `0` is the current week; moving
/// "older" increases the index. Moves past either end are rejected and leave
/// the cursor where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryCursor {
    index: usize,
    len: usize,
}

impl HistoryCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn position(&self) -> Position {
        match (self.len, self.index) {
            (0, _) => Position::NoHistory,
            (_, 0) => Position::Current,
            (_, i) => Position::Past(i),
        }
    }

    pub fn can_go_older(&self) -> bool {
        self.len > 0 && self.index < self.len - 1
    }

    pub fn can_go_newer(&self) -> bool {
        self.index > 0
    }

    pub fn older(&mut self) -> Result<usize, NavigationError> {
        if !self.can_go_older() {
            return Err(NavigationError::AtOldest);
        }
        self.index += 1;
        Ok(self.index)
    }

    pub fn newer(&mut self) -> Result<usize, NavigationError> {
        if !self.can_go_newer() {
            return Err(NavigationError::AtNewest);
        }
        self.index -= 1;
        Ok(self.index)
    }

    /// Jump directly to `index`.
    pub fn seek(&mut self, index: usize) -> Result<usize, NavigationError> {
        if index >= self.len && !(index == 0 && self.len == 0) {
            return Err(NavigationError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.index = index;
        Ok(self.index)
    }
}

/// A newest-first summary series together with its cursor.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: HistoryCursor,
}

impl<T> History<T> {
    pub fn new(entries: Vec<T>) -> Self {
        let cursor = HistoryCursor::new(entries.len());
        Self { entries, cursor }
    }

    pub fn cursor(&self) -> &HistoryCursor {
        &self.cursor
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&T> {
        self.entries.get(self.cursor.index())
    }

    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    pub fn older(&mut self) -> Result<&T, NavigationError> {
        let index = self.cursor.older()?;
        Ok(&self.entries[index])
    }

    pub fn newer(&mut self) -> Result<&T, NavigationError> {
        let index = self.cursor.newer()?;
        Ok(&self.entries[index])
    }

    pub fn seek(&mut self, index: usize) -> Result<Option<&T>, NavigationError> {
        let index = self.cursor.seek(index)?;
        Ok(self.entries.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_older_stops_at_last_index() {
        let mut cursor = HistoryCursor::new(3);
        let mut seen = vec![cursor.index()];
        for _ in 0..3 {
            let _ = cursor.older();
            seen.push(cursor.index());
        }
        assert_eq!(seen, vec![0, 1, 2, 2]);
        assert_eq!(cursor.older(), Err(NavigationError::AtOldest));
        assert!(!cursor.can_go_older());
    }

    #[test]
    fn test_newer_stops_at_current_week() {
        let mut cursor = HistoryCursor::new(3);
        cursor.seek(2).unwrap();
        let mut seen = vec![cursor.index()];
        for _ in 0..3 {
            let _ = cursor.newer();
            seen.push(cursor.index());
        }
        assert_eq!(seen, vec![2, 1, 0, 0]);
        assert_eq!(cursor.newer(), Err(NavigationError::AtNewest));
    }

    #[test]
    fn test_positions() {
        let mut cursor = HistoryCursor::new(2);
        assert_eq!(cursor.position(), Position::Current);
        cursor.older().unwrap();
        assert_eq!(cursor.position(), Position::Past(1));

        let mut empty = HistoryCursor::new(0);
        assert_eq!(empty.position(), Position::NoHistory);
        assert!(!empty.can_go_older());
        assert!(!empty.can_go_newer());
        assert_eq!(empty.older(), Err(NavigationError::AtOldest));
    }

    #[test]
    fn test_single_week_disables_both_directions() {
        let cursor = HistoryCursor::new(1);
        assert!(!cursor.can_go_older());
        assert!(!cursor.can_go_newer());
    }

    #[test]
    fn test_seek_out_of_range_keeps_index() {
        let mut cursor = HistoryCursor::new(2);
        cursor.seek(1).unwrap();
        assert_eq!(
            cursor.seek(5),
            Err(NavigationError::OutOfRange { index: 5, len: 2 })
        );
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_history_selects_entry_under_cursor() {
        let mut history = History::new(vec!["this week", "last week"]);
        assert_eq!(history.selected(), Some(&"this week"));
        assert_eq!(history.older(), Ok(&"last week"));
        assert!(history.older().is_err());
        assert_eq!(history.selected(), Some(&"last week"));
        assert_eq!(history.newer(), Ok(&"this week"));

        let empty: History<&str> = History::new(vec![]);
        assert_eq!(empty.selected(), None);
        assert_eq!(empty.position(), Position::NoHistory);
    }
}
