use std::collections::VecDeque;

/// Default number of retained history entries.
pub const DEFAULT_CAPACITY: usize = 200;

/// Linear undo/redo stack over full snapshots.
///
/// Invariants:
/// - there is always at least one entry and `cursor < entries.len()`;
/// - committing after an undo discards the redo branch;
/// - once `capacity` entries exist, the oldest is dropped on commit.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Clone + PartialEq> History<T> {
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, DEFAULT_CAPACITY)
    }

    /// `capacity` is raised to at least 1.
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity.min(64));
        entries.push_back(initial);
        Self { entries, cursor: 0, capacity }
    }

    #[inline]
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Records `snapshot` as the new current entry.
    ///
    /// Returns `false` (and records nothing) when `snapshot` equals the current entry.
    pub fn commit(&mut self, snapshot: T) -> bool {
        if *self.current() == snapshot {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;

        log::trace!("history commit: {}/{}", self.cursor + 1, self.entries.len());
        true
    }

    /// Steps back one entry. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Steps forward one entry. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{PointField, Position};
    use crate::state::GradientState;

    // ── commit / undo / redo ──────────────────────────────────────────────

    #[test]
    fn commit_then_undo_then_redo_round_trips() {
        let mut state = GradientState::default();
        let mut h = History::new(state.snapshot());
        let before = state.snapshot();

        state.update_field(0, PointField::Position(Position::new(0.9, 0.1))).unwrap();
        let after = state.snapshot();
        assert!(h.commit(after.clone()));

        assert_eq!(h.undo(), Some(&before));
        assert_eq!(h.redo(), Some(&after));
    }

    #[test]
    fn undo_at_start_is_noop() {
        let mut h = History::new(1);
        assert_eq!(h.undo(), None);
        assert_eq!(h.cursor(), 0);
        assert_eq!(*h.current(), 1);
    }

    #[test]
    fn redo_at_end_is_noop() {
        let mut h = History::new(1);
        h.commit(2);
        assert_eq!(h.redo(), None);
        assert_eq!(h.cursor(), 1);
        assert_eq!(*h.current(), 2);
    }

    #[test]
    fn duplicate_commit_is_skipped() {
        let mut h = History::new(1);
        assert!(!h.commit(1));
        assert_eq!(h.len(), 1);
        assert!(h.commit(2));
        assert!(!h.commit(2));
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn commit_after_undo_discards_redo_branch() {
        let mut h = History::new(1);
        h.commit(2);
        h.commit(3);
        h.undo();
        h.undo();
        assert!(h.commit(4));
        assert_eq!(h.len(), 2);
        assert!(!h.can_redo());
        assert_eq!(h.undo(), Some(&1));
    }

    // ── capacity ──────────────────────────────────────────────────────────

    #[test]
    fn capacity_drops_oldest() {
        let mut h = History::with_capacity(0, 3);
        for v in 1..=5 {
            h.commit(v);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), 2);
        assert_eq!(h.undo(), Some(&4));
        assert_eq!(h.undo(), Some(&3));
        assert_eq!(h.undo(), None);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut h = History::with_capacity(0, 0);
        assert!(h.commit(1));
        assert_eq!(h.len(), 1);
        assert_eq!(*h.current(), 1);
        assert!(!h.can_undo());
    }
}
