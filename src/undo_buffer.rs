//! Undo functionality.
//!
//! Snapshot-based: every entry stores the full display value and the
//! selection before an edit. Coalescing of typing runs is decided by the
//! engine; the buffer only stores what it is given.

use crate::Selection;
use std::fmt::Debug;

/// Kind of the edit that produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Input,
    Backspace,
}

/// One undo snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    /// Display value before the edit.
    pub value: String,
    /// Selection before the edit.
    pub selection: Selection,
    /// Kind of the previous edit, used to restore coalescing state.
    pub last_op: Option<EditOp>,
    /// Bookkeeping entry pushed when undoing started, so a redo can
    /// come back to the pre-undo state.
    pub start_undo: bool,
}

/// Replay state of the buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Replay {
    /// New edits append at the end.
    #[default]
    Live,
    /// Positioned inside history by undo/redo.
    At(usize),
}

/// Undo buffer.
///
/// Keeps the snapshot stack plus a replay cursor. [undo](UndoBuffer::undo)
/// enters replay mode, [redo](UndoBuffer::redo) leaves it when it reaches
/// the end of the stack, and any new edit resumes live appending and
/// drops stale redo entries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UndoBuffer {
    entries: Vec<UndoEntry>,
    replay: Replay,
}

impl UndoBuffer {
    /// New, empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Nothing stored?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.replay = Replay::Live;
    }

    /// Leave replay mode before a new edit.
    ///
    /// Entries after the replay cursor are stale redo state and are
    /// dropped.
    pub fn resume_live(&mut self) {
        if let Replay::At(idx) = self.replay {
            self.entries.truncate(idx);
            self.replay = Replay::Live;
        }
    }

    /// Append a snapshot at the end of the stack.
    ///
    /// Call [resume_live](Self::resume_live) first; pushing while
    /// replaying is a logic error.
    pub fn push(&mut self, entry: UndoEntry) {
        debug_assert!(self.replay == Replay::Live);
        self.entries.push(entry);
    }

    /// Step back one snapshot.
    ///
    /// `current` is the present engine state; on the first undo from
    /// live mode it is kept as a `start_undo` entry if it differs from
    /// the newest snapshot, so a redo can restore it.
    ///
    /// Returns the entry to restore, or None if there is nothing to
    /// undo.
    pub fn undo(&mut self, current: UndoEntry) -> Option<UndoEntry> {
        if self.entries.is_empty() {
            return None;
        }
        match self.replay {
            Replay::Live => {
                let idx = self.entries.len() - 1;
                let last = &self.entries[idx];
                if last.value != current.value || last.selection != current.selection {
                    self.entries.push(UndoEntry {
                        start_undo: true,
                        ..current
                    });
                }
                self.replay = Replay::At(idx);
                Some(self.entries[idx].clone())
            }
            Replay::At(0) => None,
            Replay::At(idx) => {
                self.replay = Replay::At(idx - 1);
                Some(self.entries[idx - 1].clone())
            }
        }
    }

    /// Step forward one snapshot.
    ///
    /// Only valid while replaying. Reaching the end of the stack leaves
    /// replay mode and pops the `start_undo` bookkeeping entry.
    ///
    /// Returns the entry to restore, or None if there is nothing to
    /// redo.
    pub fn redo(&mut self) -> Option<UndoEntry> {
        let Replay::At(idx) = self.replay else {
            return None;
        };
        if idx + 1 >= self.entries.len() {
            return None;
        }
        let entry = self.entries[idx + 1].clone();
        if idx + 2 == self.entries.len() {
            self.replay = Replay::Live;
            if entry.start_undo {
                self.entries.pop();
            }
        } else {
            self.replay = Replay::At(idx + 1);
        }
        entry.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: &str, pos: u32) -> UndoEntry {
        UndoEntry {
            value: value.into(),
            selection: Selection::caret(pos),
            last_op: Some(EditOp::Input),
            start_undo: false,
        }
    }

    #[test]
    fn test_undo_redo() {
        let mut u = UndoBuffer::new();
        u.push(entry("___", 0));
        u.push(entry("1__", 1));

        // current state differs from the newest snapshot
        let restored = u.undo(entry("12_", 2)).expect("undo");
        assert_eq!(restored.value, "1__");
        assert_eq!(u.len(), 3);

        let restored = u.undo(entry("1__", 1)).expect("undo");
        assert_eq!(restored.value, "___");
        assert!(u.undo(entry("___", 0)).is_none());

        let restored = u.redo().expect("redo");
        assert_eq!(restored.value, "1__");
        let restored = u.redo().expect("redo");
        assert_eq!(restored.value, "12_");
        assert!(restored.start_undo);
        // bookkeeping entry is cleaned up on exit
        assert_eq!(u.len(), 2);
        assert!(u.redo().is_none());
    }

    #[test]
    fn test_resume_live() {
        let mut u = UndoBuffer::new();
        u.push(entry("___", 0));
        u.push(entry("1__", 1));
        u.undo(entry("12_", 2)).expect("undo");
        u.undo(entry("1__", 1)).expect("undo");

        // a new edit drops the redo entries
        u.resume_live();
        assert_eq!(u.len(), 0);
        assert!(u.redo().is_none());
    }

    #[test]
    fn test_undo_unchanged_current() {
        let mut u = UndoBuffer::new();
        u.push(entry("___", 0));

        // current equals the newest snapshot, no start_undo entry
        let restored = u.undo(entry("___", 0)).expect("undo");
        assert_eq!(restored.value, "___");
        assert_eq!(u.len(), 1);
        // and nothing ahead to redo
        assert!(u.redo().is_none());
    }
}
