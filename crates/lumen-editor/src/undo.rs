//! Snapshot-based undo history for the inspector's undo hook.

use std::collections::VecDeque;

use lumen_materials::{Material, UndoRecorder};

/// One undoable step: the label shown to the user and the selection as it
/// was right before the step.
#[derive(Clone, Debug)]
pub struct UndoEntry {
    pub label: String,
    pub snapshot: Vec<Material>,
}

/// Bounded stack of selection snapshots.
#[derive(Debug)]
pub struct UndoHistory {
    entries: VecDeque<UndoEntry>,
    capacity: usize,
}

impl UndoHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    /// Restores the most recent snapshot into `selection`.
    ///
    /// Returns the undone step's label, or `None` if there is nothing to undo
    /// or the snapshot no longer matches the selection's size.
    pub fn undo(&mut self, selection: &mut [Material]) -> Option<String> {
        let entry = self.entries.pop_back()?;
        if entry.snapshot.len() != selection.len() {
            tracing::warn!(label = entry.label.as_str(), "selection changed since undo was recorded");
            return None;
        }
        selection.clone_from_slice(&entry.snapshot);
        Some(entry.label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_label(&self) -> Option<&str> {
        self.entries.back().map(|e| e.label.as_str())
    }
}

impl UndoRecorder for UndoHistory {
    fn register_property_change_undo(&mut self, label: &str, selection: &[Material]) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(UndoEntry {
            label: label.to_string(),
            snapshot: selection.to_vec(),
        });
    }
}
