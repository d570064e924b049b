//! Caller-owned checklist state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{MaintenanceHistoryRecord, Task};

/// Check state and note of one task in a draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftEntry {
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
}

/// The in-progress state of a checklist, keyed by task id.
///
/// Drafts are plain values: the caller builds one up while the technician
/// works through the list and hands it to the completion recorder.
///
/// ```rust
/// use upkeep_core::models::ChecklistDraft;
///
/// let mut draft = ChecklistDraft::new();
/// draft.check("daily-0a1b2c3d4e5f");
/// draft.set_note("daily-0a1b2c3d4e5f", "Filter replaced");
/// assert!(draft.is_checked("daily-0a1b2c3d4e5f"));
/// assert_eq!(draft.note("daily-0a1b2c3d4e5f"), Some("Filter replaced"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ChecklistDraft {
    entries: BTreeMap<String, DraftEntry>,
}

impl ChecklistDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft with every task in `tasks` checked.
    pub fn all_checked(tasks: &[Task]) -> Self {
        let mut draft = Self::new();
        for task in tasks {
            draft.check(&task.id);
        }
        draft
    }

    /// Draft pre-filled from a previously recorded checklist.
    pub fn from_record(record: &MaintenanceHistoryRecord) -> Self {
        let entries = record
            .tasks
            .iter()
            .map(|task| {
                (
                    task.id.clone(),
                    DraftEntry {
                        completed: task.completed,
                        notes: task.notes.clone(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn check(&mut self, task_id: &str) {
        self.entries.entry(task_id.to_string()).or_default().completed = true;
    }

    pub fn uncheck(&mut self, task_id: &str) {
        if let Some(entry) = self.entries.get_mut(task_id) {
            entry.completed = false;
        }
    }

    /// Flip the check state of a task, returning the new state.
    pub fn toggle(&mut self, task_id: &str) -> bool {
        let entry = self.entries.entry(task_id.to_string()).or_default();
        entry.completed = !entry.completed;
        entry.completed
    }

    pub fn set_note(&mut self, task_id: &str, notes: impl Into<String>) {
        self.entries.entry(task_id.to_string()).or_default().notes = notes.into();
    }

    /// Forget a task's check state and note.
    pub fn clear_task(&mut self, task_id: &str) {
        self.entries.remove(task_id);
    }

    pub fn is_checked(&self, task_id: &str) -> bool {
        self.entries
            .get(task_id)
            .is_some_and(|entry| entry.completed)
    }

    /// The task's note, if one was written.
    pub fn note(&self, task_id: &str) -> Option<&str> {
        self.entries
            .get(task_id)
            .map(|entry| entry.notes.as_str())
            .filter(|notes| !notes.is_empty())
    }

    /// Number of `tasks` checked in this draft.
    pub fn checked_count(&self, tasks: &[Task]) -> usize {
        tasks.iter().filter(|task| self.is_checked(&task.id)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
