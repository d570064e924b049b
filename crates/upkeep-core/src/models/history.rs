//! Maintenance history: completion records and the keyed log holding them.

use std::{collections::HashMap, fmt};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Frequency;

/// Opaque identifier of a compliance period ("2024-01-07_week", "2024_Q1").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodId(pub String);

impl PeriodId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeriodId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Who wrote a task note, and when.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteMetadata {
    pub author: String,
    pub timestamp: Timestamp,
}

/// Outcome of a single task within a completed checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub id: String,
    pub description: String,
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub note_metadata: Option<NoteMetadata>,
}

/// An immutable entry of the maintenance history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceHistoryRecord {
    pub frequency: Frequency,
    pub period: PeriodId,
    pub completed_at: Timestamp,
    pub completed_by: String,
    #[serde(default)]
    pub tasks: Vec<TaskResult>,
    /// Single ad-hoc task completion rather than a full checklist
    #[serde(default)]
    pub is_as_needed_task: bool,
}

impl MaintenanceHistoryRecord {
    /// Whether this record occupies a `(frequency, period)` slot.
    ///
    /// As-needed completions are distinct events and never take part in
    /// upserts.
    pub fn is_period_bound(&self) -> bool {
        !self.is_as_needed_task && !self.frequency.is_as_needed()
    }

    /// Number of tasks marked completed.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }
}

/// The append-only maintenance log of one device.
///
/// Period-bound records are indexed by `(frequency, period)`; a new record for
/// an occupied slot replaces the old one in place. Serializes as a plain
/// sequence of records and rebuilds its index on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "Vec<MaintenanceHistoryRecord>",
    into = "Vec<MaintenanceHistoryRecord>"
)]
pub struct MaintenanceHistory {
    records: Vec<MaintenanceHistoryRecord>,
    index: HashMap<(Frequency, PeriodId), usize>,
}

impl MaintenanceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the record completing `period` of `frequency`.
    pub fn find(&self, frequency: Frequency, period: &PeriodId) -> Option<&MaintenanceHistoryRecord> {
        self.index
            .get(&(frequency, period.clone()))
            .map(|&position| &self.records[position])
    }

    /// Whether `period` of `frequency` has a completion record.
    pub fn contains(&self, frequency: Frequency, period: &PeriodId) -> bool {
        self.index.contains_key(&(frequency, period.clone()))
    }

    /// Whether any record, indexed or not, carries `period`.
    pub fn has_period(&self, period: &PeriodId) -> bool {
        self.records.iter().any(|record| &record.period == period)
    }

    /// Insert a period-bound record, replacing the occupant of its slot.
    ///
    /// Returns the position of the record in the log. Records that are not
    /// period-bound are appended.
    pub fn upsert(&mut self, record: MaintenanceHistoryRecord) -> usize {
        if !record.is_period_bound() {
            return self.append(record);
        }

        let key = (record.frequency, record.period.clone());
        match self.index.get(&key) {
            Some(&position) => {
                self.records[position] = record;
                position
            }
            None => {
                let position = self.records.len();
                self.records.push(record);
                self.index.insert(key, position);
                position
            }
        }
    }

    /// Append a record as a distinct event.
    pub fn append(&mut self, record: MaintenanceHistoryRecord) -> usize {
        let position = self.records.len();
        if record.is_period_bound() {
            self.index
                .entry((record.frequency, record.period.clone()))
                .or_insert(position);
        }
        self.records.push(record);
        position
    }

    pub fn records(&self) -> &[MaintenanceHistoryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaintenanceHistoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent completion time across the whole log.
    pub fn last_completed_at(&self) -> Option<Timestamp> {
        self.records.iter().map(|record| record.completed_at).max()
    }
}

impl From<Vec<MaintenanceHistoryRecord>> for MaintenanceHistory {
    fn from(records: Vec<MaintenanceHistoryRecord>) -> Self {
        // First occurrence wins for logs written before slots were unique.
        let mut history = Self::new();
        for record in records {
            history.append(record);
        }
        history
    }
}

impl From<MaintenanceHistory> for Vec<MaintenanceHistoryRecord> {
    fn from(history: MaintenanceHistory) -> Self {
        history.records
    }
}

impl<'a> IntoIterator for &'a MaintenanceHistory {
    type Item = &'a MaintenanceHistoryRecord;
    type IntoIter = std::slice::Iter<'a, MaintenanceHistoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
