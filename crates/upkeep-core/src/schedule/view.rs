//! Checklist views: everything needed to present one frequency's checklist
//! at a single instant.

use std::cmp::Reverse;

use jiff::Zoned;
use serde::Serialize;

use super::{
    overdue::is_overdue,
    period::{deadline, next_period_start, period},
    resolver::tasks_for,
};
use crate::{
    display::TimeRemaining,
    error::Result,
    models::{
        ChecklistDraft, Frequency, MaintenanceHistory, MaintenanceHistoryRecord, MaintenancePlan,
        PeriodId, Task,
    },
};

/// The state of one frequency's checklist, evaluated at `evaluated_at`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistView {
    pub frequency: Frequency,
    pub period: PeriodId,
    pub tasks: Vec<Task>,
    pub deadline: Option<Zoned>,
    pub next_period_start: Option<Zoned>,
    pub overdue: bool,
    /// Record already filed for the current period
    pub completion: Option<MaintenanceHistoryRecord>,
    pub evaluated_at: Zoned,
}

impl ChecklistView {
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    /// A draft to start from: the filed record's state, or nothing checked.
    pub fn draft(&self) -> ChecklistDraft {
        self.completion
            .as_ref()
            .map(ChecklistDraft::from_record)
            .unwrap_or_default()
    }

    pub fn time_remaining(&self) -> TimeRemaining {
        TimeRemaining::new(
            self.deadline.as_ref().map(Zoned::timestamp),
            self.evaluated_at.timestamp(),
        )
    }

    /// Whole days until the next period opens, rounded up.
    pub fn days_until_next_period(&self) -> Option<i64> {
        let start = self.next_period_start.as_ref()?;
        let seconds = start.timestamp().as_second() - self.evaluated_at.timestamp().as_second();
        Some((seconds.max(0) + 86_399) / 86_400)
    }
}

/// Evaluate the checklist of `frequency` at `now`.
pub fn checklist_view(
    plan: &MaintenancePlan,
    history: &MaintenanceHistory,
    frequency: Frequency,
    now: &Zoned,
) -> Result<ChecklistView> {
    let current = period(frequency, now)?;
    let completion = history.find(frequency, &current).cloned();
    let tasks = tasks_for(plan, frequency);
    // An empty checklist has nothing to fall behind on
    let overdue = !tasks.is_empty() && is_overdue(frequency, plan.created_at, history, now)?;

    Ok(ChecklistView {
        frequency,
        tasks,
        deadline: deadline(frequency, now)?,
        next_period_start: next_period_start(frequency, now)?,
        overdue,
        completion,
        period: current,
        evaluated_at: now.clone(),
    })
}

/// Records shown under the history of `frequency`, newest first.
///
/// The `As Needed` and `Other` histories also list every individually
/// logged task.
pub fn completed_checklists(
    history: &MaintenanceHistory,
    frequency: Frequency,
) -> Vec<&MaintenanceHistoryRecord> {
    let mut records: Vec<_> = history
        .iter()
        .filter(|record| {
            record.frequency == frequency
                || (matches!(frequency, Frequency::AsNeeded | Frequency::Other)
                    && record.is_as_needed_task)
        })
        .collect();
    records.sort_by_key(|record| Reverse(record.completed_at));
    records
}
