//! Task resolution: which schedule entries make up the checklist of a
//! frequency bucket.

use std::collections::HashSet;

use crate::models::{Frequency, MaintenancePlan, ScheduleEntry, Task};

/// Phrases marking a task as conditional rather than recurring.
pub const AS_NEEDED_PHRASES: [&str; 3] = ["as needed", "when needed", "if needed"];

/// Whether `text` uses as-needed phrasing, ignoring case.
pub fn mentions_as_needed(text: &str) -> bool {
    let lower = text.to_lowercase();
    AS_NEEDED_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
}

/// Resolve the checklist of `frequency` from `plan`, in schedule order.
///
/// - `Other` collects entries tagged "other" plus every entry whose text uses
///   as-needed phrasing, whatever its tag, deduplicated by description (first
///   occurrence wins).
/// - `As Needed` collects only entries tagged "as needed".
/// - Every other bucket takes entries with a matching tag, minus those whose
///   text uses as-needed phrasing: such entries are misclassified and surface
///   under `Other` instead.
///
/// Task ids are the stable entry ids of the plan, so they do not depend on
/// the position of an entry in the schedule.
pub fn tasks_for(plan: &MaintenancePlan, frequency: Frequency) -> Vec<Task> {
    let ids = plan.entry_ids();
    let entries = plan.schedule.iter().zip(ids);

    match frequency {
        Frequency::Other => {
            let mut seen = HashSet::new();
            entries
                .filter(|(entry, _)| {
                    entry.is_tagged(Frequency::Other) || mentions_as_needed(&entry.tasks)
                })
                .filter(|(entry, _)| seen.insert(entry.tasks.clone()))
                .map(|(entry, id)| {
                    let is_as_needed_task = mentions_as_needed(&entry.tasks);
                    to_task(entry, id, frequency, is_as_needed_task)
                })
                .collect()
        }
        Frequency::AsNeeded => entries
            .filter(|(entry, _)| entry.is_tagged(Frequency::AsNeeded))
            .map(|(entry, id)| to_task(entry, id, frequency, true))
            .collect(),
        _ => entries
            .filter(|(entry, _)| entry.is_tagged(frequency) && !mentions_as_needed(&entry.tasks))
            .map(|(entry, id)| to_task(entry, id, frequency, false))
            .collect(),
    }
}

/// Find a task that can be logged on its own, by id.
///
/// Ad-hoc completions are offered for every `As Needed` task and for the
/// `Other` tasks worded as needed; the first bucket listing the id wins.
pub fn find_ad_hoc_task(plan: &MaintenancePlan, task_id: &str) -> Option<Task> {
    [Frequency::AsNeeded, Frequency::Other]
        .into_iter()
        .flat_map(|frequency| tasks_for(plan, frequency))
        .filter(|task| task.is_as_needed_task)
        .find(|task| task.id == task_id)
}

fn to_task(entry: &ScheduleEntry, id: String, frequency: Frequency, is_as_needed_task: bool) -> Task {
    Task {
        id,
        frequency,
        description: entry.tasks.clone(),
        page_reference: entry.page_reference.clone(),
        is_as_needed_task,
    }
}
