//! Completion recording: turning a checklist draft into a history record.
//!
//! Both entry points validate before touching anything, so on error the plan
//! and the history are left exactly as they were.

use jiff::Zoned;
use log::{debug, info};

use super::{
    period::period,
    resolver::{find_ad_hoc_task, tasks_for},
};
use crate::{
    error::{Result, UpkeepError},
    models::{
        ChecklistDraft, Frequency, MaintenanceHistory, MaintenanceHistoryRecord, MaintenancePlan,
        NoteMetadata, PeriodId, Task, TaskResult,
    },
};

/// Record a full checklist of `frequency` completed by `actor` at `now`.
///
/// Every resolved task must be checked in `draft`; single as-needed tasks
/// are logged through [`record_ad_hoc_task`] instead. Regular checklists
/// replace any record already filed for the same period, `As Needed`
/// checklists are always appended. The first completion against a plan sets
/// its epoch.
pub fn record_checklist(
    plan: &mut MaintenancePlan,
    history: &mut MaintenanceHistory,
    frequency: Frequency,
    draft: &ChecklistDraft,
    actor: &str,
    now: &Zoned,
) -> Result<MaintenanceHistoryRecord> {
    let tasks = tasks_for(plan, frequency);
    if tasks.is_empty() {
        return Err(UpkeepError::validation(format!(
            "No {} tasks found in the maintenance plan",
            frequency.as_str()
        )));
    }

    let checked = draft.checked_count(&tasks);
    if checked < tasks.len() {
        let reason = if frequency.is_as_needed() {
            "Please complete all tasks before saving, or log a single task on its own"
        } else {
            "Please complete all tasks before saving"
        };
        return Err(UpkeepError::validation(reason));
    }

    let record = MaintenanceHistoryRecord {
        frequency,
        period: period(frequency, now)?,
        completed_at: now.timestamp(),
        completed_by: actor.to_string(),
        tasks: tasks
            .iter()
            .map(|task| task_result(task, draft, actor, now))
            .collect(),
        is_as_needed_task: false,
    };

    let position = if frequency.is_as_needed() {
        history.append(record.clone())
    } else {
        history.upsert(record.clone())
    };
    debug!(
        "Filed {} checklist for period {} at position {position}",
        frequency.as_str(),
        record.period
    );

    initialize_epoch(plan, now);
    info!(
        "Recorded {} checklist ({}/{} tasks) by {actor}",
        frequency.as_str(),
        checked,
        tasks.len()
    );

    Ok(record)
}

/// Record the completion of a single as-needed task.
///
/// The task id is resolved against the `As Needed` checklist and the
/// as-needed tasks of the `Other` checklist.
/// Each call appends a distinct record whose period combines the date and
/// the task id, suffixed `_2`, `_3`, ... when the same task was already
/// logged that day.
pub fn record_ad_hoc_task(
    plan: &mut MaintenancePlan,
    history: &mut MaintenanceHistory,
    task_id: &str,
    draft: &ChecklistDraft,
    actor: &str,
    now: &Zoned,
) -> Result<MaintenanceHistoryRecord> {
    let task = find_ad_hoc_task(plan, task_id).ok_or_else(|| UpkeepError::ReferenceNotFound {
        task_id: task_id.to_string(),
    })?;

    if !draft.is_checked(&task.id) {
        return Err(UpkeepError::validation(
            "Please complete the task before saving",
        ));
    }

    let record = MaintenanceHistoryRecord {
        frequency: Frequency::AsNeeded,
        period: ad_hoc_period(history, &task.id, now),
        completed_at: now.timestamp(),
        completed_by: actor.to_string(),
        tasks: vec![task_result(&task, draft, actor, now)],
        is_as_needed_task: true,
    };

    history.append(record.clone());
    initialize_epoch(plan, now);
    info!("Logged ad-hoc task {} by {actor} ({})", task.id, record.period);

    Ok(record)
}

fn task_result(task: &Task, draft: &ChecklistDraft, actor: &str, now: &Zoned) -> TaskResult {
    let notes = draft.note(&task.id).unwrap_or_default().to_string();
    let note_metadata = (!notes.is_empty()).then(|| NoteMetadata {
        author: actor.to_string(),
        timestamp: now.timestamp(),
    });

    TaskResult {
        id: task.id.clone(),
        description: task.description.clone(),
        completed: draft.is_checked(&task.id),
        notes,
        note_metadata,
    }
}

fn ad_hoc_period(history: &MaintenanceHistory, task_id: &str, now: &Zoned) -> PeriodId {
    let base = format!("{}_{task_id}", now.date());
    let mut candidate = PeriodId::new(base.clone());
    let mut n = 2;
    while history.has_period(&candidate) {
        candidate = PeriodId::new(format!("{base}_{n}"));
        n += 1;
    }
    candidate
}

/// Set the plan epoch on first completion; never moved afterwards.
fn initialize_epoch(plan: &mut MaintenancePlan, now: &Zoned) {
    if plan.created_at.is_none() {
        plan.created_at = Some(now.timestamp());
        debug!("Plan epoch set to {}", now.timestamp());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleEntry;

    fn at(s: &str) -> Zoned {
        s.parse().expect("valid zoned datetime")
    }

    fn test_plan() -> MaintenancePlan {
        MaintenancePlan {
            schedule: vec![
                ScheduleEntry::new("Daily", "Wipe screen", "p. 4"),
                ScheduleEntry::new("Daily", "Check alarms", "p. 5"),
                ScheduleEntry::new("Daily", "Inspect power cord", "p. 5"),
                ScheduleEntry::new("As Needed", "Replace fuse", "p. 20"),
                ScheduleEntry::new("As Needed", "Replace paper roll", "p. 21"),
                ScheduleEntry::new("Other", "Clean fan grille if needed", "p. 22"),
            ],
            ..Default::default()
        }
    }

    fn daily_tasks(plan: &MaintenancePlan) -> Vec<Task> {
        tasks_for(plan, Frequency::Daily)
    }

    #[test]
    fn test_incomplete_checklist_is_rejected_without_mutation() {
        let mut plan = test_plan();
        let mut history = MaintenanceHistory::new();
        let tasks = daily_tasks(&plan);
        assert_eq!(tasks.len(), 3);

        let mut draft = ChecklistDraft::new();
        draft.check(&tasks[0].id);
        draft.check(&tasks[1].id);

        let now = at("2024-03-10T09:00:00[UTC]");
        let err = record_checklist(&mut plan, &mut history, Frequency::Daily, &draft, "alice", &now)
            .unwrap_err();

        assert!(matches!(err, UpkeepError::Validation { .. }));
        assert!(history.is_empty());
        assert!(plan.created_at.is_none());
    }

    #[test]
    fn test_empty_bucket_is_rejected() {
        let mut plan = test_plan();
        let mut history = MaintenanceHistory::new();
        let now = at("2024-03-10T09:00:00[UTC]");

        let err = record_checklist(
            &mut plan,
            &mut history,
            Frequency::Yearly,
            &ChecklistDraft::new(),
            "alice",
            &now,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation failed: No yearly tasks found in the maintenance plan"
        );
    }

    #[test]
    fn test_resubmission_replaces_record_for_period() {
        let mut plan = test_plan();
        let mut history = MaintenanceHistory::new();
        let tasks = daily_tasks(&plan);

        let first = ChecklistDraft::all_checked(&tasks);
        let morning = at("2024-03-10T09:00:00[UTC]");
        record_checklist(&mut plan, &mut history, Frequency::Daily, &first, "alice", &morning).unwrap();

        let mut second = ChecklistDraft::all_checked(&tasks);
        second.set_note(&tasks[2].id, "Cord frayed, replaced");
        let evening = at("2024-03-10T18:30:00[UTC]");
        record_checklist(&mut plan, &mut history, Frequency::Daily, &second, "bob", &evening).unwrap();

        assert_eq!(history.len(), 1);
        let record = history
            .find(Frequency::Daily, &PeriodId::from("2024-03-10"))
            .unwrap();
        assert_eq!(record.completed_by, "bob");
        assert_eq!(record.completed_at, evening.timestamp());
        assert_eq!(record.tasks[2].notes, "Cord frayed, replaced");
        let metadata = record.tasks[2].note_metadata.as_ref().unwrap();
        assert_eq!(metadata.author, "bob");
        assert!(record.tasks[0].note_metadata.is_none());

        // The epoch is the first completion, not the latest
        assert_eq!(plan.created_at, Some(morning.timestamp()));
    }

    #[test]
    fn test_as_needed_checklist_needs_every_task_and_appends() {
        let mut plan = test_plan();
        let mut history = MaintenanceHistory::new();
        let tasks = tasks_for(&plan, Frequency::AsNeeded);
        assert!(tasks.len() > 1);
        let now = at("2024-03-10T09:15:00[UTC]");

        let mut partial = ChecklistDraft::new();
        partial.check(&tasks[0].id);
        let err = record_checklist(&mut plan, &mut history, Frequency::AsNeeded, &partial, "alice", &now)
            .unwrap_err();
        assert!(matches!(err, UpkeepError::Validation { .. }));
        assert!(history.is_empty());
        assert!(plan.created_at.is_none());

        let draft = ChecklistDraft::all_checked(&tasks);
        let record =
            record_checklist(&mut plan, &mut history, Frequency::AsNeeded, &draft, "alice", &now).unwrap();
        record_checklist(&mut plan, &mut history, Frequency::AsNeeded, &draft, "alice", &now).unwrap();

        assert_eq!(record.period.as_str(), "2024-03-10_asneeded_9_15");
        assert_eq!(record.completed_count(), tasks.len());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_ad_hoc_completions_stay_distinct() {
        let mut plan = test_plan();
        let mut history = MaintenanceHistory::new();
        let fuse = tasks_for(&plan, Frequency::AsNeeded)[0].clone();

        let mut draft = ChecklistDraft::new();
        draft.check(&fuse.id);
        let now = at("2024-03-10T09:00:00[UTC]");

        let first = record_ad_hoc_task(&mut plan, &mut history, &fuse.id, &draft, "alice", &now).unwrap();
        let second = record_ad_hoc_task(&mut plan, &mut history, &fuse.id, &draft, "alice", &now).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(first.period.as_str(), format!("2024-03-10_{}", fuse.id));
        assert_eq!(second.period.as_str(), format!("2024-03-10_{}_2", fuse.id));
        assert!(first.is_as_needed_task);
        assert_eq!(first.frequency, Frequency::AsNeeded);
        assert_eq!(plan.created_at, Some(now.timestamp()));
    }

    #[test]
    fn test_ad_hoc_task_from_other_bucket() {
        let mut plan = test_plan();
        let mut history = MaintenanceHistory::new();
        let grille = tasks_for(&plan, Frequency::Other)[0].clone();

        let mut draft = ChecklistDraft::new();
        draft.check(&grille.id);
        draft.set_note(&grille.id, "Dusty");
        let now = at("2024-03-10T09:00:00[UTC]");

        let record =
            record_ad_hoc_task(&mut plan, &mut history, &grille.id, &draft, "carol", &now).unwrap();
        assert_eq!(record.tasks.len(), 1);
        assert_eq!(record.tasks[0].description, "Clean fan grille if needed");
        assert_eq!(record.tasks[0].note_metadata.as_ref().unwrap().author, "carol");
    }

    #[test]
    fn test_ad_hoc_errors_leave_state_untouched() {
        let mut plan = test_plan();
        let mut history = MaintenanceHistory::new();
        let now = at("2024-03-10T09:00:00[UTC]");

        let mut draft = ChecklistDraft::new();
        draft.check("missing");
        let err = record_ad_hoc_task(&mut plan, &mut history, "missing", &draft, "alice", &now)
            .unwrap_err();
        assert!(matches!(err, UpkeepError::ReferenceNotFound { ref task_id } if task_id == "missing"));

        // Daily tasks cannot be logged on their own
        let daily = daily_tasks(&plan)[0].clone();
        draft.check(&daily.id);
        let err = record_ad_hoc_task(&mut plan, &mut history, &daily.id, &draft, "alice", &now)
            .unwrap_err();
        assert!(matches!(err, UpkeepError::ReferenceNotFound { .. }));

        let fuse = tasks_for(&plan, Frequency::AsNeeded)[0].clone();
        let err = record_ad_hoc_task(
            &mut plan,
            &mut history,
            &fuse.id,
            &ChecklistDraft::new(),
            "alice",
            &now,
        )
        .unwrap_err();
        assert!(matches!(err, UpkeepError::Validation { .. }));

        assert!(history.is_empty());
        assert!(plan.created_at.is_none());
    }
}
