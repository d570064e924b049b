//! Display implementations for domain models.
//!
//! These are kept apart from the model definitions. All output is markdown
//! for the CLI's terminal renderer.

use std::fmt;

use super::datetime::{LocalDateTime, WallClock};
use crate::{
    models::{Device, Frequency, MaintenanceHistoryRecord, MaintenancePlan, Task, TaskResult},
    schedule::{ChecklistView, mentions_as_needed, tasks_for},
};

/// Page reference the extractor emits when the manual has none.
const UNSPECIFIED_PAGE: &str = "Not specified in document";

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// ` [p. 12]`, or nothing for a missing reference.
fn page_suffix(page_reference: &str) -> String {
    if page_reference.is_empty() || page_reference == UNSPECIFIED_PAGE {
        String::new()
    } else {
        format!(" [{page_reference}]")
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        if !self.model.is_empty() {
            writeln!(f, "- Model: {}", self.model)?;
        }
        if !self.category.is_empty() {
            writeln!(f, "- Category: {}", self.category)?;
        }
        if let Some(serial) = &self.serial_number {
            writeln!(f, "- Serial number: {serial}")?;
        }
        if let Some(supplier) = &self.supplier {
            writeln!(f, "- Supplier: {supplier}")?;
        }
        writeln!(f, "- Assigned to: {}", self.default_actor())?;
        match &self.last_maintenance {
            Some(date) => writeln!(f, "- Last maintenance: {date}")?,
            None => writeln!(f, "- Last maintenance: never")?,
        }
        writeln!(f, "- Registered: {}", LocalDateTime(&self.created_at))?;

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {}{} `{}`",
            self.description,
            page_suffix(&self.page_reference),
            self.id
        )
    }
}

impl fmt::Display for MaintenancePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Schedule")?;

        for frequency in Frequency::ALL {
            let tasks = tasks_for(self, frequency);
            if tasks.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "### {frequency}")?;
            writeln!(f)?;
            for task in &tasks {
                write!(f, "{task}")?;
            }
        }

        let unscheduled: Vec<_> = self
            .schedule
            .iter()
            .filter(|entry| entry.bucket().is_none() && !mentions_as_needed(&entry.tasks))
            .collect();
        if !unscheduled.is_empty() {
            writeln!(f)?;
            writeln!(f, "### Unrecognized frequency")?;
            writeln!(f)?;
            for entry in unscheduled {
                writeln!(
                    f,
                    "- {} ({}){}",
                    entry.tasks,
                    entry.frequency,
                    page_suffix(&entry.page_reference)
                )?;
            }
        }

        if !self.parts.is_empty() {
            writeln!(f, "\n## Parts")?;
            writeln!(f)?;
            for part in &self.parts {
                writeln!(
                    f,
                    "- **{}**: {}{}",
                    part.name,
                    part.replacement_interval,
                    page_suffix(&part.page_reference)
                )?;
            }
        }

        writeln!(f, "\n## Safety precautions")?;
        writeln!(f)?;
        writeln!(
            f,
            "{}{}",
            self.safety_precautions,
            page_suffix(&self.safety_precautions_page_reference)
        )?;

        if !self.warnings.is_empty() {
            writeln!(f, "\n## Warnings")?;
            writeln!(f)?;
            for warning in &self.warnings {
                writeln!(f, "- {}{}", warning.text, page_suffix(&warning.page_reference))?;
            }
        }

        if !self.additional_notes.is_empty() {
            writeln!(f, "\n## Additional notes")?;
            writeln!(f)?;
            writeln!(
                f,
                "{}{}",
                self.additional_notes,
                page_suffix(&self.additional_notes_page_reference)
            )?;
        }

        writeln!(f)?;
        match &self.created_at {
            Some(epoch) => writeln!(f, "- In service since: {}", LocalDateTime(epoch))?,
            None => writeln!(f, "- In service since: no checklist completed yet")?,
        }

        Ok(())
    }
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "✓" } else { "○" };
        writeln!(f, "- {mark} {}", self.description)?;
        if !self.notes.is_empty() {
            match &self.note_metadata {
                Some(meta) => writeln!(
                    f,
                    "  - Note: {} ({}, {})",
                    self.notes,
                    meta.author,
                    LocalDateTime(&meta.timestamp)
                )?,
                None => writeln!(f, "  - Note: {}", self.notes)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for MaintenanceHistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_as_needed_task {
            writeln!(f, "### Individual task ({})", self.period)?;
        } else {
            writeln!(f, "### {} checklist ({})", self.frequency, self.period)?;
        }
        writeln!(f)?;
        writeln!(f, "- Completed: {}", LocalDateTime(&self.completed_at))?;
        writeln!(f, "- By: {}", self.completed_by)?;
        writeln!(
            f,
            "- Tasks: {}/{}",
            self.completed_count(),
            self.tasks.len()
        )?;
        writeln!(f)?;
        for task in &self.tasks {
            write!(f, "{task}")?;
        }
        writeln!(f)?;
        Ok(())
    }
}

impl ChecklistView {
    /// One-line state of the checklist.
    pub fn status_line(&self) -> String {
        if self.overdue {
            return "OVERDUE".to_string();
        }
        if let Some(record) = &self.completion {
            return match self.days_until_next_period() {
                Some(days) => format!(
                    "completed by {}, next checklist in {days} days",
                    record.completed_by
                ),
                None => format!("completed by {}", record.completed_by),
            };
        }
        self.time_remaining().to_string()
    }
}

impl fmt::Display for ChecklistView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} checklist", self.frequency)?;
        writeln!(f)?;
        writeln!(f, "- Period: {}", self.period)?;
        match &self.deadline {
            Some(deadline) => writeln!(f, "- Deadline: {}", WallClock(deadline))?,
            None => writeln!(f, "- Deadline: none")?,
        }
        writeln!(f, "- Status: {}", self.status_line())?;
        writeln!(f)?;

        if self.tasks.is_empty() {
            writeln!(
                f,
                "No {} tasks found in the maintenance plan.",
                self.frequency.as_str()
            )?;
            return Ok(());
        }

        let draft = self.draft();
        for task in &self.tasks {
            let mark = if draft.is_checked(&task.id) { "[x]" } else { "[ ]" };
            writeln!(
                f,
                "- {mark} {}{} `{}`",
                task.description,
                page_suffix(&task.page_reference),
                task.id
            )?;
            if let Some(note) = draft.note(&task.id) {
                writeln!(f, "  - Note: {note}")?;
            }
        }

        Ok(())
    }
}
