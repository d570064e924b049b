//! Result wrapper types for displaying operation outcomes.
//!
//! Wrappers format the results of create, update and delete operations with
//! consistent messaging and resource display.

use std::fmt;

use crate::models::{Device, MaintenanceHistoryRecord, MaintenancePlan};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use upkeep_core::{display::CreateResult, models::Device};
///
/// let device = Device {
///     id: 1,
///     name: "Defibrillator".to_string(),
///     model: "D-2".to_string(),
///     category: "emergency".to_string(),
///     serial_number: None,
///     supplier: None,
///     assigned_to: None,
///     last_maintenance: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(device).to_string();
/// assert!(output.starts_with("Created device with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Device> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created device with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<MaintenanceHistoryRecord> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.resource.is_as_needed_task {
            writeln!(f, "Task logged successfully.")?;
        } else {
            writeln!(
                f,
                "{} maintenance checklist saved successfully.",
                self.resource.frequency
            )?;
        }
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with the
/// changes made along the way.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<MaintenancePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Maintenance plan saved with {} schedule entries.",
            self.resource.schedule.len()
        )?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Device> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted device '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}
