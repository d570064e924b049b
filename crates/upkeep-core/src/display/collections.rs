//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items with consistent structure and handles the
//! empty case.

use std::{fmt, ops::Index};

use super::datetime::{LocalDateTime, WallClock};
use crate::{
    models::{Device, MaintenanceHistoryRecord},
    schedule::ChecklistView,
};

/// Newtype wrapper for displaying a device inventory listing.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use upkeep_core::{display::Devices, models::Device};
///
/// let device = Device {
///     id: 1,
///     name: "Infusion Pump".to_string(),
///     model: "X1".to_string(),
///     category: "therapeutic".to_string(),
///     serial_number: None,
///     supplier: None,
///     assigned_to: Some("biomed".to_string()),
///     last_maintenance: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = Devices(vec![device]).to_string();
/// assert!(output.contains("Infusion Pump"));
/// ```
pub struct Devices(pub Vec<Device>);

impl Devices {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Device> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Device> {
        self.0.iter()
    }
}

impl Index<usize> for Devices {
    type Output = Device;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Devices {
    type Item = Device;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Devices {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Devices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No devices found.");
        }

        for device in &self.0 {
            writeln!(f, "## {} (ID: {})", device.name, device.id)?;
            writeln!(f)?;
            if !device.model.is_empty() {
                writeln!(f, "- **Model**: {}", device.model)?;
            }
            if !device.category.is_empty() {
                writeln!(f, "- **Category**: {}", device.category)?;
            }
            writeln!(f, "- **Assigned to**: {}", device.default_actor())?;
            if let Some(date) = &device.last_maintenance {
                writeln!(f, "- **Last maintenance**: {date}")?;
            }
            writeln!(f, "- **Registered**: {}", LocalDateTime(&device.created_at))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying maintenance history records.
pub struct HistoryRecords(pub Vec<MaintenanceHistoryRecord>);

impl HistoryRecords {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaintenanceHistoryRecord> {
        self.0.iter()
    }
}

impl Index<usize> for HistoryRecords {
    type Output = MaintenanceHistoryRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a HistoryRecords {
    type Item = &'a MaintenanceHistoryRecord;
    type IntoIter = std::slice::Iter<'a, MaintenanceHistoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for HistoryRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No maintenance recorded.");
        }
        for record in &self.0 {
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

/// Every frequency's checklist state for one device, one line each.
pub struct ChecklistOverview(pub Vec<ChecklistView>);

impl ChecklistOverview {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChecklistView> {
        self.0.iter()
    }

    /// Checklists currently overdue.
    pub fn overdue(&self) -> impl Iterator<Item = &ChecklistView> {
        self.0.iter().filter(|view| view.overdue)
    }
}

impl<'a> IntoIterator for &'a ChecklistOverview {
    type Item = &'a ChecklistView;
    type IntoIter = std::slice::Iter<'a, ChecklistView>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ChecklistOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let views: Vec<_> = self.0.iter().filter(|view| !view.tasks.is_empty()).collect();
        if views.is_empty() {
            return writeln!(f, "No scheduled tasks.");
        }

        for view in views {
            write!(
                f,
                "- **{}** [{}]: {}",
                view.frequency,
                view.period,
                view.status_line()
            )?;
            match &view.deadline {
                Some(deadline) => writeln!(f, " (due {})", WallClock(deadline))?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}
