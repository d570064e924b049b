//! Device model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{MaintenanceHistory, MaintenancePlan};

/// A medical device in the hospital inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Unique identifier for the device
    pub id: u64,

    /// Device name, e.g. "Infusion Pump X1"
    pub name: String,

    /// Manufacturer model designation
    #[serde(default)]
    pub model: String,

    /// Inventory category ("therapeutic", "diagnostic", ...)
    #[serde(default)]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,

    /// Technician responsible for the device; default completing actor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    /// Local date of the most recent recorded maintenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<Date>,

    /// Timestamp when the device was registered (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the device record was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Device {
    /// Concatenated name, model and category, lowercased.
    ///
    /// This is the text the battery heuristic searches.
    pub fn descriptor_text(&self) -> String {
        format!("{} {} {}", self.name, self.model, self.category).to_lowercase()
    }

    /// Actor recorded on completions when none is given explicitly.
    pub fn default_actor(&self) -> &str {
        self.assigned_to.as_deref().unwrap_or("Unassigned")
    }
}

/// Filter criteria for device listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    /// Exact category match, ignoring case
    pub category: Option<String>,
    /// Exact assignee match
    pub assigned_to: Option<String>,
}

/// A device together with the maintenance documents it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceMaintenance {
    pub device: Device,
    /// `None` until a plan has been imported
    pub plan: Option<MaintenancePlan>,
    pub history: MaintenanceHistory,
}
