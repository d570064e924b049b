//! Parameter structures for tracker operations.
//!
//! These are plain structures free of interface-framework derives. The CLI
//! defines its own clap argument types and converts them into these:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │    Tracker      │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```ignore
//! // In the CLI crate
//! #[derive(Args)]
//! pub struct ShowChecklistArgs {
//!     pub device_id: u64,
//!     pub frequency: FrequencyArg,
//! }
//!
//! impl From<ShowChecklistArgs> for ShowChecklist {
//!     fn from(val: ShowChecklistArgs) -> Self {
//!         ShowChecklist {
//!             device_id: val.device_id,
//!             frequency: val.frequency.into(),
//!         }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, UpkeepError},
    models::{ChecklistDraft, Device, DeviceFilter, Frequency, RawMaintenancePlan},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    pub id: u64,
}

/// Parameters for registering a device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDevice {
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub category: String,
    pub serial_number: Option<String>,
    pub supplier: Option<String>,
    pub assigned_to: Option<String>,
}

impl CreateDevice {
    /// Reject a blank device name.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(UpkeepError::invalid_input("name").with_reason("Device name cannot be empty"));
        }
        Ok(())
    }
}

/// Parameters for listing devices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDevices {
    pub category: Option<String>,
    pub assigned_to: Option<String>,
}

impl From<&ListDevices> for DeviceFilter {
    fn from(params: &ListDevices) -> Self {
        DeviceFilter {
            category: params.category.clone(),
            assigned_to: params.assigned_to.clone(),
        }
    }
}

/// Parameters for deleting a device along with its plan and history.
///
/// Deletion only proceeds when `confirmed` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteDevice {
    pub id: u64,
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for importing an extracted plan onto a device.
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    pub device_id: u64,
    pub plan: RawMaintenancePlan,
}

/// Parameters for evaluating one checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowChecklist {
    pub device_id: u64,
    pub frequency: Frequency,
}

/// Parameters for submitting a full checklist.
#[derive(Debug, Clone)]
pub struct CompleteChecklist {
    pub device_id: u64,
    pub frequency: Frequency,
    pub draft: ChecklistDraft,
    /// Completing technician; defaults to the device's assignee
    pub actor: Option<String>,
}

/// Parameters for logging a single as-needed task.
#[derive(Debug, Clone)]
pub struct CompleteAdHocTask {
    pub device_id: u64,
    pub task_id: String,
    pub draft: ChecklistDraft,
    /// Completing technician; defaults to the device's assignee
    pub actor: Option<String>,
}

/// Parameters for listing maintenance history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListHistory {
    pub device_id: u64,
    /// Restrict to the records shown under one checklist
    pub frequency: Option<Frequency>,
}

/// The actor to stamp on a completion: the given one if non-blank, else the
/// device's assignee.
pub(crate) fn resolve_actor(actor: Option<&str>, device: &Device) -> String {
    actor
        .map(str::trim)
        .filter(|actor| !actor.is_empty())
        .unwrap_or_else(|| device.default_actor())
        .to_string()
}
