//! Command-line argument wrappers using clap
//!
//! Each command's clap structure converts into the matching core parameter
//! type, keeping clap derives out of the core crate:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use upkeep_core::{models::Task, params::*, ChecklistDraft, Frequency, RawMaintenancePlan};

// ============================================================================
// Devices
// ============================================================================

/// Register a new device
#[derive(Args)]
pub struct AddDeviceArgs {
    /// Name of the device
    pub name: String,
    #[arg(short, long, default_value = "", help = "Manufacturer model designation")]
    pub model: String,
    #[arg(
        short,
        long,
        default_value = "",
        help = "Inventory category, e.g. therapeutic or diagnostic"
    )]
    pub category: String,
    #[arg(long, help = "Serial number of the unit")]
    pub serial_number: Option<String>,
    #[arg(long, help = "Supplier the unit was purchased from")]
    pub supplier: Option<String>,
    #[arg(short, long, help = "Technician responsible for the device")]
    pub assigned_to: Option<String>,
}

impl From<AddDeviceArgs> for CreateDevice {
    fn from(val: AddDeviceArgs) -> Self {
        CreateDevice {
            name: val.name,
            model: val.model,
            category: val.category,
            serial_number: val.serial_number,
            supplier: val.supplier,
            assigned_to: val.assigned_to,
        }
    }
}

/// List devices
#[derive(Args)]
pub struct ListDevicesArgs {
    #[arg(short, long, help = "Only devices in this category (case-insensitive)")]
    pub category: Option<String>,
    #[arg(short, long, help = "Only devices assigned to this technician")]
    pub assigned_to: Option<String>,
}

impl From<ListDevicesArgs> for ListDevices {
    fn from(val: ListDevicesArgs) -> Self {
        ListDevices {
            category: val.category,
            assigned_to: val.assigned_to,
        }
    }
}

/// Show details of a device and its checklists
#[derive(Args)]
pub struct ShowDeviceArgs {
    #[arg(help = "Unique identifier of the device")]
    pub id: u64,
}

impl From<ShowDeviceArgs> for Id {
    fn from(val: ShowDeviceArgs) -> Self {
        Id { id: val.id }
    }
}

/// Permanently delete a device with its plan and history
#[derive(Args)]
pub struct DeleteDeviceArgs {
    #[arg(help = "Unique identifier of the device to delete")]
    pub id: u64,
    #[arg(long, help = "Confirm permanent deletion of the device and its history")]
    pub confirm: bool,
}

impl From<DeleteDeviceArgs> for DeleteDevice {
    fn from(val: DeleteDeviceArgs) -> Self {
        DeleteDevice {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum DeviceCommands {
    /// Register a new device
    #[command(alias = "a")]
    Add(AddDeviceArgs),
    /// List devices
    #[command(alias = "l")]
    List(ListDevicesArgs),
    /// Show details of a device and its checklists
    #[command(alias = "s")]
    Show(ShowDeviceArgs),
    /// Permanently delete a device
    Delete(DeleteDeviceArgs),
}

// ============================================================================
// Plans
// ============================================================================

/// Import a maintenance plan extracted from a service manual
///
/// The file holds the extractor's JSON output. Missing fields are filled in
/// during normalization; importing again replaces the plan but keeps the
/// maintenance history.
#[derive(Args)]
pub struct ImportPlanArgs {
    #[arg(help = "Unique identifier of the device")]
    pub device_id: u64,
    #[arg(help = "Path to the extracted plan JSON file")]
    pub file: PathBuf,
}

impl ImportPlanArgs {
    pub fn into_params(self) -> Result<ImportPlan> {
        let json = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read plan file {}", self.file.display()))?;
        let plan: RawMaintenancePlan = serde_json::from_str(&json)
            .with_context(|| format!("Invalid plan JSON in {}", self.file.display()))?;

        Ok(ImportPlan {
            device_id: self.device_id,
            plan,
        })
    }
}

/// Show the maintenance plan of a device
#[derive(Args)]
pub struct ShowPlanArgs {
    #[arg(help = "Unique identifier of the device")]
    pub device_id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.device_id }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Import a maintenance plan from a JSON file
    #[command(alias = "i")]
    Import(ImportPlanArgs),
    /// Show the maintenance plan of a device
    #[command(alias = "s")]
    Show(ShowPlanArgs),
}

// ============================================================================
// Checklists
// ============================================================================

/// Show one checklist with its tasks, deadline and completion state
#[derive(Args)]
pub struct ShowChecklistArgs {
    #[arg(help = "Unique identifier of the device")]
    pub device_id: u64,
    #[arg(help = "Checklist frequency")]
    pub frequency: FrequencyArg,
}

impl From<ShowChecklistArgs> for ShowChecklist {
    fn from(val: ShowChecklistArgs) -> Self {
        ShowChecklist {
            device_id: val.device_id,
            frequency: val.frequency.into(),
        }
    }
}

/// Complete a checklist for the current period
///
/// Every task must be checked; use `log` for a single as-needed task.
/// Completing a period again replaces the earlier record.
#[derive(Args)]
pub struct CompleteChecklistArgs {
    #[arg(help = "Unique identifier of the device")]
    pub device_id: u64,
    #[arg(help = "Checklist frequency")]
    pub frequency: FrequencyArg,
    #[arg(long, conflicts_with = "check", help = "Check every task of the checklist")]
    pub all: bool,
    #[arg(
        long,
        value_delimiter = ',',
        required_unless_present = "all",
        help = "Task ids to check, as comma-separated list"
    )]
    pub check: Vec<String>,
    #[arg(
        long,
        value_parser = parse_note,
        help = "Note for a task, as TASK_ID=TEXT (repeatable)"
    )]
    pub note: Vec<(String, String)>,
    #[arg(long, help = "Technician completing the checklist; defaults to the assignee")]
    pub actor: Option<String>,
}

impl CompleteChecklistArgs {
    /// Build the core parameters against the checklist's current `tasks`.
    pub fn into_params(self, tasks: &[Task]) -> CompleteChecklist {
        let mut draft = if self.all {
            ChecklistDraft::all_checked(tasks)
        } else {
            let mut draft = ChecklistDraft::new();
            for id in &self.check {
                draft.check(id);
            }
            draft
        };
        for (id, text) in &self.note {
            draft.set_note(id, text.as_str());
        }

        CompleteChecklist {
            device_id: self.device_id,
            frequency: self.frequency.into(),
            draft,
            actor: self.actor,
        }
    }
}

/// Log a single as-needed task
#[derive(Args)]
pub struct LogTaskArgs {
    #[arg(help = "Unique identifier of the device")]
    pub device_id: u64,
    #[arg(help = "Id of an as-needed task")]
    pub task_id: String,
    #[arg(short, long, help = "Note describing what was done")]
    pub note: Option<String>,
    #[arg(long, help = "Technician performing the task; defaults to the assignee")]
    pub actor: Option<String>,
}

impl From<LogTaskArgs> for CompleteAdHocTask {
    fn from(val: LogTaskArgs) -> Self {
        let mut draft = ChecklistDraft::new();
        draft.check(&val.task_id);
        if let Some(note) = val.note {
            draft.set_note(&val.task_id, note);
        }

        CompleteAdHocTask {
            device_id: val.device_id,
            task_id: val.task_id,
            draft,
            actor: val.actor,
        }
    }
}

#[derive(Subcommand)]
pub enum ChecklistCommands {
    /// Show a checklist
    #[command(alias = "s")]
    Show(ShowChecklistArgs),
    /// Complete a checklist for the current period
    #[command(alias = "c")]
    Complete(CompleteChecklistArgs),
    /// Log a single as-needed task
    #[command(alias = "l")]
    Log(LogTaskArgs),
}

// ============================================================================
// Status and history
// ============================================================================

/// Show the state of every checklist of a device
#[derive(Args)]
pub struct StatusArgs {
    #[arg(help = "Unique identifier of the device")]
    pub device_id: u64,
}

impl From<StatusArgs> for Id {
    fn from(val: StatusArgs) -> Self {
        Id { id: val.device_id }
    }
}

/// Show completed maintenance, newest first
#[derive(Args)]
pub struct HistoryArgs {
    #[arg(help = "Unique identifier of the device")]
    pub device_id: u64,
    #[arg(short, long, help = "Only records shown under this checklist")]
    pub frequency: Option<FrequencyArg>,
}

impl From<HistoryArgs> for ListHistory {
    fn from(val: HistoryArgs) -> Self {
        ListHistory {
            device_id: val.device_id,
            frequency: val.frequency.map(Into::into),
        }
    }
}

/// Command-line representation of checklist frequencies
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum FrequencyArg {
    /// Before every use
    PerUse,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    /// Conditional tasks, logged whenever performed
    AsNeeded,
    /// Tasks with no recognized recurrence
    Other,
}

impl From<FrequencyArg> for Frequency {
    fn from(val: FrequencyArg) -> Self {
        match val {
            FrequencyArg::PerUse => Frequency::PerUse,
            FrequencyArg::Daily => Frequency::Daily,
            FrequencyArg::Weekly => Frequency::Weekly,
            FrequencyArg::Monthly => Frequency::Monthly,
            FrequencyArg::Quarterly => Frequency::Quarterly,
            FrequencyArg::Yearly => Frequency::Yearly,
            FrequencyArg::AsNeeded => Frequency::AsNeeded,
            FrequencyArg::Other => Frequency::Other,
        }
    }
}

/// Parse a `TASK_ID=TEXT` note argument.
fn parse_note(value: &str) -> Result<(String, String)> {
    let Some((id, text)) = value.split_once('=') else {
        bail!("expected TASK_ID=TEXT, got '{value}'");
    };
    let id = id.trim();
    if id.is_empty() {
        bail!("missing task id in '{value}'");
    }
    Ok((id.to_string(), text.trim().to_string()))
}
