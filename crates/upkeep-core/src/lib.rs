//! Core library for the upkeep medical-device maintenance tracker.
//!
//! This crate schedules and records preventive maintenance for hospital
//! devices. Each device owns a maintenance plan normalized from an extracted
//! service manual and an append-only history of completed checklists.
//!
//! # Layers
//!
//! - **Scheduling engine** ([`schedule`]): pure functions computing periods,
//!   deadlines, overdue status and checklists, plus plan normalization and
//!   completion recording
//! - **Store** ([`db`]): SQLite persistence of devices with their plan and
//!   history documents
//! - **Tracker** ([`tracker`]): async facade running the engine against the
//!   store at a single `now`
//! - **Display** ([`display`]): markdown formatting for terminal output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use upkeep_core::{
//!     models::{ChecklistDraft, Frequency, RawMaintenancePlan, ScheduleEntry},
//!     params::{CompleteChecklist, CreateDevice, ImportPlan, ShowChecklist},
//!     TrackerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("upkeep.db"))
//!     .build()
//!     .await?;
//!
//! let device = tracker
//!     .add_device(&CreateDevice {
//!         name: "Infusion Pump X1".to_string(),
//!         category: "therapeutic".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! tracker
//!     .import_plan(&ImportPlan {
//!         device_id: device.id,
//!         plan: RawMaintenancePlan {
//!             schedule: Some(vec![ScheduleEntry::new("Daily", "Inspect tubing", "p. 12")]),
//!             ..Default::default()
//!         },
//!     })
//!     .await?;
//!
//! let view = tracker
//!     .checklist(&ShowChecklist { device_id: device.id, frequency: Frequency::Daily })
//!     .await?;
//! println!("{view}");
//!
//! let record = tracker
//!     .complete_checklist(&CompleteChecklist {
//!         device_id: device.id,
//!         frequency: Frequency::Daily,
//!         draft: ChecklistDraft::all_checked(&view.tasks),
//!         actor: Some("biomed".to_string()),
//!     })
//!     .await?;
//! println!("{record}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod schedule;
pub mod tracker;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    ChecklistOverview, CreateResult, DeleteResult, Devices, HistoryRecords, UpdateResult,
};
pub use error::{Result, UpkeepError};
pub use models::{
    ChecklistDraft, Device, DeviceFilter, Frequency, MaintenanceHistory, MaintenanceHistoryRecord,
    MaintenancePlan, PeriodId, RawMaintenancePlan, ScheduleEntry, Task,
};
pub use params::{
    CompleteAdHocTask, CompleteChecklist, CreateDevice, DeleteDevice, Id, ImportPlan, ListDevices,
    ListHistory, ShowChecklist,
};
pub use schedule::ChecklistView;
pub use tracker::{Tracker, TrackerBuilder};
