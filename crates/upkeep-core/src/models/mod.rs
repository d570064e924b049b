//! Data models for devices, maintenance plans and maintenance history.
//!
//! Plans and history records are documents: they serialize in camelCase so
//! the JSON shape matches what the external manual extractor produces and
//! what the store keeps per device. Display implementations live in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use upkeep_core::models::{Frequency, MaintenancePlan, ScheduleEntry};
//!
//! let plan = MaintenancePlan {
//!     schedule: vec![
//!         ScheduleEntry::new("Daily", "Wipe down the touchscreen", "p. 14"),
//!         ScheduleEntry::new("Quarterly", "Inspect the power cord", "p. 22"),
//!     ],
//!     ..Default::default()
//! };
//!
//! assert_eq!(plan.schedule[0].bucket(), Some(Frequency::Daily));
//! assert_eq!(plan.entry_ids().len(), 2);
//! ```

pub mod device;
pub mod draft;
pub mod frequency;
pub mod history;
pub mod plan;
pub mod task;


pub use device::{Device, DeviceFilter, DeviceMaintenance};
pub use draft::{ChecklistDraft, DraftEntry};
pub use frequency::Frequency;
pub use history::{
    MaintenanceHistory, MaintenanceHistoryRecord, NoteMetadata, PeriodId, TaskResult,
};
pub use plan::{MaintenancePlan, Part, RawMaintenancePlan, ScheduleEntry, Warning};
pub use task::Task;
