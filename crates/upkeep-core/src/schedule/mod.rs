//! The scheduling engine.
//!
//! Pure functions over a plan and its history, all evaluated against a
//! single `now` value so that one evaluation never straddles a day, week or
//! quarter boundary:
//!
//! - [`period`]: period ids, deadlines and next period starts
//! - [`overdue`]: overdue evaluation anchored to the plan epoch
//! - [`resolver`]: which schedule entries make up a frequency's checklist
//! - [`recorder`]: validating drafts and filing history records
//! - [`normalizer`]: repairing raw extracted plans
//! - [`view`]: the combined per-frequency checklist state
//!
//! Nothing here performs I/O. The store runs each read-modify-write of a
//! device's documents in one transaction.
//!
//! ```rust
//! use jiff::Zoned;
//! use upkeep_core::{
//!     models::{ChecklistDraft, Frequency, MaintenanceHistory, MaintenancePlan, ScheduleEntry},
//!     schedule::{checklist_view, record_checklist},
//! };
//!
//! let mut plan = MaintenancePlan {
//!     schedule: vec![ScheduleEntry::new("Daily", "Wipe down the touchscreen", "p. 14")],
//!     ..Default::default()
//! };
//! let mut history = MaintenanceHistory::new();
//! let now: Zoned = "2024-03-05T09:30:00[UTC]".parse().unwrap();
//!
//! let view = checklist_view(&plan, &history, Frequency::Daily, &now).unwrap();
//! let draft = ChecklistDraft::all_checked(&view.tasks);
//! let record =
//!     record_checklist(&mut plan, &mut history, Frequency::Daily, &draft, "biomed", &now).unwrap();
//!
//! assert_eq!(record.period.as_str(), "2024-03-05");
//! assert!(plan.created_at.is_some());
//! ```

pub mod normalizer;
pub mod overdue;
pub mod period;
pub mod recorder;
pub mod resolver;
pub mod view;

pub use normalizer::normalize;
pub use overdue::is_overdue;
pub use period::{deadline, next_period_start, period};
pub use recorder::{record_ad_hoc_task, record_checklist};
pub use resolver::{find_ad_hoc_task, mentions_as_needed, tasks_for};
pub use view::{ChecklistView, checklist_view, completed_checklists};
