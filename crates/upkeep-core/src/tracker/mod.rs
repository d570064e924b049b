//! High-level tracker API for devices and their maintenance.
//!
//! [`Tracker`] coordinates the store and the scheduling engine. Every
//! operation opens the database on a blocking worker, loads the device's
//! documents, runs the pure engine against one `now` value and writes the
//! result back in a single transaction.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (display-ready  │───▶│ (device_ops,    │───▶│   (via db/)     │
//! │  wrappers)      │    │  maintenance)   │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                              │
//!                              ▼
//!                        schedule engine
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Tracker`] instances (database path, time
//!   zone, pinned clock)
//! - [`device_ops`]: Device registration, lookup and removal
//! - [`maintenance_ops`]: Plan import, checklist evaluation and completion
//! - [`handlers`]: Operations returning display wrappers
//!
//! # Example
//!
//! ```rust,no_run
//! use upkeep_core::{params::{CreateDevice, Id}, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/tmp/upkeep.db"))
//!     .with_time_zone(Some("Europe/Madrid"))
//!     .build()
//!     .await?;
//!
//! let device = tracker
//!     .add_device(&CreateDevice {
//!         name: "Infusion Pump X1".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let overview = tracker.checklist_overview(&Id { id: device.id }).await;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use jiff::{tz::TimeZone, Timestamp, Zoned};

pub mod builder;
pub mod device_ops;
pub mod handlers;
pub mod maintenance_ops;


pub use builder::TrackerBuilder;

/// Main tracker interface for managing devices and their maintenance.
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    time_zone: TimeZone,
    fixed_now: Option<Timestamp>,
}

impl Tracker {
    pub(crate) fn new(db_path: PathBuf, time_zone: TimeZone, fixed_now: Option<Timestamp>) -> Self {
        Self {
            db_path,
            time_zone,
            fixed_now,
        }
    }

    /// The current instant in the tracker's time zone.
    ///
    /// Returns the pinned instant when the tracker was built with one.
    pub fn now(&self) -> Zoned {
        self.fixed_now
            .unwrap_or_else(Timestamp::now)
            .to_zoned(self.time_zone.clone())
    }

    /// Time zone periods and deadlines are computed in.
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }
}
