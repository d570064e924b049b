//! Display formatting for domain models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes go through newtype wrappers. Everything
//! renders as markdown, which the CLI passes to its terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │ (Device, Plan,  │───▶│ Result Types    │───▶│    Output       │
//! │  Record, View)  │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (Devices, HistoryRecords,
//!   ChecklistOverview)
//! - [`results`]: Operation results (CreateResult, UpdateResult, DeleteResult)
//! - [`datetime`]: Date/time formatting
//! - [`time_remaining`]: Deadline countdowns
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage
//!
//! ```rust
//! use jiff::Timestamp;
//! use upkeep_core::display::TimeRemaining;
//!
//! let now: Timestamp = "2024-03-05T10:00:00Z".parse().unwrap();
//! let deadline: Timestamp = "2024-03-05T23:59:59Z".parse().unwrap();
//! assert_eq!(TimeRemaining::new(Some(deadline), now).to_string(), "13h 59m remaining");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod time_remaining;

pub use collections::{ChecklistOverview, Devices, HistoryRecords};
pub use datetime::{LocalDateTime, WallClock};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use time_remaining::TimeRemaining;
