use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::Timestamp;

use crate::cli::{ChecklistCommands, DeviceCommands, HistoryArgs, PlanCommands, StatusArgs};

/// Preventive maintenance tracker for hospital medical devices
///
/// Upkeep keeps an inventory of devices, imports the maintenance plan
/// extracted from each device's service manual, and tracks completion of the
/// per-use, daily, weekly, monthly, quarterly, yearly and as-needed
/// checklists it defines. Running without a command lists all devices.
#[derive(Parser)]
#[command(version, about, name = "upkeep")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/upkeep/upkeep.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Time zone periods and deadlines are computed in (IANA name).
    /// Defaults to the system time zone
    #[arg(long, global = true)]
    pub time_zone: Option<String>,

    /// Evaluate as if the current instant were this RFC 3339 timestamp
    #[arg(long, global = true)]
    pub at: Option<Timestamp>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the upkeep CLI
///
/// - `device`: Manage the device inventory
/// - `plan`: Import and inspect maintenance plans
/// - `checklist`: Show, complete and log maintenance tasks
/// - `status`: Overview of every checklist of a device
/// - `history`: Completed maintenance of a device
#[derive(Subcommand)]
pub enum Commands {
    /// Manage devices
    #[command(alias = "d")]
    Device {
        #[command(subcommand)]
        command: DeviceCommands,
    },
    /// Manage maintenance plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Work with maintenance checklists
    #[command(alias = "c")]
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommands,
    },
    /// Show the state of every checklist of a device
    #[command(alias = "s")]
    Status(StatusArgs),
    /// Show completed maintenance of a device
    #[command(alias = "h")]
    History(HistoryArgs),
}
