//! Upkeep CLI Application
//!
//! Command-line interface for tracking preventive maintenance of hospital
//! medical devices.

mod args;
mod cli;
mod handlers;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use renderer::TerminalRenderer;
use upkeep_core::TrackerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        time_zone,
        at,
        no_color,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .with_time_zone(time_zone.as_deref())
        .with_fixed_time(at)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let cli = Cli::new(tracker, TerminalRenderer::new(!no_color));

    info!("Upkeep started");

    match command {
        Some(Device { command }) => cli.handle_device_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Checklist { command }) => cli.handle_checklist_command(command).await,
        Some(Status(args)) => cli.handle_status(args).await,
        Some(History(args)) => cli.handle_history(args).await,
        None => cli.list_devices().await,
    }
}
