//! Command handlers: run tracker operations and render their results.

use anyhow::Result;
use log::debug;
use upkeep_core::{
    params::{Id, ShowChecklist},
    Tracker, UpkeepError,
};

use crate::{
    cli::{ChecklistCommands, DeviceCommands, HistoryArgs, PlanCommands, StatusArgs},
    renderer::TerminalRenderer,
};

/// Dispatches parsed commands to the tracker.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    pub async fn handle_device_command(&self, command: DeviceCommands) -> Result<()> {
        match command {
            DeviceCommands::Add(args) => {
                let result = self.tracker.add_device_result(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            DeviceCommands::List(args) => {
                let devices = self.tracker.list_devices_display(&args.into()).await?;
                self.renderer.render(&devices.to_string())
            }
            DeviceCommands::Show(args) => self.show_device(&args.into()).await,
            DeviceCommands::Delete(args) => {
                let result = self.tracker.delete_device(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Import(args) => {
                let params = args.into_params()?;
                let result = self.tracker.import_plan_result(&params).await?;
                self.renderer.render(&result.to_string())
            }
            PlanCommands::Show(args) => {
                let plan = self.tracker.get_plan(&args.into()).await?;
                self.renderer.render(&plan.to_string())
            }
        }
    }

    pub async fn handle_checklist_command(&self, command: ChecklistCommands) -> Result<()> {
        match command {
            ChecklistCommands::Show(args) => {
                let view = self.tracker.checklist(&args.into()).await?;
                self.renderer.render(&view.to_string())
            }
            ChecklistCommands::Complete(args) => {
                let view = self
                    .tracker
                    .checklist(&ShowChecklist {
                        device_id: args.device_id,
                        frequency: args.frequency.into(),
                    })
                    .await?;
                debug!(
                    "Completing {} checklist for period {}",
                    view.frequency, view.period
                );

                let params = args.into_params(&view.tasks);
                let result = self.tracker.complete_checklist_result(&params).await?;
                self.renderer.render(&result.to_string())
            }
            ChecklistCommands::Log(args) => {
                let result = self.tracker.complete_ad_hoc_task_result(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_status(&self, args: StatusArgs) -> Result<()> {
        let overview = self.tracker.checklist_overview(&args.into()).await?;
        self.renderer.render(&overview.to_string())
    }

    pub async fn handle_history(&self, args: HistoryArgs) -> Result<()> {
        let records = self.tracker.history_records(&args.into()).await?;
        self.renderer.render(&records.to_string())
    }

    pub async fn list_devices(&self) -> Result<()> {
        let devices = self.tracker.list_devices_display(&Default::default()).await?;
        self.renderer.render(&devices.to_string())
    }

    /// A device followed by the state of its checklists.
    async fn show_device(&self, params: &Id) -> Result<()> {
        let device = self.tracker.show_device(params).await?;
        self.renderer.render(&device.to_string())?;

        match self.tracker.checklist_overview(params).await {
            Ok(overview) => {
                self.renderer.render("\n## Checklists\n\n")?;
                self.renderer.render(&overview.to_string())
            }
            Err(UpkeepError::PlanNotFound { .. }) => {
                self.renderer.render("\nNo maintenance plan imported yet.\n")
            }
            Err(e) => Err(e.into()),
        }
    }
}
