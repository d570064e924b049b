//! Handler operations that return formatted wrapper types for the Tracker.

use super::Tracker;
use crate::{
    display::{ChecklistOverview, CreateResult, DeleteResult, Devices, HistoryRecords, UpdateResult},
    error::{Result, UpkeepError},
    models::{Device, MaintenanceHistoryRecord, MaintenancePlan, RawMaintenancePlan},
    params::{CompleteAdHocTask, CompleteChecklist, CreateDevice, DeleteDevice, Id, ImportPlan, ListDevices, ListHistory},
};

impl Tracker {
    /// Handle registering a device.
    pub async fn add_device_result(&self, params: &CreateDevice) -> Result<CreateResult<Device>> {
        self.add_device(params).await.map(CreateResult::new)
    }

    /// Handle listing devices.
    pub async fn list_devices_display(&self, params: &ListDevices) -> Result<Devices> {
        self.list_devices(params).await.map(Devices)
    }

    /// Handle showing a single device.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::DeviceNotFound` if no device has the given ID
    pub async fn show_device(&self, params: &Id) -> Result<Device> {
        self.get_device(params)
            .await?
            .ok_or(UpkeepError::DeviceNotFound { id: params.id })
    }

    /// Handle permanently deleting a device with confirmation.
    ///
    /// Uses get-before-delete so the removed device can be echoed back.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::InvalidInput` if `confirmed` is false
    pub async fn delete_device(&self, params: &DeleteDevice) -> Result<DeleteResult<Device>> {
        if !params.confirmed {
            return Err(UpkeepError::invalid_input("confirmed").with_reason(
                "Device deletion removes its plan and history. Pass confirmation to proceed.",
            ));
        }

        let id_params = Id { id: params.id };
        let device = self.show_device(&id_params).await?;
        self.delete_device_by_id(&id_params).await?;

        Ok(DeleteResult::new(device))
    }

    /// Handle importing a plan, listing what normalization changed.
    pub async fn import_plan_result(&self, params: &ImportPlan) -> Result<UpdateResult<MaintenancePlan>> {
        let plan = self.import_plan(params).await?;
        let changes = normalization_changes(&params.plan, &plan);
        Ok(UpdateResult::with_changes(plan, changes))
    }

    /// Handle evaluating every checklist of a device.
    pub async fn checklist_overview(&self, params: &Id) -> Result<ChecklistOverview> {
        self.checklists(params).await.map(ChecklistOverview)
    }

    /// Handle submitting a full checklist.
    pub async fn complete_checklist_result(
        &self,
        params: &CompleteChecklist,
    ) -> Result<CreateResult<MaintenanceHistoryRecord>> {
        self.complete_checklist(params).await.map(CreateResult::new)
    }

    /// Handle logging a single as-needed task.
    pub async fn complete_ad_hoc_task_result(
        &self,
        params: &CompleteAdHocTask,
    ) -> Result<CreateResult<MaintenanceHistoryRecord>> {
        self.complete_ad_hoc_task(params).await.map(CreateResult::new)
    }

    /// Handle listing maintenance history.
    pub async fn history_records(&self, params: &ListHistory) -> Result<HistoryRecords> {
        self.history(params).await.map(HistoryRecords)
    }
}

/// Human-readable differences between an imported plan and its normalized
/// form.
fn normalization_changes(raw: &RawMaintenancePlan, plan: &MaintenancePlan) -> Vec<String> {
    let raw_schedule = raw.schedule.as_deref().unwrap_or_default();
    let mut changes = Vec::new();

    for entry in &plan.schedule {
        match raw_schedule.iter().find(|raw_entry| raw_entry.tasks == entry.tasks) {
            None => changes.push(format!("Added {} task: {}", entry.frequency, entry.tasks)),
            Some(raw_entry) if raw_entry.frequency != entry.frequency => changes.push(format!(
                "Moved '{}' from {} to {}",
                entry.tasks, raw_entry.frequency, entry.frequency
            )),
            Some(_) => {}
        }
    }

    let raw_is_blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());
    if raw_is_blank(&raw.safety_precautions) && !plan.safety_precautions.is_empty() {
        changes.push("Added default safety precautions".to_string());
    }
    if raw_is_blank(&raw.additional_notes) && !plan.additional_notes.is_empty() {
        changes.push("Added default maintenance notes".to_string());
    }
    if raw.warnings.is_none() && !plan.warnings.is_empty() {
        changes.push("Added default warning".to_string());
    }

    changes
}
