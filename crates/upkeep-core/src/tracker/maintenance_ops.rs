//! Maintenance operations for the Tracker.
//!
//! Reads evaluate the engine against a loaded snapshot. Writes run the
//! engine inside [`Database::update_maintenance`], so validation failures
//! leave the stored plan and history untouched.

use std::cmp::Reverse;

use log::info;
use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, UpkeepError},
    models::{DeviceMaintenance, Frequency, MaintenanceHistoryRecord, MaintenancePlan},
    params::{resolve_actor, CompleteAdHocTask, CompleteChecklist, Id, ImportPlan, ListHistory, ShowChecklist},
    schedule::{self, ChecklistView},
};

impl Tracker {
    /// Loads a device together with its plan and history.
    pub async fn get_maintenance(&self, params: &Id) -> Result<DeviceMaintenance> {
        let db_path = self.db_path.clone();
        let device_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_maintenance(device_id)?
                .ok_or(UpkeepError::DeviceNotFound { id: device_id })
        })
        .await
        .map_err(|e| UpkeepError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves the normalized plan of a device.
    pub async fn get_plan(&self, params: &Id) -> Result<MaintenancePlan> {
        let maintenance = self.get_maintenance(params).await?;
        maintenance
            .plan
            .ok_or(UpkeepError::PlanNotFound { device_id: params.id })
    }

    /// Normalizes an extracted plan and stores it on the device.
    ///
    /// Replacing a plan keeps the existing epoch unless the imported plan
    /// brings its own. The history is left as is.
    pub async fn import_plan(&self, params: &ImportPlan) -> Result<MaintenancePlan> {
        let db_path = self.db_path.clone();
        let device_id = params.device_id;
        let mut raw = params.plan.clone();
        let now = self.now().timestamp();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_maintenance(device_id, now, |maintenance| {
                if raw.created_at.is_none() {
                    raw.created_at = maintenance.plan.as_ref().and_then(|plan| plan.created_at);
                }
                let plan = schedule::normalize(raw, &maintenance.device);
                info!(
                    "Imported plan for device {device_id} with {} schedule entries",
                    plan.schedule.len()
                );
                maintenance.plan = Some(plan.clone());
                Ok(plan)
            })
        })
        .await
        .map_err(|e| UpkeepError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Evaluates one checklist of a device at the current instant.
    pub async fn checklist(&self, params: &ShowChecklist) -> Result<ChecklistView> {
        let maintenance = self.get_maintenance(&Id { id: params.device_id }).await?;
        let plan = maintenance.plan.ok_or(UpkeepError::PlanNotFound {
            device_id: params.device_id,
        })?;

        schedule::checklist_view(&plan, &maintenance.history, params.frequency, &self.now())
    }

    /// Evaluates every checklist of a device at one shared instant.
    pub async fn checklists(&self, params: &Id) -> Result<Vec<ChecklistView>> {
        let maintenance = self.get_maintenance(params).await?;
        let plan = maintenance
            .plan
            .ok_or(UpkeepError::PlanNotFound { device_id: params.id })?;
        let now = self.now();

        Frequency::ALL
            .iter()
            .map(|&frequency| schedule::checklist_view(&plan, &maintenance.history, frequency, &now))
            .collect()
    }

    /// Records a full checklist completion.
    pub async fn complete_checklist(
        &self,
        params: &CompleteChecklist,
    ) -> Result<MaintenanceHistoryRecord> {
        let db_path = self.db_path.clone();
        let params = params.clone();
        let now = self.now();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_maintenance(params.device_id, now.timestamp(), |maintenance| {
                let plan = maintenance.plan.as_mut().ok_or(UpkeepError::PlanNotFound {
                    device_id: params.device_id,
                })?;
                let actor = resolve_actor(params.actor.as_deref(), &maintenance.device);

                let record = schedule::record_checklist(
                    plan,
                    &mut maintenance.history,
                    params.frequency,
                    &params.draft,
                    &actor,
                    &now,
                )?;
                maintenance.device.last_maintenance = Some(now.date());
                Ok(record)
            })
        })
        .await
        .map_err(|e| UpkeepError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Logs a single as-needed task.
    pub async fn complete_ad_hoc_task(
        &self,
        params: &CompleteAdHocTask,
    ) -> Result<MaintenanceHistoryRecord> {
        let db_path = self.db_path.clone();
        let params = params.clone();
        let now = self.now();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_maintenance(params.device_id, now.timestamp(), |maintenance| {
                let plan = maintenance.plan.as_mut().ok_or(UpkeepError::PlanNotFound {
                    device_id: params.device_id,
                })?;
                let actor = resolve_actor(params.actor.as_deref(), &maintenance.device);

                let record = schedule::record_ad_hoc_task(
                    plan,
                    &mut maintenance.history,
                    &params.task_id,
                    &params.draft,
                    &actor,
                    &now,
                )?;
                maintenance.device.last_maintenance = Some(now.date());
                Ok(record)
            })
        })
        .await
        .map_err(|e| UpkeepError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists maintenance history, newest first.
    ///
    /// With a frequency, only the records shown under that checklist are
    /// returned.
    pub async fn history(&self, params: &ListHistory) -> Result<Vec<MaintenanceHistoryRecord>> {
        let maintenance = self.get_maintenance(&Id { id: params.device_id }).await?;

        let records = match params.frequency {
            Some(frequency) => schedule::completed_checklists(&maintenance.history, frequency)
                .into_iter()
                .cloned()
                .collect(),
            None => {
                let mut records: Vec<MaintenanceHistoryRecord> = maintenance.history.into();
                records.sort_by_key(|record| Reverse(record.completed_at));
                records
            }
        };

        Ok(records)
    }
}
