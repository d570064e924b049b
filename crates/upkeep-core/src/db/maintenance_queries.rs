//! Reading and writing the plan and history documents owned by a device.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::device_queries::{device_from_row, DEVICE_COLUMNS};
use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::{DeviceMaintenance, MaintenanceHistory, MaintenancePlan},
};

const UPDATE_MAINTENANCE_SQL: &str = "UPDATE devices SET maintenance_plan = ?1, maintenance_history = ?2, last_maintenance = ?3, updated_at = ?4 WHERE id = ?5";

impl super::Database {
    /// Loads a device with its plan and history.
    pub fn get_maintenance(&self, device_id: u64) -> Result<Option<DeviceMaintenance>> {
        load_maintenance(&self.connection, device_id)
    }

    /// Applies `apply` to a device's maintenance documents and persists the
    /// result atomically.
    ///
    /// The row is read and written inside one immediate transaction, so two
    /// concurrent completions for the same device cannot lose each other's
    /// records. When `apply` fails nothing is written.
    pub fn update_maintenance<T, F>(
        &mut self,
        device_id: u64,
        updated_at: Timestamp,
        apply: F,
    ) -> Result<T>
    where
        F: FnOnce(&mut DeviceMaintenance) -> Result<T>,
    {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let mut maintenance = load_maintenance(&tx, device_id)?
            .ok_or(UpkeepError::DeviceNotFound { id: device_id })?;

        let output = apply(&mut maintenance)?;

        let plan_json = maintenance
            .plan
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let history_json = serde_json::to_string(&maintenance.history)?;
        let last_maintenance = maintenance.device.last_maintenance.map(|d| d.to_string());

        tx.execute(
            UPDATE_MAINTENANCE_SQL,
            params![
                plan_json,
                history_json,
                last_maintenance,
                updated_at.to_string(),
                device_id as i64
            ],
        )
        .db_context("Failed to update maintenance documents")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(output)
    }
}

fn load_maintenance(conn: &Connection, device_id: u64) -> Result<Option<DeviceMaintenance>> {
    let query =
        format!("SELECT {DEVICE_COLUMNS}, maintenance_plan, maintenance_history FROM devices WHERE id = ?1");
    let mut stmt = conn.prepare(&query).db_context("Failed to prepare query")?;

    let row = stmt
        .query_row(params![device_id as i64], |row| {
            let device = device_from_row(row)?;
            let plan: Option<String> = row.get(10)?;
            let history: String = row.get(11)?;
            Ok((device, plan, history))
        })
        .optional()
        .db_context("Failed to query device maintenance")?;

    let Some((device, plan_json, history_json)) = row else {
        return Ok(None);
    };

    let plan = plan_json
        .as_deref()
        .filter(|json| !json.trim().is_empty())
        .map(serde_json::from_str::<MaintenancePlan>)
        .transpose()?;
    let history = if history_json.trim().is_empty() {
        MaintenanceHistory::new()
    } else {
        serde_json::from_str(&history_json)?
    };

    Ok(Some(DeviceMaintenance {
        device,
        plan,
        history,
    }))
}
