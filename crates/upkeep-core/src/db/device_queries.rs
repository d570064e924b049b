//! Device CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::{Device, DeviceFilter},
    params::CreateDevice,
};

const INSERT_DEVICE_SQL: &str = "INSERT INTO devices (name, model, category, serial_number, supplier, assigned_to, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const DELETE_DEVICE_SQL: &str = "DELETE FROM devices WHERE id = ?1";

pub(super) const DEVICE_COLUMNS: &str = "id, name, model, category, serial_number, supplier, assigned_to, last_maintenance, created_at, updated_at";

impl super::Database {
    /// Registers a new device with an empty plan and history.
    pub fn create_device(&mut self, params: &CreateDevice, now: Timestamp) -> Result<Device> {
        params.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = now.to_string();
        let name = params.name.trim();

        tx.execute(
            INSERT_DEVICE_SQL,
            params![
                name,
                &params.model,
                &params.category,
                params.serial_number.as_deref(),
                params.supplier.as_deref(),
                params.assigned_to.as_deref(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert device")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Device {
            id,
            name: name.to_string(),
            model: params.model.clone(),
            category: params.category.clone(),
            serial_number: params.serial_number.clone(),
            supplier: params.supplier.clone(),
            assigned_to: params.assigned_to.clone(),
            last_maintenance: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a device by its ID.
    pub fn get_device(&self, id: u64) -> Result<Option<Device>> {
        let query = format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], device_from_row)
            .optional()
            .db_context("Failed to query device")
    }

    /// Lists devices, oldest registration first.
    pub fn list_devices(&self, filter: Option<&DeviceFilter>) -> Result<Vec<Device>> {
        let mut query = format!("SELECT {DEVICE_COLUMNS} FROM devices");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref category) = f.category {
                conditions.push("category = ? COLLATE NOCASE");
                params_vec.push(Box::new(category.clone()));
            }

            if let Some(ref assigned_to) = f.assigned_to {
                conditions.push("assigned_to = ?");
                params_vec.push(Box::new(assigned_to.clone()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY id ASC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let devices = stmt
            .query_map(&params_refs[..], device_from_row)
            .db_context("Failed to query devices")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to collect devices")?;

        Ok(devices)
    }

    /// Deletes a device together with its plan and history.
    pub fn delete_device(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows_affected = tx
            .execute(DELETE_DEVICE_SQL, params![id as i64])
            .db_context("Failed to delete device")?;

        if rows_affected == 0 {
            return Err(UpkeepError::DeviceNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}

/// Maps a row selected with [`DEVICE_COLUMNS`] to a [`Device`].
pub(super) fn device_from_row(row: &Row<'_>) -> rusqlite::Result<Device> {
    let last_maintenance = row
        .get::<_, Option<String>>(7)?
        .map(|s| s.parse::<Date>())
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

    Ok(Device {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        model: row.get(2)?,
        category: row.get(3)?,
        serial_number: row.get(4)?,
        supplier: row.get(5)?,
        assigned_to: row.get(6)?,
        last_maintenance,
        created_at: row
            .get::<_, String>(8)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e)))?,
        updated_at: row
            .get::<_, String>(9)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?,
    })
}
