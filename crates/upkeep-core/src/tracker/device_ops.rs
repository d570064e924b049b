//! Device operations for the Tracker.

use jiff::Timestamp;
use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, UpkeepError},
    models::{Device, DeviceFilter},
    params::{CreateDevice, Id, ListDevices},
};

impl Tracker {
    /// Registers a new device.
    pub async fn add_device(&self, params: &CreateDevice) -> Result<Device> {
        params.validate()?;

        let db_path = self.db_path.clone();
        let params = params.clone();
        let now: Timestamp = self.now().timestamp();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_device(&params, now)
        })
        .await
        .map_err(|e| UpkeepError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a device by its ID.
    pub async fn get_device(&self, params: &Id) -> Result<Option<Device>> {
        let db_path = self.db_path.clone();
        let device_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_device(device_id)
        })
        .await
        .map_err(|e| UpkeepError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists devices matching the given criteria.
    pub async fn list_devices(&self, params: &ListDevices) -> Result<Vec<Device>> {
        let db_path = self.db_path.clone();
        let filter = DeviceFilter::from(params);

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_devices(Some(&filter))
        })
        .await
        .map_err(|e| UpkeepError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Permanently deletes a device along with its plan and history.
    pub(crate) async fn delete_device_by_id(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let device_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_device(device_id)
        })
        .await
        .map_err(|e| UpkeepError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
