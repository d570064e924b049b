//! Builder for creating and configuring Tracker instances.

use std::path::{Path, PathBuf};

use jiff::{tz::TimeZone, Timestamp};
use log::debug;
use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, UpkeepError},
};

/// Builder for creating and configuring Tracker instances.
#[derive(Debug, Clone, Default)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    time_zone: Option<String>,
    fixed_now: Option<Timestamp>,
}

impl TrackerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/upkeep/upkeep.db` or `~/.local/share/upkeep/upkeep.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the IANA time zone (or fixed offset such as `UTC`) that periods
    /// are computed in. Defaults to the system time zone.
    pub fn with_time_zone(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name {
            self.time_zone = Some(name.to_string());
        }
        self
    }

    /// Pins the tracker's clock to `at`.
    pub fn with_fixed_time(mut self, at: Option<Timestamp>) -> Self {
        if at.is_some() {
            self.fixed_now = at;
        }
        self
    }

    /// Builds the configured tracker instance.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::InvalidInput` if the time zone is unknown
    /// Returns `UpkeepError::FileSystem` if the database path is invalid
    /// Returns `UpkeepError::Database` if database initialization fails
    pub async fn build(self) -> Result<Tracker> {
        let time_zone = match self.time_zone.as_deref() {
            Some(name) => TimeZone::get(name).map_err(|e| {
                UpkeepError::invalid_input("time_zone").with_reason(format!("{name}: {e}"))
            })?,
            None => TimeZone::system(),
        };

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| UpkeepError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), UpkeepError>(())
        })
        .await
        .map_err(|e| UpkeepError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        debug!("Opened tracker database at {}", db_path.display());
        Ok(Tracker::new(db_path, time_zone, self.fixed_now))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("upkeep")
            .place_data_file("upkeep.db")
            .map_err(|e| UpkeepError::XdgDirectory(e.to_string()))
    }
}
