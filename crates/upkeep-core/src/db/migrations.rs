//! Database schema initialization and migrations.

use log::info;

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Bring databases created before the history column existed up to date.
    fn apply_migrations(&self) -> Result<()> {
        let has_history_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('devices') WHERE name = 'maintenance_history'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect devices table")?;

        if !has_history_column {
            info!("Adding maintenance_history column to devices table");
            self.connection
                .execute(
                    "ALTER TABLE devices ADD COLUMN maintenance_history TEXT NOT NULL DEFAULT '[]'",
                    [],
                )
                .db_context("Failed to add maintenance_history column to devices table")?;
        }

        Ok(())
    }
}
