use upkeep_core::{Tracker, TrackerBuilder};
use tempfile::TempDir;

/// Helper function to create a tracker in UTC with its clock pinned to `at`
pub async fn create_test_tracker(temp_dir: &TempDir, at: &str) -> Tracker {
    TrackerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_time_zone(Some("UTC"))
        .with_fixed_time(Some(at.parse().expect("valid timestamp")))
        .build()
        .await
        .expect("Failed to create tracker")
}
