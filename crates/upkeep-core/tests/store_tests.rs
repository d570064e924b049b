use jiff::Timestamp;
use tempfile::NamedTempFile;
use upkeep_core::{
    models::{DeviceFilter, PeriodId},
    CreateDevice, Database, Frequency, MaintenanceHistoryRecord, MaintenancePlan, ScheduleEntry,
    UpkeepError,
};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn now() -> Timestamp {
    "2024-03-05T09:30:00Z".parse().unwrap()
}

fn device(name: &str, category: &str, assigned_to: Option<&str>) -> CreateDevice {
    CreateDevice {
        name: name.to_string(),
        model: "M-1".to_string(),
        category: category.to_string(),
        serial_number: Some("SN-0042".to_string()),
        supplier: None,
        assigned_to: assigned_to.map(String::from),
    }
}

#[test]
fn test_database_initialization_is_idempotent() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());

    // Reopening runs the schema and migrations again
    let _reopened = Database::new(temp_file.path()).expect("Failed to reopen database");
}

#[test]
fn test_create_and_get_device() {
    let (_temp_file, mut db) = create_test_db();

    let created = db
        .create_device(&device("Ventilator", "respiratory", Some("biomed")), now())
        .expect("Failed to create device");
    assert!(created.id > 0);

    let fetched = db
        .get_device(created.id)
        .expect("Failed to get device")
        .expect("Device should exist");
    assert_eq!(fetched, created);
    assert_eq!(fetched.serial_number.as_deref(), Some("SN-0042"));
    assert!(fetched.last_maintenance.is_none());

    assert!(db.get_device(created.id + 100).expect("Query failed").is_none());
}

#[test]
fn test_list_devices_with_filter() {
    let (_temp_file, mut db) = create_test_db();

    db.create_device(&device("Ventilator", "Respiratory", Some("alice")), now())
        .expect("Failed to create device");
    db.create_device(&device("Nebulizer", "respiratory", Some("bob")), now())
        .expect("Failed to create device");
    db.create_device(&device("X-Ray", "imaging", Some("alice")), now())
        .expect("Failed to create device");

    assert_eq!(db.list_devices(None).expect("List failed").len(), 3);

    let respiratory = db
        .list_devices(Some(&DeviceFilter {
            category: Some("RESPIRATORY".to_string()),
            assigned_to: None,
        }))
        .expect("List failed");
    assert_eq!(respiratory.len(), 2);
    assert_eq!(respiratory[0].name, "Ventilator");

    let alice_respiratory = db
        .list_devices(Some(&DeviceFilter {
            category: Some("respiratory".to_string()),
            assigned_to: Some("alice".to_string()),
        }))
        .expect("List failed");
    assert_eq!(alice_respiratory.len(), 1);
}

#[test]
fn test_delete_device() {
    let (_temp_file, mut db) = create_test_db();

    let created = db
        .create_device(&device("Ventilator", "respiratory", None), now())
        .expect("Failed to create device");
    db.delete_device(created.id).expect("Failed to delete device");
    assert!(db.get_device(created.id).expect("Query failed").is_none());

    let err = db.delete_device(created.id).unwrap_err();
    assert!(matches!(err, UpkeepError::DeviceNotFound { .. }));
}

#[test]
fn test_new_device_has_empty_maintenance() {
    let (_temp_file, mut db) = create_test_db();

    let created = db
        .create_device(&device("Ventilator", "respiratory", None), now())
        .expect("Failed to create device");
    let maintenance = db
        .get_maintenance(created.id)
        .expect("Query failed")
        .expect("Device should exist");

    assert!(maintenance.plan.is_none());
    assert!(maintenance.history.is_empty());
}

#[test]
fn test_update_maintenance_persists_documents() {
    let (_temp_file, mut db) = create_test_db();
    let created = db
        .create_device(&device("Ventilator", "respiratory", None), now())
        .expect("Failed to create device");
    let later: Timestamp = "2024-03-06T10:00:00Z".parse().unwrap();

    db.update_maintenance(created.id, later, |maintenance| {
        maintenance.plan = Some(MaintenancePlan {
            schedule: vec![ScheduleEntry::new("Daily", "Check alarms", "p. 4")],
            created_at: Some(later),
            ..Default::default()
        });
        maintenance.history.upsert(MaintenanceHistoryRecord {
            frequency: Frequency::Daily,
            period: PeriodId::from("2024-03-06"),
            completed_at: later,
            completed_by: "biomed".to_string(),
            tasks: Vec::new(),
            is_as_needed_task: false,
        });
        maintenance.device.last_maintenance = Some(jiff::civil::date(2024, 3, 6));
        Ok(())
    })
    .expect("Failed to update maintenance");

    let maintenance = db
        .get_maintenance(created.id)
        .expect("Query failed")
        .expect("Device should exist");
    let plan = maintenance.plan.expect("Plan should be stored");
    assert_eq!(plan.schedule.len(), 1);
    assert_eq!(plan.created_at, Some(later));
    assert!(maintenance
        .history
        .contains(Frequency::Daily, &PeriodId::from("2024-03-06")));
    assert_eq!(
        maintenance.device.last_maintenance,
        Some(jiff::civil::date(2024, 3, 6))
    );
    assert_eq!(maintenance.device.updated_at, later);
}

#[test]
fn test_failed_update_writes_nothing() {
    let (_temp_file, mut db) = create_test_db();
    let created = db
        .create_device(&device("Ventilator", "respiratory", None), now())
        .expect("Failed to create device");

    let result: upkeep_core::Result<()> = db.update_maintenance(created.id, now(), |maintenance| {
        maintenance.plan = Some(MaintenancePlan::default());
        Err(UpkeepError::validation("Please complete all tasks before saving"))
    });
    assert!(matches!(result, Err(UpkeepError::Validation { .. })));

    let maintenance = db
        .get_maintenance(created.id)
        .expect("Query failed")
        .expect("Device should exist");
    assert!(maintenance.plan.is_none());
}

#[test]
fn test_update_maintenance_missing_device() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.update_maintenance(7, now(), |_| Ok(()));
    assert!(matches!(result, Err(UpkeepError::DeviceNotFound { id: 7 })));
}
