//! Plan normalization: repairing a raw extracted plan into a complete one.
//!
//! Every addition is guarded by an existence check, so normalizing an
//! already-normalized plan changes nothing.

use std::collections::HashSet;

use log::debug;

use super::resolver::mentions_as_needed;
use crate::models::{Device, Frequency, MaintenancePlan, RawMaintenancePlan, ScheduleEntry, Warning};

const SWITCH_ON_KEYWORDS: [&str; 3] = ["switch-on test", "switch on test", "power on test"];
const DEFAULT_SWITCH_ON_MARKER: &str = "check if the equipment can be switched on properly";
const DEFAULT_SWITCH_ON_TASK: &str =
    "Check if the equipment can be switched on properly. Verify all functions work correctly.";
const SWITCH_ON_PAGE: &str = "Switch-On Test";

const BATTERY_PAGE: &str = "Battery Maintenance";
const BATTERY_FUNCTIONAL_TASK: &str =
    "Perform battery functional test when first installed or when the battery is replaced.";
const BATTERY_PERFORMANCE_TASK: &str =
    "Perform battery performance test every three months or when the battery runtime is reduced significantly.";
const BATTERY_OPTIMIZATION_TASK: &str =
    "Optimize the battery every three months to maintain capacity and accuracy of remaining runtime indication.";

const PARTS_PAGE: &str = "Parts Replacement";
const SAFETY_PAGE: &str = "Safety Information";
const NOTES_PAGE: &str = "Maintenance Information";
const DEFAULT_SAFETY_PRECAUTIONS: &str = "Always follow manufacturer safety guidelines when performing maintenance. Disconnect power before servicing. Use appropriate personal protective equipment (PPE).";
const DEFAULT_WARNING: &str =
    "Always refer to the manufacturer's manual for complete safety information and warnings.";

/// Normalize a raw plan for `device`.
///
/// In order:
/// 1. missing collections default to empty,
/// 2. battery maintenance tasks are added only when the device, a task or a
///    part mentions a battery,
/// 3. entries with as-needed phrasing are retagged `As Needed` (`Other`
///    entries keep their tag),
/// 4. a `Per Use` entry is guaranteed, by promoting an existing switch-on
///    test or adding a default one,
/// 5. parts replaced "as needed" get an `As Needed` replacement entry,
/// 6. empty safety precautions, notes and absent warnings get boilerplate,
/// 7. every entry is stamped with its stable id.
///
/// The plan epoch is carried through untouched.
pub fn normalize(raw: RawMaintenancePlan, device: &Device) -> MaintenancePlan {
    let warnings_absent = raw.warnings.is_none();

    let mut plan = MaintenancePlan {
        schedule: raw.schedule.unwrap_or_default(),
        parts: raw.parts.unwrap_or_default(),
        warnings: raw.warnings.unwrap_or_default(),
        safety_precautions: raw.safety_precautions.unwrap_or_default(),
        safety_precautions_page_reference: raw.safety_precautions_page_reference.unwrap_or_default(),
        additional_notes: raw.additional_notes.unwrap_or_default(),
        additional_notes_page_reference: raw.additional_notes_page_reference.unwrap_or_default(),
        created_at: raw.created_at,
    };

    if has_battery(&plan, device) {
        add_battery_tasks(&mut plan);
    }

    // Retagging can empty the Per Use bucket, so the guarantee comes after it
    reclassify_as_needed(&mut plan);
    ensure_per_use_entry(&mut plan);
    add_part_replacements(&mut plan);
    fill_defaults(&mut plan, device, warnings_absent);
    plan.assign_entry_ids();

    debug!(
        "Normalized plan for device {}: {} schedule entries, {} parts",
        device.id,
        plan.schedule.len(),
        plan.parts.len()
    );
    plan
}

fn ensure_per_use_entry(plan: &mut MaintenancePlan) {
    if plan
        .schedule
        .iter()
        .any(|entry| entry.is_tagged(Frequency::PerUse))
    {
        return;
    }

    let switch_on = plan.schedule.iter_mut().find(|entry| {
        let lower = entry.tasks.to_lowercase();
        SWITCH_ON_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
    });

    if let Some(entry) = switch_on {
        debug!("Promoting '{}' to {}", entry.tasks, Frequency::PerUse);
        entry.frequency = Frequency::PerUse.label().to_string();
        return;
    }

    if !any_task_contains(plan, DEFAULT_SWITCH_ON_MARKER) {
        plan.schedule.push(ScheduleEntry::new(
            Frequency::PerUse.label(),
            DEFAULT_SWITCH_ON_TASK,
            SWITCH_ON_PAGE,
        ));
    }
}

/// Whether the device plausibly carries a battery.
fn has_battery(plan: &MaintenancePlan, device: &Device) -> bool {
    device.descriptor_text().contains("battery")
        || any_task_contains(plan, "battery")
        || plan
            .parts
            .iter()
            .any(|part| part.name.to_lowercase().contains("battery"))
}

fn add_battery_tasks(plan: &mut MaintenancePlan) {
    let battery_tasks: Vec<String> = plan
        .schedule
        .iter()
        .map(|entry| entry.tasks.to_lowercase())
        .filter(|tasks| tasks.contains("battery"))
        .collect();
    let covered = |needles: &[&str]| {
        battery_tasks
            .iter()
            .any(|tasks| needles.iter().any(|needle| tasks.contains(needle)))
    };

    let missing = [
        (
            covered(&["functional test"]),
            Frequency::AsNeeded,
            BATTERY_FUNCTIONAL_TASK,
        ),
        (
            covered(&["performance test"]),
            Frequency::Quarterly,
            BATTERY_PERFORMANCE_TASK,
        ),
        (
            covered(&["optimization", "optimize"]),
            Frequency::Quarterly,
            BATTERY_OPTIMIZATION_TASK,
        ),
    ];

    for (present, frequency, task) in missing {
        if !present {
            debug!("Adding battery task: {task}");
            plan.schedule
                .push(ScheduleEntry::new(frequency.label(), task, BATTERY_PAGE));
        }
    }
}

fn reclassify_as_needed(plan: &mut MaintenancePlan) {
    for entry in &mut plan.schedule {
        if mentions_as_needed(&entry.tasks)
            && !entry.is_tagged(Frequency::AsNeeded)
            && !entry.is_tagged(Frequency::Other)
        {
            debug!(
                "Retagging '{}' from '{}' to {}",
                entry.tasks,
                entry.frequency,
                Frequency::AsNeeded
            );
            entry.frequency = Frequency::AsNeeded.label().to_string();
        }
    }
}

fn add_part_replacements(plan: &mut MaintenancePlan) {
    let mut existing: HashSet<String> = plan
        .schedule
        .iter()
        .map(|entry| entry.tasks.to_lowercase())
        .collect();

    let mut additions = Vec::new();
    for part in &plan.parts {
        if !mentions_as_needed(&part.replacement_interval) {
            continue;
        }

        let task = format!("Replace {} {}", part.name, part.replacement_interval);
        if !existing.insert(task.to_lowercase()) {
            continue;
        }

        let page = if part.page_reference.is_empty() {
            PARTS_PAGE
        } else {
            part.page_reference.as_str()
        };
        additions.push(ScheduleEntry::new(Frequency::AsNeeded.label(), task, page));
    }

    plan.schedule.extend(additions);
}

fn fill_defaults(plan: &mut MaintenancePlan, device: &Device, warnings_absent: bool) {
    if plan.safety_precautions.trim().is_empty() {
        plan.safety_precautions = DEFAULT_SAFETY_PRECAUTIONS.to_string();
        plan.safety_precautions_page_reference = SAFETY_PAGE.to_string();
    }

    if plan.additional_notes.trim().is_empty() {
        plan.additional_notes = format!(
            "Maintenance should be performed by qualified personnel. Keep detailed maintenance records for {} {}.",
            device.name, device.model
        );
        plan.additional_notes_page_reference = NOTES_PAGE.to_string();
    }

    if warnings_absent {
        plan.warnings = vec![Warning {
            text: DEFAULT_WARNING.to_string(),
            page_reference: SAFETY_PAGE.to_string(),
        }];
    }
}

fn any_task_contains(plan: &MaintenancePlan, needle: &str) -> bool {
    plan.schedule
        .iter()
        .any(|entry| entry.tasks.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Part;

    fn device(name: &str, model: &str, category: &str) -> Device {
        let now = Timestamp::from_second(1704067200).unwrap();
        Device {
            id: 7,
            name: name.to_string(),
            model: model.to_string(),
            category: category.to_string(),
            serial_number: None,
            supplier: None,
            assigned_to: Some("biomed".to_string()),
            last_maintenance: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn raw(schedule: Vec<ScheduleEntry>, parts: Vec<Part>) -> RawMaintenancePlan {
        RawMaintenancePlan {
            schedule: Some(schedule),
            parts: Some(parts),
            ..Default::default()
        }
    }

    fn battery_entries(plan: &MaintenancePlan) -> Vec<&ScheduleEntry> {
        plan.schedule
            .iter()
            .filter(|entry| entry.tasks.to_lowercase().contains("battery"))
            .collect()
    }

    #[test]
    fn test_empty_raw_plan_gets_structural_defaults() {
        let device = device("Patient Monitor", "PM-9", "monitoring");
        let plan = normalize(RawMaintenancePlan::default(), &device);

        assert_eq!(plan.schedule.len(), 1);
        assert_eq!(plan.schedule[0].frequency, "Per Use");
        assert_eq!(plan.schedule[0].tasks, DEFAULT_SWITCH_ON_TASK);
        assert_eq!(plan.schedule[0].page_reference, SWITCH_ON_PAGE);
        assert!(plan.parts.is_empty());
        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(plan.warnings[0].page_reference, SAFETY_PAGE);
        assert_eq!(plan.safety_precautions, DEFAULT_SAFETY_PRECAUTIONS);
        assert_eq!(
            plan.additional_notes,
            "Maintenance should be performed by qualified personnel. Keep detailed maintenance records for Patient Monitor PM-9."
        );
        assert!(plan.schedule.iter().all(|entry| entry.id.is_some()));
    }

    #[test]
    fn test_existing_switch_on_test_is_promoted() {
        let device = device("Defibrillator", "D-2", "emergency");
        let plan = normalize(
            raw(
                vec![
                    ScheduleEntry::new("Daily", "Perform power on test and check display", "p. 8"),
                    ScheduleEntry::new("Daily", "Check electrodes", "p. 9"),
                ],
                Vec::new(),
            ),
            &device,
        );

        assert_eq!(plan.schedule.len(), 2);
        assert_eq!(plan.schedule[0].frequency, "Per Use");
        assert_eq!(plan.schedule[0].page_reference, "p. 8");
    }

    #[test]
    fn test_present_per_use_entry_is_kept() {
        let device = device("Defibrillator", "D-2", "emergency");
        let plan = normalize(
            raw(
                vec![
                    ScheduleEntry::new("per use", "Check pads", "p. 3"),
                    ScheduleEntry::new("Daily", "Switch-on test", "p. 4"),
                ],
                Vec::new(),
            ),
            &device,
        );

        assert_eq!(plan.schedule.len(), 2);
        assert_eq!(plan.schedule[1].frequency, "Daily");
    }

    #[test]
    fn test_no_battery_signal_adds_no_battery_tasks() {
        let device = device("Infusion Pump X1", "X1", "therapeutic");
        let plan = normalize(
            raw(
                vec![ScheduleEntry::new("Weekly", "Inspect the tubing", "p. 12")],
                vec![Part {
                    name: "Pressure sensor".to_string(),
                    replacement_interval: "every 2 years".to_string(),
                    page_reference: "p. 30".to_string(),
                }],
            ),
            &device,
        );

        assert!(battery_entries(&plan).is_empty());
    }

    #[test]
    fn test_battery_device_gets_exactly_three_battery_tasks() {
        let device = device("Battery Monitor", "BM-1", "diagnostic");
        let plan = normalize(
            raw(
                vec![ScheduleEntry::new("Weekly", "Inspect the housing", "p. 12")],
                Vec::new(),
            ),
            &device,
        );

        let battery = battery_entries(&plan);
        assert_eq!(battery.len(), 3);
        assert_eq!(battery[0].frequency, "As Needed");
        assert_eq!(battery[1].frequency, "Quarterly");
        assert_eq!(battery[2].frequency, "Quarterly");
        assert!(battery.iter().all(|entry| entry.page_reference == BATTERY_PAGE));
    }

    #[test]
    fn test_battery_signal_from_parts_and_existing_tasks() {
        let device = device("Ventilator", "V-300", "respiratory");

        let from_part = normalize(
            raw(
                Vec::new(),
                vec![Part {
                    name: "Backup battery".to_string(),
                    replacement_interval: "every 2 years".to_string(),
                    page_reference: String::new(),
                }],
            ),
            &device,
        );
        assert_eq!(battery_entries(&from_part).len(), 3);

        let from_task = normalize(
            raw(
                vec![ScheduleEntry::new("Monthly", "Run battery performance test", "p. 40")],
                Vec::new(),
            ),
            &device,
        );
        let battery = battery_entries(&from_task);
        assert_eq!(battery.len(), 3);
        assert!(!battery
            .iter()
            .any(|entry| entry.tasks == BATTERY_PERFORMANCE_TASK));
    }

    #[test]
    fn test_as_needed_phrasing_is_retagged() {
        let device = device("Suction Unit", "S-1", "surgical");
        let plan = normalize(
            raw(
                vec![
                    ScheduleEntry::new("Monthly", "Replace filter if needed", "p. 6"),
                    ScheduleEntry::new("Other", "Clean canister when needed", "p. 7"),
                    ScheduleEntry::new("Monthly", "Inspect tubing", "p. 8"),
                ],
                Vec::new(),
            ),
            &device,
        );

        assert_eq!(plan.schedule[0].frequency, "As Needed");
        assert_eq!(plan.schedule[1].frequency, "Other");
        assert_eq!(plan.schedule[2].frequency, "Monthly");
    }

    #[test]
    fn test_parts_replaced_as_needed_become_entries() {
        let device = device("Suction Unit", "S-1", "surgical");
        let parts = vec![
            Part {
                name: "Bacterial filter".to_string(),
                replacement_interval: "as needed".to_string(),
                page_reference: String::new(),
            },
            Part {
                name: "Canister".to_string(),
                replacement_interval: "When needed".to_string(),
                page_reference: "p. 19".to_string(),
            },
            Part {
                name: "Motor".to_string(),
                replacement_interval: "every 5 years".to_string(),
                page_reference: "p. 20".to_string(),
            },
        ];
        let plan = normalize(
            raw(
                vec![ScheduleEntry::new("Other", "replace canister when needed", "p. 2")],
                parts,
            ),
            &device,
        );

        let replacements: Vec<_> = plan
            .schedule
            .iter()
            .filter(|entry| entry.tasks.starts_with("Replace "))
            .collect();
        assert_eq!(replacements.len(), 1);
        assert_eq!(replacements[0].tasks, "Replace Bacterial filter as needed");
        assert_eq!(replacements[0].frequency, "As Needed");
        assert_eq!(replacements[0].page_reference, PARTS_PAGE);
    }

    #[test]
    fn test_extracted_text_is_kept_over_boilerplate() {
        let device = device("Suction Unit", "S-1", "surgical");
        let plan = normalize(
            RawMaintenancePlan {
                warnings: Some(Vec::new()),
                safety_precautions: Some("Wear gloves".to_string()),
                safety_precautions_page_reference: Some("p. 1".to_string()),
                ..Default::default()
            },
            &device,
        );

        assert!(plan.warnings.is_empty());
        assert_eq!(plan.safety_precautions, "Wear gloves");
        assert_eq!(plan.safety_precautions_page_reference, "p. 1");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let device = device("Battery Monitor", "BM-1", "diagnostic");
        let created_at = Timestamp::from_second(1704067200).unwrap();
        let raw_plan = RawMaintenancePlan {
            schedule: Some(vec![
                ScheduleEntry::new("Daily", "Check display", "p. 3"),
                ScheduleEntry::new("Weekly", "Lubricate wheels as needed", "p. 4"),
                ScheduleEntry::new("Daily", "Check display", "p. 3"),
            ]),
            parts: Some(vec![Part {
                name: "Fuse".to_string(),
                replacement_interval: "if needed".to_string(),
                page_reference: "p. 50".to_string(),
            }]),
            created_at: Some(created_at),
            ..Default::default()
        };

        let once = normalize(raw_plan, &device);
        let twice = normalize(RawMaintenancePlan::from(once.clone()), &device);

        assert_eq!(once, twice);
        assert_eq!(twice.created_at, Some(created_at));
    }

    #[test]
    fn test_per_use_entry_survives_as_needed_retagging() {
        let device = device("Ultrasound Scanner", "US-5", "imaging");
        let raw_plan = raw(
            vec![ScheduleEntry::new("Per Use", "Clean probe if needed", "p. 14")],
            Vec::new(),
        );

        let once = normalize(raw_plan, &device);
        assert_eq!(once.schedule.len(), 2);
        assert_eq!(once.schedule[0].frequency, "As Needed");
        assert_eq!(once.schedule[1].frequency, "Per Use");
        assert_eq!(once.schedule[1].tasks, DEFAULT_SWITCH_ON_TASK);

        let twice = normalize(RawMaintenancePlan::from(once.clone()), &device);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_switch_on_test_with_as_needed_phrasing_stays_per_use() {
        let device = device("Ultrasound Scanner", "US-5", "imaging");
        let once = normalize(
            raw(
                vec![ScheduleEntry::new("Daily", "Repeat switch-on test if needed", "p. 15")],
                Vec::new(),
            ),
            &device,
        );

        assert_eq!(once.schedule.len(), 1);
        assert_eq!(once.schedule[0].frequency, "Per Use");

        let twice = normalize(RawMaintenancePlan::from(once.clone()), &device);
        assert_eq!(once, twice);
    }
}
