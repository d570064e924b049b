//! Maintenance plan documents.

use std::collections::HashSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{frequency::normalize_tag, Frequency};

/// Number of hex characters of the content digest kept in a task id.
const TASK_ID_DIGEST_LEN: usize = 12;

/// A normalized maintenance plan owned by a device.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenancePlan {
    /// Scheduled tasks, in manual order
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,

    /// Replaceable parts and their replacement intervals
    #[serde(default)]
    pub parts: Vec<Part>,

    /// Warnings quoted from the manual
    #[serde(default)]
    pub warnings: Vec<Warning>,

    #[serde(default)]
    pub safety_precautions: String,

    #[serde(default)]
    pub safety_precautions_page_reference: String,

    #[serde(default)]
    pub additional_notes: String,

    #[serde(default)]
    pub additional_notes_page_reference: String,

    /// Plan epoch: set on the first completion recorded against the plan,
    /// never changed afterwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// One task of the schedule as extracted from the manual.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Stable task identity, assigned at normalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Free-text frequency tag ("Daily", "As Needed", ...)
    pub frequency: String,

    /// Task description, worded as in the manual
    pub tasks: String,

    #[serde(default)]
    pub page_reference: String,
}

/// A replaceable part.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub name: String,

    #[serde(default)]
    pub replacement_interval: String,

    #[serde(default)]
    pub page_reference: String,
}

/// A warning quoted from the manual.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub text: String,

    #[serde(default)]
    pub page_reference: String,
}

/// A plan as produced by the external manual extractor.
///
/// Every field may be missing; the normalizer turns this into a complete
/// [`MaintenancePlan`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawMaintenancePlan {
    pub schedule: Option<Vec<ScheduleEntry>>,
    pub parts: Option<Vec<Part>>,
    pub warnings: Option<Vec<Warning>>,
    pub safety_precautions: Option<String>,
    pub safety_precautions_page_reference: Option<String>,
    pub additional_notes: Option<String>,
    pub additional_notes_page_reference: Option<String>,
    pub created_at: Option<Timestamp>,
}

impl From<MaintenancePlan> for RawMaintenancePlan {
    fn from(plan: MaintenancePlan) -> Self {
        Self {
            schedule: Some(plan.schedule),
            parts: Some(plan.parts),
            warnings: Some(plan.warnings),
            safety_precautions: Some(plan.safety_precautions),
            safety_precautions_page_reference: Some(plan.safety_precautions_page_reference),
            additional_notes: Some(plan.additional_notes),
            additional_notes_page_reference: Some(plan.additional_notes_page_reference),
            created_at: plan.created_at,
        }
    }
}

impl ScheduleEntry {
    /// Create an entry without an id; one is assigned at normalization.
    pub fn new(
        frequency: impl Into<String>,
        tasks: impl Into<String>,
        page_reference: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            frequency: frequency.into(),
            tasks: tasks.into(),
            page_reference: page_reference.into(),
        }
    }

    /// The frequency bucket named by this entry's tag, if recognized.
    pub fn bucket(&self) -> Option<Frequency> {
        Frequency::from_tag(&self.frequency)
    }

    /// Whether the entry's tag names `frequency`, ignoring case.
    pub fn is_tagged(&self, frequency: Frequency) -> bool {
        normalize_tag(&self.frequency) == frequency.as_str()
    }

    /// Content-derived identity: frequency slug plus a digest of the tag and
    /// description.
    ///
    /// ```rust
    /// use upkeep_core::models::ScheduleEntry;
    ///
    /// let a = ScheduleEntry::new("Daily", "Clean the housing", "p. 12");
    /// let b = ScheduleEntry::new("daily", "Clean the housing", "p. 40");
    /// assert_eq!(a.content_id(), b.content_id());
    /// assert!(a.content_id().starts_with("daily-"));
    /// ```
    pub fn content_id(&self) -> String {
        let tag = normalize_tag(&self.frequency);
        let mut hasher = Sha256::new();
        hasher.update(tag.as_bytes());
        hasher.update([0x1f]);
        hasher.update(self.tasks.trim().as_bytes());
        let digest = hasher.finalize();

        let hex: String = digest[..TASK_ID_DIGEST_LEN / 2]
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect();

        format!("{}-{hex}", tag_slug(&tag))
    }
}

/// Slug for a normalized tag; unrecognized tags are kebab-cased.
fn tag_slug(tag: &str) -> String {
    if let Some(frequency) = Frequency::from_tag(tag) {
        return frequency.slug().to_string();
    }

    let slug = tag
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "task".to_string()
    } else {
        slug
    }
}

impl MaintenancePlan {
    /// Task ids for every schedule entry, parallel to `schedule`.
    ///
    /// Stored ids are used as-is and reserved up front; entries without one
    /// get their content id, suffixed `-2`, `-3`, ... until it is unique.
    pub fn entry_ids(&self) -> Vec<String> {
        let mut taken: HashSet<String> = self
            .schedule
            .iter()
            .filter_map(|entry| entry.id.clone())
            .collect();

        self.schedule
            .iter()
            .map(|entry| {
                if let Some(id) = &entry.id {
                    return id.clone();
                }

                let base = entry.content_id();
                let mut id = base.clone();
                let mut n = 1;
                while taken.contains(&id) {
                    n += 1;
                    id = format!("{base}-{n}");
                }
                taken.insert(id.clone());
                id
            })
            .collect()
    }

    /// Stamp every entry that lacks an id with the id from [`entry_ids`].
    ///
    /// [`entry_ids`]: MaintenancePlan::entry_ids
    pub fn assign_entry_ids(&mut self) {
        let ids = self.entry_ids();
        for (entry, id) in self.schedule.iter_mut().zip(ids) {
            if entry.id.is_none() {
                entry.id = Some(id);
            }
        }
    }

    /// Whether the plan epoch has been set.
    pub fn has_epoch(&self) -> bool {
        self.created_at.is_some()
    }
}
