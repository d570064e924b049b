//! Resolved checklist tasks.

use serde::{Deserialize, Serialize};

use super::Frequency;

/// A task resolved from the plan for one frequency bucket.
///
/// Derived on demand from schedule entries; never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identity of the underlying schedule entry
    pub id: String,

    /// Bucket the task was resolved for
    pub frequency: Frequency,

    pub description: String,

    pub page_reference: String,

    /// Task has no fixed recurrence and is logged individually
    pub is_as_needed_task: bool,
}
