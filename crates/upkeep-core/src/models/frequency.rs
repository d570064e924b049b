//! Maintenance frequency classes.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Recurrence class of a maintenance task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Frequency {
    /// Before every use of the device
    PerUse,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    /// No fixed recurrence; completed and logged individually
    AsNeeded,
    /// Catch-all bucket for tasks with no recognized recurrence
    Other,
}

impl Frequency {
    /// Every frequency, in the order checklists are presented.
    pub const ALL: [Frequency; 8] = [
        Frequency::PerUse,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Yearly,
        Frequency::AsNeeded,
        Frequency::Other,
    ];

    /// Canonical lowercase key, as stored in history records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::PerUse => "per use",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
            Frequency::AsNeeded => "as needed",
            Frequency::Other => "other",
        }
    }

    /// Human-readable label, as used in schedule entry tags.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::PerUse => "Per Use",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
            Frequency::AsNeeded => "As Needed",
            Frequency::Other => "Other",
        }
    }

    /// Key with spaces replaced by dashes, used in task ids.
    pub fn slug(&self) -> &'static str {
        match self {
            Frequency::PerUse => "per-use",
            Frequency::AsNeeded => "as-needed",
            other => other.as_str(),
        }
    }

    /// Map a free-text schedule tag onto a frequency bucket.
    ///
    /// Returns `None` for tags that name no known frequency; such entries
    /// only surface through the as-needed phrasing rules.
    ///
    /// ```rust
    /// use upkeep_core::models::Frequency;
    ///
    /// assert_eq!(Frequency::from_tag(" Per Use "), Some(Frequency::PerUse));
    /// assert_eq!(Frequency::from_tag("AS_NEEDED"), Some(Frequency::AsNeeded));
    /// assert_eq!(Frequency::from_tag("Biannual"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized = normalize_tag(tag);
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == normalized)
    }

    /// Whether checklists of this frequency can ever be overdue.
    pub fn has_overdue_concept(&self) -> bool {
        !matches!(
            self,
            Frequency::PerUse | Frequency::AsNeeded | Frequency::Other
        )
    }

    /// Whether completions are appended as distinct events rather than
    /// upserted into a period slot.
    pub fn is_as_needed(&self) -> bool {
        matches!(self, Frequency::AsNeeded)
    }
}

/// Lowercase a tag and fold `-`/`_` separators into single spaces.
pub(crate) fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "peruse" => Ok(Frequency::PerUse),
            "asneeded" => Ok(Frequency::AsNeeded),
            _ => Self::from_tag(s).ok_or_else(|| format!("Invalid frequency: {s}")),
        }
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
