//! Overdue evaluation anchored to the plan epoch.

use jiff::{civil::Date, Span, Timestamp, ToSpan, Zoned};

use super::period::{period, start_of_day};
use crate::{
    error::Result,
    models::{Frequency, MaintenanceHistory},
};

/// Whether the active period of `frequency` is overdue at `now`.
///
/// Overdue is measured from the plan epoch, not from calendar boundaries: a
/// checklist only becomes overdue once one full frequency unit has elapsed
/// since the epoch (rounded down to the start of that day) without a record
/// for the period containing `now`.
///
/// Never overdue:
/// - per-use, as-needed and `Other` checklists,
/// - a period that already has a completion record,
/// - a plan without an epoch (no checklist was ever completed).
///
/// ```rust
/// use jiff::{Timestamp, Zoned};
/// use upkeep_core::{models::{Frequency, MaintenanceHistory}, schedule::overdue::is_overdue};
///
/// let epoch: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
/// let now: Zoned = "2024-01-03T00:01:00[UTC]".parse().unwrap();
/// let history = MaintenanceHistory::new();
/// assert!(is_overdue(Frequency::Daily, Some(epoch), &history, &now).unwrap());
/// ```
pub fn is_overdue(
    frequency: Frequency,
    plan_created_at: Option<Timestamp>,
    history: &MaintenanceHistory,
    now: &Zoned,
) -> Result<bool> {
    let Some(unit) = overdue_unit(frequency) else {
        return Ok(false);
    };

    let current = period(frequency, now)?;
    if history.contains(frequency, &current) {
        return Ok(false);
    }

    let Some(epoch) = plan_created_at else {
        return Ok(false);
    };

    let boundary = overdue_boundary(epoch, unit, now)?;
    Ok(now.timestamp() > boundary.timestamp())
}

/// The instant after which a never-completed period counts as overdue.
fn overdue_boundary(epoch: Timestamp, unit: Span, now: &Zoned) -> Result<Zoned> {
    let tz = now.time_zone();
    let epoch_date: Date = epoch.to_zoned(tz.clone()).date();
    let advanced = epoch_date.checked_add(unit)?;
    start_of_day(advanced, tz)
}

/// One cycle of `frequency`, or `None` where overdue does not apply.
fn overdue_unit(frequency: Frequency) -> Option<Span> {
    match frequency {
        Frequency::Daily => Some(1.day()),
        Frequency::Weekly => Some(7.days()),
        Frequency::Monthly => Some(1.month()),
        Frequency::Quarterly => Some(3.months()),
        Frequency::Yearly => Some(1.year()),
        Frequency::PerUse | Frequency::AsNeeded | Frequency::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, Zoned};

    use super::*;
    use crate::models::{MaintenanceHistoryRecord, PeriodId};

    fn at(s: &str) -> Zoned {
        s.parse().expect("valid zoned datetime")
    }

    fn ts(s: &str) -> Timestamp {
        s.parse().expect("valid timestamp")
    }

    fn record(frequency: Frequency, period: &str) -> MaintenanceHistoryRecord {
        MaintenanceHistoryRecord {
            frequency,
            period: PeriodId::from(period),
            completed_at: ts("2024-01-01T08:00:00Z"),
            completed_by: "tech".to_string(),
            tasks: Vec::new(),
            is_as_needed_task: false,
        }
    }

    #[test]
    fn test_daily_anchoring() {
        let epoch = Some(ts("2024-01-01T00:00:00Z"));
        let history = MaintenanceHistory::new();

        let same_day = at("2024-01-01T23:00:00[UTC]");
        assert!(!is_overdue(Frequency::Daily, epoch, &history, &same_day).unwrap());

        // A new calendar day alone is not enough: the boundary is the start
        // of the day after the epoch, and only strictly later instants count
        let boundary = at("2024-01-02T00:00:00[UTC]");
        assert!(!is_overdue(Frequency::Daily, epoch, &history, &boundary).unwrap());

        let later = at("2024-01-03T00:01:00[UTC]");
        assert!(is_overdue(Frequency::Daily, epoch, &history, &later).unwrap());
    }

    #[test]
    fn test_epoch_time_of_day_is_discarded() {
        let epoch = Some(ts("2024-01-01T22:00:00Z"));
        let history = MaintenanceHistory::new();

        let next_morning = at("2024-01-02T00:00:01[UTC]");
        assert!(is_overdue(Frequency::Daily, epoch, &history, &next_morning).unwrap());
    }

    #[test]
    fn test_completion_suppresses_overdue() {
        let epoch = Some(ts("2024-01-01T00:00:00Z"));
        let mut history = MaintenanceHistory::new();
        history.upsert(record(Frequency::Daily, "2024-01-05"));

        let now = at("2024-01-05T10:00:00[UTC]");
        assert!(!is_overdue(Frequency::Daily, epoch, &history, &now).unwrap());

        // The record only covers its own period
        let next_day = at("2024-01-06T10:00:00[UTC]");
        assert!(is_overdue(Frequency::Daily, epoch, &history, &next_day).unwrap());
    }

    #[test]
    fn test_missing_epoch_is_never_overdue() {
        let history = MaintenanceHistory::new();
        let now = at("2030-01-01T00:00:00[UTC]");
        for frequency in Frequency::ALL {
            assert!(!is_overdue(frequency, None, &history, &now).unwrap());
        }
    }

    #[test]
    fn test_frequencies_without_overdue_concept() {
        let history = MaintenanceHistory::new();
        let epochs = [
            ts("2000-01-01T00:00:00Z"),
            ts("2024-01-01T00:00:00Z"),
            ts("2029-12-31T23:59:59Z"),
        ];
        let nows = [at("2024-01-01T00:00:00[UTC]"), at("2031-06-15T12:00:00[UTC]")];

        for frequency in [Frequency::PerUse, Frequency::AsNeeded, Frequency::Other] {
            for epoch in epochs {
                for now in &nows {
                    assert!(!is_overdue(frequency, Some(epoch), &history, now).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_weekly_monthly_quarterly_yearly_units() {
        let epoch = Some(ts("2024-01-31T09:00:00Z"));
        let history = MaintenanceHistory::new();

        let cases = [
            (Frequency::Weekly, "2024-02-07T00:00:00[UTC]", "2024-02-07T00:00:01[UTC]"),
            // Month arithmetic clamps Jan 31 + 1 month to Feb 29
            (Frequency::Monthly, "2024-02-29T00:00:00[UTC]", "2024-02-29T00:00:01[UTC]"),
            (Frequency::Quarterly, "2024-04-30T00:00:00[UTC]", "2024-04-30T00:00:01[UTC]"),
            (Frequency::Yearly, "2025-01-31T00:00:00[UTC]", "2025-01-31T00:00:01[UTC]"),
        ];

        for (frequency, on_boundary, after_boundary) in cases {
            assert!(
                !is_overdue(frequency, epoch, &history, &at(on_boundary)).unwrap(),
                "{frequency} overdue on its boundary"
            );
            assert!(
                is_overdue(frequency, epoch, &history, &at(after_boundary)).unwrap(),
                "{frequency} not overdue after its boundary"
            );
        }
    }

    #[test]
    fn test_boundary_follows_evaluation_time_zone() {
        // 2024-01-01T03:00Z is still Dec 31 at UTC-5
        let epoch = Some(ts("2024-01-01T03:00:00Z"));
        let history = MaintenanceHistory::new();

        let now = at("2024-01-01T00:30:00-05:00[-05:00]");
        assert!(is_overdue(Frequency::Daily, epoch, &history, &now).unwrap());
    }
}
