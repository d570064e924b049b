//! Period calculator: maps a frequency and a reference instant onto the
//! compliance period containing it, that period's deadline and the start of
//! the next one.
//!
//! Every function takes the evaluation instant as a [`Zoned`] and does all of
//! its calendar arithmetic in that value's time zone. Callers evaluate one
//! request against a single `now` so that a checklist view cannot straddle a
//! midnight, week or quarter boundary.

use jiff::{civil::Date, tz::TimeZone, ToSpan, Zoned};

use crate::{
    error::Result,
    models::{Frequency, PeriodId},
};

/// Days until the rolling deadline of the `Other` bucket.
const OTHER_ROLLING_DAYS: i64 = 7;

/// Identifier of the period of `frequency` containing `now`.
///
/// Per-use and as-needed ids include the hour and minute so that each use
/// gets its own slot; the `Other` bucket has the single period `"other"`.
///
/// ```rust
/// use jiff::Zoned;
/// use upkeep_core::{models::Frequency, schedule::period};
///
/// let now: Zoned = "2024-02-14T09:30:00[UTC]".parse().unwrap();
/// assert_eq!(period::period(Frequency::Weekly, &now).unwrap().as_str(), "2024-02-11_week");
/// assert_eq!(period::period(Frequency::Quarterly, &now).unwrap().as_str(), "2024_Q1");
/// ```
pub fn period(frequency: Frequency, now: &Zoned) -> Result<PeriodId> {
    let date = now.date();
    let id = match frequency {
        Frequency::PerUse => format!("{date}_use_{}_{}", now.hour(), now.minute()),
        Frequency::Daily => date.to_string(),
        Frequency::Weekly => format!("{}_week", week_start(date)?),
        Frequency::Monthly => format!("{:04}-{:02}_month", date.year(), date.month()),
        Frequency::Quarterly => format!("{:04}_Q{}", date.year(), quarter_of(date)),
        Frequency::Yearly => format!("{:04}_year", date.year()),
        Frequency::AsNeeded => format!("{date}_asneeded_{}_{}", now.hour(), now.minute()),
        Frequency::Other => "other".to_string(),
    };
    Ok(PeriodId(id))
}

/// First instant of the period following the one containing `now`.
///
/// Per-use periods start again immediately; as-needed tasks have no next
/// period.
pub fn next_period_start(frequency: Frequency, now: &Zoned) -> Result<Option<Zoned>> {
    let date = now.date();
    let tz = now.time_zone();
    let start = match frequency {
        Frequency::PerUse => return Ok(Some(now.clone())),
        Frequency::AsNeeded => return Ok(None),
        Frequency::Daily => date.tomorrow()?,
        Frequency::Weekly => week_start(date)?.checked_add(7.days())?,
        Frequency::Monthly => date.first_of_month().checked_add(1.month())?,
        Frequency::Quarterly => quarter_start(date)?.checked_add(3.months())?,
        Frequency::Yearly => date.first_of_year().checked_add(1.year())?,
        Frequency::Other => date.checked_add(OTHER_ROLLING_DAYS.days())?,
    };
    Ok(Some(start_of_day(start, tz)?))
}

/// Last instant (23:59:59.999) of the period containing `now`.
///
/// Per-use tasks are due by the end of the current day; as-needed tasks have
/// no deadline.
pub fn deadline(frequency: Frequency, now: &Zoned) -> Result<Option<Zoned>> {
    let date = now.date();
    let tz = now.time_zone();
    let last_day = match frequency {
        Frequency::AsNeeded => return Ok(None),
        Frequency::PerUse | Frequency::Daily => date,
        Frequency::Weekly => week_start(date)?.checked_add(6.days())?,
        Frequency::Monthly => date.last_of_month(),
        Frequency::Quarterly => quarter_start(date)?.checked_add(3.months())?.yesterday()?,
        Frequency::Yearly => date.last_of_year(),
        Frequency::Other => date.checked_add(OTHER_ROLLING_DAYS.days())?,
    };
    Ok(Some(end_of_day(last_day, tz)?))
}

/// The Sunday on or before `date`.
pub fn week_start(date: Date) -> Result<Date> {
    let offset = i64::from(date.weekday().to_sunday_zero_offset());
    Ok(date.checked_sub(offset.days())?)
}

/// Quarter number (1-4) of `date`.
pub fn quarter_of(date: Date) -> i8 {
    (date.month() - 1) / 3 + 1
}

/// First day of the quarter containing `date`.
pub fn quarter_start(date: Date) -> Result<Date> {
    let first_month = (quarter_of(date) - 1) * 3 + 1;
    Ok(Date::new(date.year(), first_month, 1)?)
}

/// Midnight at the start of `date` in `tz`.
pub(crate) fn start_of_day(date: Date, tz: &TimeZone) -> Result<Zoned> {
    Ok(date.to_zoned(tz.clone())?)
}

/// 23:59:59.999 on `date` in `tz`.
pub(crate) fn end_of_day(date: Date, tz: &TimeZone) -> Result<Zoned> {
    Ok(date.at(23, 59, 59, 999_000_000).to_zoned(tz.clone())?)
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Zoned};

    use super::*;

    fn at(s: &str) -> Zoned {
        s.parse().expect("valid zoned datetime")
    }

    #[test]
    fn test_daily_period() {
        let now = at("2024-03-05T14:20:00[UTC]");
        assert_eq!(period(Frequency::Daily, &now).unwrap().as_str(), "2024-03-05");
        assert_eq!(
            deadline(Frequency::Daily, &now).unwrap().unwrap(),
            at("2024-03-05T23:59:59.999[UTC]")
        );
        assert_eq!(
            next_period_start(Frequency::Daily, &now).unwrap().unwrap(),
            at("2024-03-06T00:00:00[UTC]")
        );
    }

    #[test]
    fn test_weekly_period_starts_sunday() {
        // 2024-01-10 is a Wednesday
        let now = at("2024-01-10T08:00:00[UTC]");
        assert_eq!(period(Frequency::Weekly, &now).unwrap().as_str(), "2024-01-07_week");
        assert_eq!(
            deadline(Frequency::Weekly, &now).unwrap().unwrap(),
            at("2024-01-13T23:59:59.999[UTC]")
        );
        assert_eq!(
            next_period_start(Frequency::Weekly, &now).unwrap().unwrap(),
            at("2024-01-14T00:00:00[UTC]")
        );
    }

    #[test]
    fn test_weekly_period_on_sunday_and_saturday() {
        let sunday = at("2024-01-07T00:00:00[UTC]");
        let saturday = at("2024-01-13T23:59:59[UTC]");
        assert_eq!(
            period(Frequency::Weekly, &sunday).unwrap(),
            period(Frequency::Weekly, &saturday).unwrap()
        );
    }

    #[test]
    fn test_weekly_period_across_year_boundary() {
        // 2025-01-01 is a Wednesday; its week began on 2024-12-29
        let now = at("2025-01-01T12:00:00[UTC]");
        assert_eq!(period(Frequency::Weekly, &now).unwrap().as_str(), "2024-12-29_week");
        assert_eq!(
            deadline(Frequency::Weekly, &now).unwrap().unwrap(),
            at("2025-01-04T23:59:59.999[UTC]")
        );
    }

    #[test]
    fn test_monthly_period_leap_february() {
        let now = at("2024-02-10T10:00:00[UTC]");
        assert_eq!(period(Frequency::Monthly, &now).unwrap().as_str(), "2024-02_month");
        assert_eq!(
            deadline(Frequency::Monthly, &now).unwrap().unwrap(),
            at("2024-02-29T23:59:59.999[UTC]")
        );
        assert_eq!(
            next_period_start(Frequency::Monthly, &now).unwrap().unwrap(),
            at("2024-03-01T00:00:00[UTC]")
        );
    }

    #[test]
    fn test_monthly_next_period_in_december() {
        let now = at("2024-12-31T23:00:00[UTC]");
        assert_eq!(
            next_period_start(Frequency::Monthly, &now).unwrap().unwrap(),
            at("2025-01-01T00:00:00[UTC]")
        );
    }

    #[test]
    fn test_quarterly_periods() {
        let cases = [
            ("2024-01-01T00:00:00[UTC]", "2024_Q1", "2024-03-31T23:59:59.999[UTC]"),
            ("2024-05-15T00:00:00[UTC]", "2024_Q2", "2024-06-30T23:59:59.999[UTC]"),
            ("2024-09-30T23:59:00[UTC]", "2024_Q3", "2024-09-30T23:59:59.999[UTC]"),
            ("2024-10-01T00:00:00[UTC]", "2024_Q4", "2024-12-31T23:59:59.999[UTC]"),
        ];

        for (now, expected_period, expected_deadline) in cases {
            let now = at(now);
            assert_eq!(period(Frequency::Quarterly, &now).unwrap().as_str(), expected_period);
            assert_eq!(
                deadline(Frequency::Quarterly, &now).unwrap().unwrap(),
                at(expected_deadline)
            );
        }

        let q4 = at("2024-11-20T00:00:00[UTC]");
        assert_eq!(
            next_period_start(Frequency::Quarterly, &q4).unwrap().unwrap(),
            at("2025-01-01T00:00:00[UTC]")
        );
    }

    #[test]
    fn test_yearly_period() {
        let now = at("2024-06-01T00:00:00[UTC]");
        assert_eq!(period(Frequency::Yearly, &now).unwrap().as_str(), "2024_year");
        assert_eq!(
            deadline(Frequency::Yearly, &now).unwrap().unwrap(),
            at("2024-12-31T23:59:59.999[UTC]")
        );
        assert_eq!(
            next_period_start(Frequency::Yearly, &now).unwrap().unwrap(),
            at("2025-01-01T00:00:00[UTC]")
        );
    }

    #[test]
    fn test_per_use_and_as_needed() {
        let now = at("2024-03-05T14:07:00[UTC]");
        assert_eq!(period(Frequency::PerUse, &now).unwrap().as_str(), "2024-03-05_use_14_7");
        assert_eq!(
            period(Frequency::AsNeeded, &now).unwrap().as_str(),
            "2024-03-05_asneeded_14_7"
        );
        assert_eq!(next_period_start(Frequency::PerUse, &now).unwrap(), Some(now.clone()));
        assert_eq!(
            deadline(Frequency::PerUse, &now).unwrap().unwrap(),
            at("2024-03-05T23:59:59.999[UTC]")
        );
        assert_eq!(next_period_start(Frequency::AsNeeded, &now).unwrap(), None);
        assert_eq!(deadline(Frequency::AsNeeded, &now).unwrap(), None);
    }

    #[test]
    fn test_other_rolling_deadline() {
        let now = at("2024-03-05T14:07:00[UTC]");
        assert_eq!(period(Frequency::Other, &now).unwrap().as_str(), "other");
        assert_eq!(
            deadline(Frequency::Other, &now).unwrap().unwrap(),
            at("2024-03-12T23:59:59.999[UTC]")
        );
        assert_eq!(
            next_period_start(Frequency::Other, &now).unwrap().unwrap(),
            at("2024-03-12T00:00:00[UTC]")
        );
    }

    #[test]
    fn test_period_uses_local_wall_clock() {
        // 23:30 at UTC-4 is already the next day (and quarter) in UTC
        let now = at("2024-03-31T23:30:00-04:00[-04:00]");
        assert_eq!(period(Frequency::Daily, &now).unwrap().as_str(), "2024-03-31");
        assert_eq!(period(Frequency::Quarterly, &now).unwrap().as_str(), "2024_Q1");
        assert_eq!(
            deadline(Frequency::Daily, &now).unwrap().unwrap(),
            at("2024-03-31T23:59:59.999-04:00[-04:00]")
        );
    }

    #[test]
    fn test_period_is_constant_within_period() {
        let frequencies = [
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::Yearly,
            Frequency::Other,
        ];
        let earlier = at("2024-04-07T00:00:00[UTC]");
        let later = at("2024-04-07T23:59:59.999[UTC]");

        for frequency in frequencies {
            assert_eq!(
                period(frequency, &earlier).unwrap(),
                period(frequency, &later).unwrap(),
                "{frequency} period changed within a day"
            );
        }
    }

    #[test]
    fn test_helpers() {
        assert_eq!(week_start(date(2024, 1, 7)).unwrap(), date(2024, 1, 7));
        assert_eq!(week_start(date(2024, 1, 13)).unwrap(), date(2024, 1, 7));
        assert_eq!(quarter_of(date(2024, 3, 31)), 1);
        assert_eq!(quarter_of(date(2024, 12, 1)), 4);
        assert_eq!(quarter_start(date(2024, 8, 19)).unwrap(), date(2024, 7, 1));
    }
}
