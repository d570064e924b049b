//! DateTime display utilities.
//!
//! Wrapper types for formatting instants in a consistent, human-readable
//! format.

use std::fmt;

use jiff::{Timestamp, Zoned, tz::TimeZone};

/// A wrapper around `Timestamp` that formats it in the system time zone.
///
/// The display format follows the pattern `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A wrapper around `Zoned` that formats it in its own time zone, to the
/// minute.
///
/// Deadlines and period starts are computed in the evaluation time zone and
/// are shown in it as well.
pub struct WallClock<'a>(pub &'a Zoned);

impl fmt::Display for WallClock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%Y-%m-%d %H:%M"))
    }
}
