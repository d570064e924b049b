//! Countdown formatting for checklist deadlines.

use std::fmt;

use jiff::Timestamp;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Time left until a deadline, as shown next to a checklist.
///
/// Only the two most significant units are shown:
///
/// ```rust
/// use jiff::Timestamp;
/// use upkeep_core::display::TimeRemaining;
///
/// let now: Timestamp = "2024-03-05T10:00:00Z".parse().unwrap();
/// let deadline: Timestamp = "2024-03-07T13:30:00Z".parse().unwrap();
/// assert_eq!(TimeRemaining::new(Some(deadline), now).to_string(), "2d 3h remaining");
/// assert_eq!(TimeRemaining::new(None, now).to_string(), "No deadline");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    deadline: Option<Timestamp>,
    now: Timestamp,
}

impl TimeRemaining {
    pub fn new(deadline: Option<Timestamp>, now: Timestamp) -> Self {
        Self { deadline, now }
    }

    /// Whether the deadline has passed.
    pub fn is_past(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| deadline.as_millisecond() < self.now.as_millisecond())
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(deadline) = self.deadline else {
            return f.write_str("No deadline");
        };
        if self.is_past() {
            return f.write_str("OVERDUE");
        }

        let total = (deadline.as_millisecond() - self.now.as_millisecond()) / 1000;
        let days = total / SECONDS_PER_DAY;
        let hours = total % SECONDS_PER_DAY / SECONDS_PER_HOUR;
        let minutes = total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
        let seconds = total % SECONDS_PER_MINUTE;

        if days > 0 {
            write!(f, "{days}d {hours}h remaining")
        } else if hours > 0 {
            write!(f, "{hours}h {minutes}m remaining")
        } else {
            write!(f, "{minutes}m {seconds}s remaining")
        }
    }
}
