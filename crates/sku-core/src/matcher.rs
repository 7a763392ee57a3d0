//! Locating the interval that contains a file timestamp.

use chrono::NaiveDateTime;

use crate::interval::Interval;

/// Returns the first interval, in chronological order, containing `instant`.
///
/// Boundaries are inclusive, so an instant shared by two adjacent intervals
/// resolves to the earlier one.
pub fn find_interval(intervals: &[Interval], instant: NaiveDateTime) -> Option<&Interval> {
    intervals.iter().find(|interval| interval.contains(instant))
}
