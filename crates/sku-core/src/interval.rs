//! Converting the SKU log into labelled time spans.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::event::LogEvent;

/// The span during which one SKU was current.
///
/// Both bounds are inclusive. An interval ends exactly where the next one
/// begins, so a timestamp on a boundary lies in two intervals; matching takes
/// the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub label: String,
    pub stem: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    /// Whether `instant` lies within the interval, bounds included.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Builds intervals from log events ordered oldest first.
///
/// Every non-END event opens an interval that closes at the timestamp of the
/// following event, END or not. The last event, if it is not an END marker,
/// stays open until `now`. END markers never open an interval.
pub fn build_intervals(events: &[LogEvent], now: NaiveDateTime) -> Vec<Interval> {
    events
        .iter()
        .enumerate()
        .filter(|(_, event)| !event.is_end())
        .map(|(i, event)| {
            let end = events.get(i + 1).map_or(now, |next| next.timestamp);
            Interval {
                label: event.label.clone(),
                stem: event.stem.clone(),
                start: event.timestamp,
                end,
            }
        })
        .collect()
}
