use std::fmt;

use chrono::TimeDelta;

use crate::data::TripTable;
use crate::stats::format_seconds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub trips: usize,
    /// Seconds.
    pub total: f64,
    /// Seconds.
    pub mean: f64,
}

/// Total and mean over the trips that have a duration. Blank cells are left out
/// of both the sum and the count; with nothing left there is no mean, so `None`.
pub fn duration_stats(table: &TripTable) -> Option<DurationStats> {
    let durations: Vec<f64> = table.rows.iter().filter_map(|r| r.trip_duration).collect();
    if durations.is_empty() {
        return None;
    }
    let total: f64 = durations.iter().sum();
    let trips = durations.len();
    Some(DurationStats {
        trips,
        total,
        mean: total / trips as f64,
    })
}

/// `1d 02:03:04` style rendering of a second count, or `None` when the count
/// is past what `TimeDelta` can hold.
fn humanize(secs: f64) -> Option<String> {
    if !secs.is_finite() {
        return None;
    }
    let d = TimeDelta::try_seconds(secs.round() as i64)?;
    Some(format!(
        "{}d {:02}:{:02}:{:02}",
        d.num_days(),
        d.num_hours() % 24,
        d.num_minutes() % 60,
        d.num_seconds() % 60
    ))
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total travel time: {} seconds", format_seconds(self.total))?;
        if let Some(human) = humanize(self.total) {
            write!(f, " ({human})")?;
        }
        write!(f, "\nMean travel time: {} seconds", format_seconds(self.mean))
    }
}
