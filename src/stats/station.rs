use std::fmt;

use crate::data::TripTable;
use crate::stats::Tally;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    /// `"start -> end"`
    pub trip: String,
}

/// Most common start station, end station and start/end pair.
pub fn station_stats(table: &TripTable) -> Option<StationStats> {
    let mut starts = Tally::new();
    let mut ends = Tally::new();
    let mut trips = Tally::new();
    for row in &table.rows {
        starts.add(row.start_station.as_str());
        ends.add(row.end_station.as_str());
        trips.add(format!("{} -> {}", row.start_station, row.end_station));
    }

    Some(StationStats {
        start_station: starts.mode()?.to_string(),
        end_station: ends.mode()?.to_string(),
        trip: trips.mode()?,
    })
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most common start station: {}", self.start_station)?;
        writeln!(f, "Most common end station: {}", self.end_station)?;
        write!(f, "Most common trip (start -> end): {}", self.trip)
    }
}
