pub mod date_parser;
pub mod filter;
pub mod load;

use std::fmt;

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

pub use filter::FilterSelection;
pub use load::load_city;

/// Cities with a bikeshare dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// Default CSV file name for the city's dataset.
    pub fn default_file(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Case-insensitive lookup by display name, snake_case key or the short "New York" alias.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "chicago" => Some(City::Chicago),
            "new york city" | "new_york_city" | "new york" => Some(City::NewYorkCity),
            "washington" => Some(City::Washington),
            _ => None,
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trip, with the typed fields the statistics need plus every raw cell of its row.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    /// Seconds; `None` when the cell is blank.
    pub trip_duration: Option<f64>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// Cells in source column order, aligned with [`TripTable::headers`].
    pub fields: Vec<String>,
}

impl TripRecord {
    pub fn month(&self) -> Month {
        date_parser::month_of(&self.start_time)
    }

    pub fn weekday(&self) -> Weekday {
        self.start_time.weekday()
    }

    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }
}

/// An ordered, immutable table of trips for one city.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripTable {
    /// Header cells exactly as they appear in the source file.
    pub headers: Vec<String>,
    /// Whether the dataset carries a gender column at all.
    pub has_gender: bool,
    /// Whether the dataset carries a birth year column at all.
    pub has_birth_year: bool,
    pub rows: Vec<TripRecord>,
}

impl TripTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Same columns, different rows.
    pub(crate) fn with_rows(&self, rows: Vec<TripRecord>) -> Self {
        Self {
            headers: self.headers.clone(),
            has_gender: self.has_gender,
            has_birth_year: self.has_birth_year,
            rows,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a record from a `YYYY-MM-DD HH:MM` start time.
    pub fn trip(start: &str, from: &str, to: &str, secs: f64) -> TripRecord {
        let start_time = date_parser::parse_start_time(start).expect("valid fixture timestamp");
        TripRecord {
            start_time,
            start_station: from.to_string(),
            end_station: to.to_string(),
            trip_duration: Some(secs),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
            fields: vec![
                start.to_string(),
                from.to_string(),
                to.to_string(),
                secs.to_string(),
            ],
        }
    }

    pub fn table(rows: Vec<TripRecord>) -> TripTable {
        TripTable {
            headers: vec![
                "Start Time".to_string(),
                "Start Station".to_string(),
                "End Station".to_string(),
                "Trip Duration".to_string(),
            ],
            has_gender: false,
            has_birth_year: false,
            rows,
        }
    }
}
