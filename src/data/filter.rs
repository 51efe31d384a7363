use std::fmt;

use chrono::{Month, Weekday};
use tracing::info;

use crate::data::date_parser::weekday_name;
use crate::data::{City, TripTable};

/// A validated (city, month, day) choice. `None` means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl FilterSelection {
    pub fn new(city: City, month: Option<Month>, day: Option<Weekday>) -> Self {
        Self { city, month, day }
    }

    /// Narrow `table` to the rows matching this selection, keeping their order.
    pub fn apply(&self, table: &TripTable) -> TripTable {
        let filtered = filter_by_day(&filter_by_month(table, self.month), self.day);
        info!(
            selection = %self,
            kept = filtered.len(),
            total = table.len(),
            "filtered trips"
        );
        filtered
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map(|m| m.name()).unwrap_or("all");
        let day = self.day.map(weekday_name).unwrap_or("all");
        write!(f, "{} / {} / {}", self.city, month, day)
    }
}

pub fn filter_by_month(table: &TripTable, month: Option<Month>) -> TripTable {
    match month {
        Some(m) => table.with_rows(
            table
                .rows
                .iter()
                .filter(|r| r.month() == m)
                .cloned()
                .collect(),
        ),
        None => table.clone(),
    }
}

pub fn filter_by_day(table: &TripTable, day: Option<Weekday>) -> TripTable {
    match day {
        Some(d) => table.with_rows(
            table
                .rows
                .iter()
                .filter(|r| r.weekday() == d)
                .cloned()
                .collect(),
        ),
        None => table.clone(),
    }
}
