use std::fmt;

use chrono::{Month, Weekday};

use crate::data::{date_parser::weekday_name, TripTable};
use crate::stats::Tally;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStats {
    pub month: Month,
    pub day: Weekday,
    /// 0–23
    pub hour: u32,
}

/// Most common month, weekday and start hour, or `None` for an empty table.
pub fn time_stats(table: &TripTable) -> Option<TimeStats> {
    let mut months = Tally::new();
    let mut days = Tally::new();
    let mut hours = Tally::new();
    for row in &table.rows {
        months.add(row.month());
        days.add(row.weekday());
        hours.add(row.hour());
    }

    Some(TimeStats {
        month: months.mode()?,
        day: days.mode()?,
        hour: hours.mode()?,
    })
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most common month: {}", self.month.name())?;
        writeln!(f, "Most common day: {}", weekday_name(self.day))?;
        write!(f, "Most common start hour: {}", self.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{table, trip};

    #[test]
    fn two_sunday_morning_trips() {
        let t = table(vec![
            trip("2017-01-01 09:00", "A", "B", 300.0),
            trip("2017-01-01 09:15", "A", "B", 600.0),
        ]);
        let stats = time_stats(&t).unwrap();
        assert_eq!(
            stats,
            TimeStats {
                month: Month::January,
                day: Weekday::Sun,
                hour: 9
            }
        );
        assert_eq!(
            stats.to_string(),
            "Most common month: January\nMost common day: Sunday\nMost common start hour: 9"
        );
    }

    #[test]
    fn ties_pick_first_seen() {
        // one trip each in March (Wed, 17h) and February (Wed, 8h): March is seen first
        let t = table(vec![
            trip("2017-03-01 17:00", "A", "B", 1.0),
            trip("2017-02-01 08:00", "A", "B", 1.0),
        ]);
        let stats = time_stats(&t).unwrap();
        assert_eq!(stats.month, Month::March);
        assert_eq!(stats.day, Weekday::Wed);
        assert_eq!(stats.hour, 17);
    }

    #[test]
    fn empty_table_has_no_stats() {
        assert_eq!(time_stats(&table(vec![])), None);
    }
}
