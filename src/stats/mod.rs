pub mod duration;
pub mod station;
pub mod tally;
pub mod time;
pub mod user;

use std::{
    fmt::Display,
    io::{self, Write},
    time::Instant,
};

use tracing::debug;

use crate::data::TripTable;

pub use duration::{duration_stats, DurationStats};
pub use station::{station_stats, StationStats};
pub use tally::Tally;
pub use time::{time_stats, TimeStats};
pub use user::{user_stats, BirthYears, UserStats};

pub const SEPARATOR: &str = "----------------------------------------";
pub const NO_DATA: &str = "No data available for the selected filters.";

/// Run the four aggregators in order (time, station, duration, user) and print each section.
pub fn write_report<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    section(
        out,
        "Calculating The Most Frequent Times of Travel...",
        || time_stats(table),
    )?;
    section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        || station_stats(table),
    )?;
    section(out, "Calculating Trip Duration...", || duration_stats(table))?;
    section(out, "Calculating User Stats...", || user_stats(table))
}

fn section<W, T, F>(out: &mut W, title: &str, compute: F) -> io::Result<()>
where
    W: Write,
    T: Display,
    F: FnOnce() -> Option<T>,
{
    writeln!(out, "\n{title}\n")?;
    let start = Instant::now();
    match compute() {
        Some(stats) => writeln!(out, "{stats}")?,
        None => writeln!(out, "{NO_DATA}")?,
    }
    let elapsed = start.elapsed();
    debug!(section = title, ?elapsed, "computed");
    writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{SEPARATOR}")
}

/// Seconds without a trailing `.0` for whole numbers.
pub(crate) fn format_seconds(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{secs:.0}")
    } else {
        format!("{secs:.2}")
    }
}
