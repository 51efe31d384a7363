use std::num::ParseFloatError;

use chrono::{Datelike, Month, NaiveDateTime, Weekday};

const LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Parse a trip start time such as `"2017-01-01 09:07:57"`.
pub fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
}

pub fn month_of(dt: &NaiveDateTime) -> Month {
    MONTHS[dt.month0() as usize]
}

/// Full English weekday name, e.g. `"Sunday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Case-insensitive full month name.
pub fn month_from_name(s: &str) -> Option<Month> {
    let s = s.trim();
    MONTHS
        .into_iter()
        .find(|m| m.name().eq_ignore_ascii_case(s))
}

/// Case-insensitive full weekday name.
pub fn weekday_from_name(s: &str) -> Option<Weekday> {
    let s = s.trim();
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .find(|d| weekday_name(*d).eq_ignore_ascii_case(s))
}

/// Trim whitespace and strip one layer of outer quotes.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Numeric cell → f64; blank cells are `None`.
pub fn parse_number(raw: &str) -> Result<Option<f64>, ParseFloatError> {
    let c = clean_str(raw);
    if c.is_empty() || c.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    c.parse::<f64>().map(Some)
}
