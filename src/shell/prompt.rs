use chrono::{Month, Weekday};

use crate::data::{
    date_parser::{month_from_name, weekday_from_name},
    City,
};

/// A fixed menu the user picks from by typing an option name.
pub struct Prompt<T> {
    pub name: &'static str,
    pub options: &'static [&'static str],
    parse: fn(&str) -> Option<T>,
}

impl<T> Prompt<T> {
    /// Whitespace-trimmed, case-insensitive match against the menu.
    pub fn parse(&self, input: &str) -> Option<T> {
        (self.parse)(input.trim())
    }

    pub fn option_list(&self) -> String {
        self.options.join(", ")
    }

    pub fn question(&self) -> String {
        format!("Select a {} ({}):", self.name, self.option_list())
    }

    pub fn rejection(&self) -> String {
        format!(
            "The {} you entered is not correct. Remember, the options are {}. Select one of them:",
            self.name,
            self.option_list()
        )
    }
}

/// Months with trip data.
const MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

fn is_all(s: &str) -> bool {
    s.eq_ignore_ascii_case("all")
}

fn parse_month(s: &str) -> Option<Option<Month>> {
    if is_all(s) {
        return Some(None);
    }
    month_from_name(s).filter(|m| MONTHS.contains(m)).map(Some)
}

fn parse_day(s: &str) -> Option<Option<Weekday>> {
    if is_all(s) {
        return Some(None);
    }
    weekday_from_name(s).map(Some)
}

pub const CITY: Prompt<City> = Prompt {
    name: "city",
    options: &["Chicago", "New York City", "Washington"],
    parse: City::from_str,
};

pub const MONTH: Prompt<Option<Month>> = Prompt {
    name: "month",
    options: &["all", "January", "February", "March", "April", "May", "June"],
    parse: parse_month,
};

pub const DAY: Prompt<Option<Weekday>> = Prompt {
    name: "day",
    options: &[
        "all",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ],
    parse: parse_day,
};

/// Only an explicit "yes" counts as agreement.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}
