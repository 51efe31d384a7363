use std::fmt;

use crate::data::TripTable;
use crate::stats::Tally;

/// Birth year summary. Absence of the column is a reduced-output mode, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthYears {
    /// The dataset has no birth year column.
    Unavailable,
    /// The column exists but every selected row is blank.
    NoData,
    Summary {
        earliest: i32,
        latest: i32,
        most_common: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// Count per user type, highest first.
    pub user_types: Vec<(String, usize)>,
    /// Count per gender, highest first; `None` when the dataset has no gender column.
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: BirthYears,
}

pub fn user_stats(table: &TripTable) -> Option<UserStats> {
    if table.is_empty() {
        return None;
    }

    let user_types: Tally<&str> = table
        .rows
        .iter()
        .filter_map(|r| r.user_type.as_deref())
        .collect();

    let genders = table.has_gender.then(|| {
        table
            .rows
            .iter()
            .filter_map(|r| r.gender.as_deref())
            .collect::<Tally<&str>>()
    });

    let birth_years = if table.has_birth_year {
        let years: Vec<i32> = table.rows.iter().filter_map(|r| r.birth_year).collect();
        let tally: Tally<i32> = years.iter().copied().collect();
        match (years.iter().min(), years.iter().max(), tally.mode()) {
            (Some(&earliest), Some(&latest), Some(most_common)) => BirthYears::Summary {
                earliest,
                latest,
                most_common,
            },
            _ => BirthYears::NoData,
        }
    } else {
        BirthYears::Unavailable
    };

    Some(UserStats {
        user_types: owned(&user_types),
        genders: genders.as_ref().map(owned),
        birth_years,
    })
}

fn owned(tally: &Tally<&str>) -> Vec<(String, usize)> {
    tally
        .ranked()
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect()
}

fn write_counts(f: &mut fmt::Formatter<'_>, counts: &[(String, usize)]) -> fmt::Result {
    if counts.is_empty() {
        return writeln!(f, "  (no data)");
    }
    for (name, n) in counts {
        writeln!(f, "  {name}: {n}")?;
    }
    Ok(())
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "By user type:")?;
        write_counts(f, &self.user_types)?;
        writeln!(f)?;

        match &self.genders {
            Some(genders) => {
                writeln!(f, "By gender:")?;
                write_counts(f, genders)?;
                writeln!(f)?;
            }
            None => writeln!(f, "No gender stats available")?,
        }

        match self.birth_years {
            BirthYears::Unavailable => write!(f, "No birth year stats available"),
            BirthYears::NoData => write!(f, "No birth year data for the selected filters"),
            BirthYears::Summary {
                earliest,
                latest,
                most_common,
            } => {
                writeln!(f, "Earliest birth year: {earliest}")?;
                writeln!(f, "Most recent birth year: {latest}")?;
                write!(f, "Most common birth year: {most_common}")
            }
        }
    }
}
