use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Instant,
};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::data::date_parser::{clean_str, parse_number, parse_start_time};
use crate::data::{City, TripRecord, TripTable};
use crate::error::LoadError;

/// Load the dataset mapped to `city` in `config`.
#[instrument(level = "info", skip(config))]
pub fn load_city(config: &Config, city: City) -> Result<TripTable, LoadError> {
    let path = config.path_for(city).ok_or(LoadError::UnknownCity(city))?;
    load_table(&path)
}

/// Read a trip CSV into memory.
///
/// Header names are matched after trimming, lowercasing and turning spaces into
/// underscores, so `Start Time` and `start_time` are the same column.
pub fn load_table(path: &Path) -> Result<TripTable, LoadError> {
    let start = Instant::now();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    // short rows read as blank trailing cells
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| clean_str(h).to_string())
        .collect();
    let columns = Columns::locate(&headers, path)?;
    debug!(?columns, "resolved columns");

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(columns.parse_row(&record, path)?);
    }

    info!(
        path = %path.display(),
        rows = rows.len(),
        elapsed = ?start.elapsed(),
        "loaded trips"
    );
    Ok(TripTable {
        headers,
        has_gender: columns.gender.is_some(),
        has_birth_year: columns.birth_year.is_some(),
        rows,
    })
}

fn normalize(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Column positions within the source header.
#[derive(Debug)]
struct Columns {
    start_time: usize,
    start_station: usize,
    end_station: usize,
    trip_duration: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn locate(headers: &[String], path: &Path) -> Result<Self, LoadError> {
        let names: Vec<String> = headers.iter().map(|h| normalize(h)).collect();
        let find = |name: &str| names.iter().position(|n| n == name);
        let require = |name: &'static str| {
            find(name).ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
            })
        };

        Ok(Self {
            start_time: require("start_time")?,
            start_station: require("start_station")?,
            end_station: require("end_station")?,
            trip_duration: require("trip_duration")?,
            user_type: require("user_type")?,
            gender: find("gender"),
            birth_year: find("birth_year"),
        })
    }

    fn parse_row(&self, record: &StringRecord, path: &Path) -> Result<TripRecord, LoadError> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let cell = |idx: usize| clean_str(record.get(idx).unwrap_or_default());
        let optional = |idx: Option<usize>| {
            idx.map(cell)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let bad_number = |idx: usize, column: &'static str| LoadError::BadNumber {
            path: PathBuf::from(path),
            line,
            column,
            value: cell(idx).to_string(),
        };
        let number = |idx: usize, column: &'static str| match parse_number(cell(idx)) {
            Ok(Some(v)) if !v.is_finite() => Err(bad_number(idx, column)),
            Ok(v) => Ok(v),
            Err(_) => Err(bad_number(idx, column)),
        };

        let raw_start = cell(self.start_time);
        let start_time = parse_start_time(raw_start).ok_or_else(|| LoadError::BadTimestamp {
            path: path.to_path_buf(),
            line,
            value: raw_start.to_string(),
        })?;

        let trip_duration = number(self.trip_duration, "trip_duration")?;
        if trip_duration.is_none() {
            warn!(path = %path.display(), line, "blank trip duration, left out of duration stats");
        }

        let birth_year = match self.birth_year {
            Some(idx) => match number(idx, "birth_year")? {
                Some(y) if y.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(&y) => {
                    Some(y as i32)
                }
                Some(_) => return Err(bad_number(idx, "birth_year")),
                None => None,
            },
            None => None,
        };

        Ok(TripRecord {
            start_time,
            start_station: cell(self.start_station).to_string(),
            end_station: cell(self.end_station).to_string(),
            trip_duration,
            user_type: optional(Some(self.user_type)),
            gender: optional(self.gender),
            birth_year,
            fields: record.iter().map(|f| clean_str(f).to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::{Month, Weekday};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    const CHICAGO: &str = ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,,
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,Female,1981.0
";

    const WASHINGTON: &str = ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    fn write_csv(content: &str) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(content.as_bytes())?;
        Ok(tmp)
    }

    #[test]
    fn loads_rows_in_file_order() -> Result<()> {
        let tmp = write_csv(CHICAGO)?;
        let table = load_table(tmp.path())?;

        assert_eq!(table.len(), 3);
        assert!(table.has_gender);
        assert!(table.has_birth_year);
        assert_eq!(table.headers[0], "");
        assert_eq!(table.headers[1], "Start Time");

        let first = &table.rows[0];
        assert_eq!(first.month(), Month::June);
        assert_eq!(first.weekday(), Weekday::Fri);
        assert_eq!(first.hour(), 15);
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.trip_duration, Some(321.0));
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        assert_eq!(first.fields.len(), 9);

        let second = &table.rows[1];
        assert_eq!(second.gender, None);
        assert_eq!(second.birth_year, None);
        assert_eq!(table.rows[2].user_type.as_deref(), Some("Customer"));
        Ok(())
    }

    #[test]
    fn optional_columns_are_a_dataset_property() -> Result<()> {
        let tmp = write_csv(WASHINGTON)?;
        let table = load_table(tmp.path())?;
        assert!(!table.has_gender);
        assert!(!table.has_birth_year);
        assert_eq!(table.rows[0].trip_duration, Some(489.066));
        Ok(())
    }

    #[test]
    fn snake_case_headers_are_accepted() -> Result<()> {
        let tmp = write_csv(
            "start_time,start_station,end_station,trip_duration,user_type\n\
             2017-01-01 09:00,A,B,300,Subscriber\n",
        )?;
        let table = load_table(tmp.path())?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].end_station, "B");
        Ok(())
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let err = load_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn missing_required_column_is_reported() -> Result<()> {
        let tmp = write_csv("Start Time,Start Station,Trip Duration,User Type\n")?;
        let err = load_table(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "end_station",
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn bad_cells_carry_their_line() -> Result<()> {
        let tmp = write_csv(
            "Start Time,Start Station,End Station,Trip Duration,User Type\n\
             2017-01-01 09:00,A,B,300,Subscriber\n\
             yesterday,A,B,300,Subscriber\n",
        )?;
        match load_table(tmp.path()).unwrap_err() {
            LoadError::BadTimestamp { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error {other}"),
        }

        let tmp = write_csv(
            "Start Time,Start Station,End Station,Trip Duration,User Type\n\
             2017-01-01 09:00,A,B,long,Subscriber\n",
        )?;
        assert!(matches!(
            load_table(tmp.path()).unwrap_err(),
            LoadError::BadNumber {
                column: "trip_duration",
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn load_city_uses_configured_path() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join("dc.csv"), WASHINGTON)?;
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            cities: HashMap::from([(City::Washington, PathBuf::from("dc.csv"))]),
            ..Config::default()
        };

        assert_eq!(load_city(&config, City::Washington)?.len(), 1);
        assert!(matches!(
            load_city(&config, City::Chicago).unwrap_err(),
            LoadError::UnknownCity(City::Chicago)
        ));
        Ok(())
    }

    #[test]
    fn short_rows_read_as_blank_trailing_cells() -> Result<()> {
        let tmp = write_csv(
            "Start Time,Start Station,End Station,Trip Duration,User Type,Gender,Birth Year\n\
             2017-01-01 09:00,A,B,300,Subscriber,Male,1990\n\
             2017-01-01 09:15,A,B,600,Customer\n",
        )?;
        let table = load_table(tmp.path())?;
        assert_eq!(table.len(), 2);
        let short = &table.rows[1];
        assert_eq!(short.user_type.as_deref(), Some("Customer"));
        assert_eq!(short.gender, None);
        assert_eq!(short.birth_year, None);
        Ok(())
    }

    #[test]
    fn blank_duration_keeps_the_row() -> Result<()> {
        let tmp = write_csv(
            "Start Time,Start Station,End Station,Trip Duration,User Type\n\
             2017-01-01 09:00,A,B,300,Subscriber\n\
             2017-01-01 09:15,C,D,,Subscriber\n",
        )?;
        let table = load_table(tmp.path())?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].trip_duration, None);
        assert_eq!(table.rows[1].start_station, "C");
        Ok(())
    }

    #[test]
    fn non_finite_duration_is_rejected() -> Result<()> {
        for value in ["inf", "-Infinity"] {
            let tmp = write_csv(&format!(
                "Start Time,Start Station,End Station,Trip Duration,User Type\n\
                 2017-01-01 09:00,A,B,{value},Subscriber\n"
            ))?;
            match load_table(tmp.path()).unwrap_err() {
                LoadError::BadNumber { line, column, value: cell, .. } => {
                    assert_eq!(line, 2);
                    assert_eq!(column, "trip_duration");
                    assert_eq!(cell, value);
                }
                other => panic!("unexpected error {other}"),
            }
        }
        Ok(())
    }

    #[test]
    fn birth_year_must_be_a_whole_year() -> Result<()> {
        for value in ["1992.7", "1e12"] {
            let tmp = write_csv(&format!(
                "Start Time,Start Station,End Station,Trip Duration,User Type,Birth Year\n\
                 2017-01-01 09:00,A,B,300,Subscriber,{value}\n"
            ))?;
            assert!(matches!(
                load_table(tmp.path()).unwrap_err(),
                LoadError::BadNumber {
                    column: "birth_year",
                    ..
                }
            ));
        }
        Ok(())
    }
}
