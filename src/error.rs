//! Error types for loading trip data.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::City;

/// Why a city's trip data could not be made available.
#[derive(Error, Debug)]
pub enum LoadError {
    /// No file is mapped to the city in the configuration
    #[error("no data source configured for {0}")]
    UnknownCity(City),

    /// The file could not be opened
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid CSV
    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is not present in the header
    #[error("{} has no `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A start time cell could not be parsed
    #[error("{}:{line}: unparsable start time {value:?}", path.display())]
    BadTimestamp {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// A numeric cell could not be parsed
    #[error("{}:{line}: unparsable {column} {value:?}", path.display())]
    BadNumber {
        path: PathBuf,
        line: u64,
        column: &'static str,
        value: String,
    },
}
