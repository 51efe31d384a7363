pub mod config;
pub mod data;
pub mod error;
pub mod pager;
pub mod shell;
pub mod stats;

pub use config::Config;
pub use data::{City, FilterSelection, TripRecord, TripTable};
pub use error::LoadError;
pub use shell::Shell;
