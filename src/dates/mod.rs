//! Date handling: strict/fuzzy parsing and offset-aware scanning.

pub mod parse;
pub mod scan;

pub use parse::{parse_date_fuzzy, parse_date_strict, SPANISH_MONTHS};
pub use scan::{first_date, scan_dates, DateMatch};
