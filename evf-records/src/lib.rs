//! Core record types and CSV parsing for EV fire statistics.
//!
//! Each dataset module defines a typed record struct, a `…Columns`
//! configuration mapping semantic fields to source header names (with
//! English defaults), and a parser that resolves the header row once and
//! then reads data rows in source order.
//!
//! # Datasets
//!
//! - [`fire`] - all vehicle fires (pre-whitelist)
//! - [`ev_fire`] - EV fires, the filterable dataset
//! - [`charger`] - one row per public charging station
//! - [`registration`] - per-year registration totals
//! - [`manufacturer`] - optional reference datasets
//!
//! A source that cannot be read, lacks a configured column, or has a
//! malformed key field fails with [`error::LoadError`]; the data files are
//! static, so load failures abort instead of retrying.

mod columns;
pub mod charger;
pub mod error;
pub mod ev_fire;
pub mod fire;
pub mod manufacturer;
pub mod registration;

use std::path::Path;

use error::{LoadError, Result};

/// Read a source file to a string, tagging I/O failures with the source name.
pub fn read_source(path: &Path, source_name: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| LoadError::Io {
        source_name: source_name.to_string(),
        err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_source_tags_missing_file() {
        let err = read_source(Path::new("/nonexistent/fires.csv"), "fires").unwrap_err();
        match err {
            LoadError::Io { source_name, .. } => assert_eq!(source_name, "fires"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
