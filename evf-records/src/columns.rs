//! Header-row resolution shared by the dataset parsers.
//!
//! Exact column names are source-specific configuration, not part of the
//! record contract: each parser resolves its configured names against the
//! header row exactly once, before reading any data rows.

use csv::StringRecord;

use crate::error::{LoadError, Result};

/// Find the index of `column` in `headers`, matching on trimmed text.
///
/// A configured column that is absent from the header row makes the whole
/// source unloadable.
pub(crate) fn resolve_column(
    headers: &StringRecord,
    column: &str,
    source_name: &str,
) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| LoadError::MissingColumn {
            source_name: source_name.to_string(),
            column: column.to_string(),
        })
}

/// Parse a count-like field, tolerating the usual export noise.
///
/// Empty, `null`, and `n/a` become 0; thousands separators are stripped.
pub(crate) fn parse_count(raw: &str) -> u64 {
    let lowered = raw.trim().to_lowercase();
    match lowered.as_str() {
        "" => 0,
        "null" => 0,
        "n/a" => 0,
        "na" => 0,
        s => s.replace(',', "").parse::<u64>().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_column_trims_header_whitespace() {
        let headers = StringRecord::from(vec![" date ", "region"]);
        assert_eq!(resolve_column(&headers, "date", "fires").unwrap(), 0);
        assert_eq!(resolve_column(&headers, "region", "fires").unwrap(), 1);
    }

    #[test]
    fn resolve_column_reports_source_and_column() {
        let headers = StringRecord::from(vec!["date"]);
        let err = resolve_column(&headers, "region", "fires").unwrap_err();
        match err {
            LoadError::MissingColumn {
                source_name,
                column,
            } => {
                assert_eq!(source_name, "fires");
                assert_eq!(column, "region");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_count_handles_noise() {
        assert_eq!(parse_count("12345"), 12345);
        assert_eq!(parse_count("12,345,678"), 12_345_678);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("null"), 0);
        assert_eq!(parse_count("N/A"), 0);
        assert_eq!(parse_count("garbage"), 0);
    }
}
