use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Timelike};
use log::info;

use crate::error::DataError;
use super::model::{Sample, Series};

/// Header of the timestamp column in the input artifact.
pub const DATETIME_COLUMN: &str = "DateTime";
/// Header of the value column in the input artifact.
pub const TEMPERATURE_COLUMN: &str = "Temperature (°C)";

/// Timestamp shapes accepted from raw input. The fetch adapter writes the
/// first (`2024-10-13T07:00`); the others tolerate seconds and a space
/// separator.
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Minute-precision rendering, the input artifact's spelling.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Seconds-precision rendering, for timestamps that carry seconds.
pub const TIMESTAMP_FORMAT_WITH_SECS: &str = "%Y-%m-%dT%H:%M:%S";

/// Render a timestamp for an artifact. Whole minutes use the fetch
/// adapter's minute-precision spelling; anything finer keeps its seconds,
/// so writing and re-reading a series never collapses distinct timestamps.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    if timestamp.second() == 0 {
        timestamp.format(TIMESTAMP_FORMAT).to_string()
    } else {
        timestamp.format(TIMESTAMP_FORMAT_WITH_SECS).to_string()
    }
}

// ---------------------------------------------------------------------------
// Raw-pair parsing
// ---------------------------------------------------------------------------

/// Parse raw (timestamp-string, value-string) pairs into a validated
/// [`Series`].
///
/// Each timestamp must parse as an ISO-8601-like local datetime and each
/// value as a finite float; the failing row and field are reported in the
/// error. Ordering is then validated by the `Series` constructor.
pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, S)]) -> Result<Series, DataError> {
    let mut samples = Vec::with_capacity(pairs.len());
    for (row, (raw_ts, raw_value)) in pairs.iter().enumerate() {
        samples.push(Sample {
            timestamp: parse_timestamp(raw_ts.as_ref(), row)?,
            value: parse_value(raw_value.as_ref(), row)?,
        });
    }
    Series::from_samples(samples)
}

fn parse_timestamp(raw: &str, row: usize) -> Result<NaiveDateTime, DataError> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| DataError::Parse {
            row,
            field: DATETIME_COLUMN,
            value: raw.to_string(),
        })
}

fn parse_value(raw: &str, row: usize) -> Result<f64, DataError> {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DataError::Parse {
            row,
            field: TEMPERATURE_COLUMN,
            value: raw.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Input artifact (CSV) reader
// ---------------------------------------------------------------------------

/// Read the input artifact produced by the fetch adapter.
///
/// Layout: header row `DateTime,Temperature (°C)`, then one
/// timestamp/value row per sample. Columns are located by name, so their
/// order does not matter; surrounding whitespace is tolerated.
pub fn read_csv(path: &Path) -> Result<Series> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = reader.headers().context("reading CSV headers")?;
    let ts_idx = headers
        .iter()
        .position(|h| h == DATETIME_COLUMN)
        .with_context(|| format!("CSV missing '{DATETIME_COLUMN}' column"))?;
    let value_idx = headers
        .iter()
        .position(|h| h == TEMPERATURE_COLUMN)
        .with_context(|| format!("CSV missing '{TEMPERATURE_COLUMN}' column"))?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        pairs.push((
            record.get(ts_idx).unwrap_or("").to_string(),
            record.get(value_idx).unwrap_or("").to_string(),
        ));
    }

    let series = from_pairs(&pairs).with_context(|| format!("parsing {}", path.display()))?;
    info!("loaded {} samples from {}", series.len(), path.display());
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(rows: &[(&str, &str)]) -> Vec<(String, String)> {
        rows.iter()
            .map(|(t, v)| (t.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_wellformed_pairs() {
        let series = from_pairs(&pairs(&[
            ("2024-10-13T07:00", "15.5"),
            ("2024-10-13T08:00", "16.1"),
        ]))
        .unwrap();
        assert_eq!(series.len(), 2);
        let values: Vec<f64> = series.values().collect();
        assert_eq!(values, vec![15.5, 16.1]);
    }

    #[test]
    fn accepts_seconds_and_space_separator() {
        let series = from_pairs(&pairs(&[
            ("2024-10-13T07:00:00", "1.0"),
            ("2024-10-13 08:00:00", "2.0"),
        ]))
        .unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn bad_timestamp_reports_row_and_field() {
        let err = from_pairs(&pairs(&[
            ("2024-10-13T07:00", "1.0"),
            ("13/10/2024 08:00", "2.0"),
        ]))
        .unwrap_err();
        match err {
            DataError::Parse { row, field, .. } => {
                assert_eq!(row, 1);
                assert_eq!(field, DATETIME_COLUMN);
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn bad_value_reports_row_and_field() {
        let err = from_pairs(&pairs(&[("2024-10-13T07:00", "warm")])).unwrap_err();
        match err {
            DataError::Parse { row, field, .. } => {
                assert_eq!(row, 0);
                assert_eq!(field, TEMPERATURE_COLUMN);
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_value_is_a_parse_error() {
        let err = from_pairs(&pairs(&[("2024-10-13T07:00", "NaN")])).unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
        let err = from_pairs(&pairs(&[("2024-10-13T07:00", "inf")])).unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
    }

    #[test]
    fn unordered_timestamps_are_an_order_error() {
        let err = from_pairs(&pairs(&[
            ("2024-10-13T08:00", "1.0"),
            ("2024-10-13T07:00", "2.0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, DataError::Order { row: 1, .. }));
    }

    #[test]
    fn empty_input_yields_an_empty_series() {
        let series = from_pairs::<String>(&[]).unwrap();
        assert!(series.is_empty());
    }
}
