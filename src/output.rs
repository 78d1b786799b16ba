//! Output formatting and persistence for aggregation results.
//!
//! Supports a plain-text report, JSON serialization to the log, and CSV
//! append of per-year rows.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::{self, AggregateError, MaxResult};
use crate::parser::Quake;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One per-year output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRow {
    pub year: i32,
    pub count: usize,
    pub avg_magnitude: f64,
}

/// Complete aggregation result for one catalog query.
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub strongest: MaxResult,
    pub years: Vec<YearRow>,
}

impl Report {
    /// Runs the full aggregation pass over a record sequence.
    ///
    /// Fails with [`AggregateError::EmptyInput`] for an empty sequence so
    /// callers can distinguish "no data" from a zero-valued report, and
    /// propagates accessor failures unchanged.
    pub fn build(records: &[Quake]) -> Result<Report, AggregateError> {
        let total = aggregate::count(records);
        let strongest = aggregate::maximum(records)?;
        let years = aggregate::year_summaries(records)?
            .into_iter()
            .map(|(year, summary)| YearRow {
                year,
                count: summary.count,
                avg_magnitude: summary.avg_magnitude,
            })
            .collect();

        Ok(Report {
            generated_at: Utc::now(),
            total,
            strongest,
            years,
        })
    }
}

/// Prints the report as plain text to stdout.
pub fn print_report(report: &Report) {
    println!("Loaded {} earthquakes", report.total);
    println!(
        "The strongest had magnitude {} at {:?}",
        report.strongest.magnitude, report.strongest.locations
    );
    println!();
    println!("{:>6}  {:>6}  {:>13}", "year", "count", "avg magnitude");
    for row in &report.years {
        println!(
            "{:>6}  {:>6}  {:>13.2}",
            row.year, row.count, row.avg_magnitude
        );
    }
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &Report) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Appends the report's per-year rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_rows(path: &str, rows: &[YearRow]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Geometry, Properties, Quake};
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn quake(mag: f64, time: i64) -> Quake {
        Quake {
            properties: Properties {
                mag: Some(mag),
                time: Some(time),
                place: None,
            },
            geometry: Geometry {
                coordinates: vec![-2.0, 53.0, 10.0],
            },
        }
    }

    #[test]
    fn test_build_report_empty_input() {
        assert!(matches!(
            Report::build(&[]),
            Err(AggregateError::EmptyInput)
        ));
    }

    #[test]
    fn test_build_report_totals() {
        // Two events in 2004 (timestamps mid-2004, UTC).
        let records = vec![quake(3.0, 1088640000000), quake(5.0, 1090000000000)];
        let report = Report::build(&records).unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(report.strongest.magnitude, 5.0);
        assert_eq!(report.years.len(), 1);
        assert_eq!(report.years[0].year, 2004);
        assert_eq!(report.years[0].count, 2);
        assert_eq!(report.years[0].avg_magnitude, 4.0);
    }

    #[test]
    fn test_print_report_does_not_panic() {
        let records = vec![quake(3.0, 1088640000000)];
        let report = Report::build(&records).unwrap();
        print_report(&report);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let records = vec![quake(3.0, 1088640000000)];
        let report = Report::build(&records).unwrap();
        print_json(&report).unwrap();
    }

    #[test]
    fn test_append_rows_creates_file() {
        let path = temp_path("quake_stats_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        let rows = vec![YearRow {
            year: 2001,
            count: 2,
            avg_magnitude: 5.6,
        }];
        append_rows(&path, &rows).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("year"));
        assert!(content.contains("2001"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_rows_writes_header_once() {
        let path = temp_path("quake_stats_test_header.csv");
        let _ = fs::remove_file(&path);

        let rows = vec![YearRow {
            year: 2001,
            count: 2,
            avg_magnitude: 5.6,
        }];
        append_rows(&path, &rows).unwrap();
        append_rows(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content.lines().filter(|l| l.contains("year")).count();
        assert_eq!(header_count, 1);
        // 1 header + 2 data rows
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }
}
