//! Aggregation over parsed catalog records.
//!
//! All summaries are derived from one grouping pass so the per-year counts
//! and averages can never disagree about which records belong to a year.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::parser::Quake;
use crate::records::{FieldError, Location, location_of, magnitude_of, year_of};

#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("no records to aggregate")]
    EmptyInput,

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// The strongest magnitude in a record sequence, together with every
/// location that attains it. Equality on the raw magnitude field, so
/// ties are preserved exactly as reported by the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaxResult {
    pub magnitude: f64,
    pub locations: Vec<Location>,
}

/// Per-year record count and mean magnitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub count: usize,
    pub avg_magnitude: f64,
}

/// Total number of records.
pub fn count(records: &[Quake]) -> usize {
    records.len()
}

/// Finds the maximum magnitude and all tied locations in a single pass.
///
/// A strictly greater magnitude resets the tie list to that record's
/// location; an exactly equal magnitude appends to it. The empty case is
/// rejected explicitly: "no data" must surface as an error, not as a
/// fabricated zero maximum.
pub fn maximum(records: &[Quake]) -> Result<MaxResult, AggregateError> {
    let (first, rest) = records.split_first().ok_or(AggregateError::EmptyInput)?;

    let mut best_magnitude = magnitude_of(first)?;
    let mut best_locations = vec![location_of(first)?];

    for quake in rest {
        let mag = magnitude_of(quake)?;
        if mag > best_magnitude {
            best_magnitude = mag;
            best_locations = vec![location_of(quake)?];
        } else if mag == best_magnitude {
            best_locations.push(location_of(quake)?);
        }
    }

    Ok(MaxResult {
        magnitude: best_magnitude,
        locations: best_locations,
    })
}

/// Partitions magnitudes by UTC calendar year.
///
/// Groups appear in first-seen order, which for a time-ascending feed is
/// already chronological; callers that need a sorted axis sort explicitly.
/// An empty input yields no groups, which is well-defined and not an
/// error.
pub fn magnitudes_by_year(records: &[Quake]) -> Result<Vec<(i32, Vec<f64>)>, AggregateError> {
    let mut groups: Vec<(i32, Vec<f64>)> = Vec::new();
    let mut index: HashMap<i32, usize> = HashMap::new();

    for quake in records {
        let year = year_of(quake)?;
        let mag = magnitude_of(quake)?;
        match index.get(&year) {
            Some(&at) => groups[at].1.push(mag),
            None => {
                index.insert(year, groups.len());
                groups.push((year, vec![mag]));
            }
        }
    }

    Ok(groups)
}

/// Number of records per year, derived from [`magnitudes_by_year`].
pub fn count_per_year(records: &[Quake]) -> Result<Vec<(i32, usize)>, AggregateError> {
    let groups = magnitudes_by_year(records)?;
    Ok(groups
        .into_iter()
        .map(|(year, mags)| (year, mags.len()))
        .collect())
}

/// Mean magnitude per year, derived from [`magnitudes_by_year`].
pub fn average_magnitude_per_year(records: &[Quake]) -> Result<Vec<(i32, f64)>, AggregateError> {
    let groups = magnitudes_by_year(records)?;
    Ok(groups
        .into_iter()
        .map(|(year, mags)| (year, mean(&mags)))
        .collect())
}

/// Count and mean magnitude per year from one grouping pass.
pub fn year_summaries(records: &[Quake]) -> Result<Vec<(i32, GroupSummary)>, AggregateError> {
    let groups = magnitudes_by_year(records)?;
    Ok(groups
        .into_iter()
        .map(|(year, mags)| {
            let summary = GroupSummary {
                count: mags.len(),
                avg_magnitude: mean(&mags),
            };
            (year, summary)
        })
        .collect())
}

/// Arithmetic mean of a slice of values. Returns 0.0 for empty input;
/// grouping never produces an empty group, so the guard is only reachable
/// from direct callers.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
