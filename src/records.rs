//! Typed field access over raw catalog records.
//!
//! The feed only guarantees field presence loosely (magnitudes can be
//! `null`, geometry can be truncated), so every accessor returns a
//! `Result` instead of defaulting missing values.

use chrono::{DateTime, Datelike};
use thiserror::Error;

use crate::parser::Quake;

#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("record is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("timestamp {0} ms does not convert to a valid UTC date")]
    InvalidTimestamp(i64),
}

/// (latitude, longitude) of an event.
pub type Location = (f64, f64);

/// Magnitude of an event.
pub fn magnitude_of(quake: &Quake) -> Result<f64, FieldError> {
    quake.properties.mag.ok_or(FieldError::MissingField("mag"))
}

/// Calendar year of an event, derived in UTC.
///
/// Timestamps are milliseconds since the Unix epoch. Deriving the year in
/// the host's local time zone would shift events near midnight UTC into a
/// neighbouring year depending on where the tool runs, so the conversion
/// is pinned to UTC.
pub fn year_of(quake: &Quake) -> Result<i32, FieldError> {
    let millis = quake
        .properties
        .time
        .ok_or(FieldError::MissingField("time"))?;
    let datetime =
        DateTime::from_timestamp_millis(millis).ok_or(FieldError::InvalidTimestamp(millis))?;
    Ok(datetime.year())
}

/// (latitude, longitude) of an event.
///
/// GeoJSON stores coordinates as `[longitude, latitude, depth]`; the pair
/// is returned latitude-first. Depth is ignored.
pub fn location_of(quake: &Quake) -> Result<Location, FieldError> {
    let coords = &quake.geometry.coordinates;
    if coords.len() < 2 {
        return Err(FieldError::MissingField("coordinates"));
    }
    Ok((coords[1], coords[0]))
}
