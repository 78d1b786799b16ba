//! Query configuration for the USGS FDSN event service.

use anyhow::Result;
use chrono::NaiveDate;
use reqwest::Url;

pub const FDSN_EVENT_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query.geojson";

/// Parameters for one catalog query: a time range, a rectangular
/// latitude/longitude bounding box, and a magnitude floor. Results are
/// requested in ascending time order.
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub start_time: NaiveDate,
    pub end_time: NaiveDate,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_magnitude: f64,
    pub order_by: String,
}

impl Default for QueryParams {
    /// Events of magnitude 1+ in a box around the British Isles,
    /// 2000-01-01 through 2018-10-11.
    fn default() -> Self {
        QueryParams {
            start_time: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            end_time: NaiveDate::from_ymd_opt(2018, 10, 11).unwrap(),
            min_latitude: 50.008,
            max_latitude: 58.723,
            min_longitude: -9.756,
            max_longitude: 1.67,
            min_magnitude: 1.0,
            order_by: "time-asc".to_string(),
        }
    }
}

impl QueryParams {
    /// Builds the full query URL for the FDSN event endpoint.
    pub fn url(&self) -> Result<Url> {
        let url = Url::parse_with_params(
            FDSN_EVENT_URL,
            &[
                ("starttime", self.start_time.format("%Y-%m-%d").to_string()),
                ("endtime", self.end_time.format("%Y-%m-%d").to_string()),
                ("minlatitude", self.min_latitude.to_string()),
                ("maxlatitude", self.max_latitude.to_string()),
                ("minlongitude", self.min_longitude.to_string()),
                ("maxlongitude", self.max_longitude.to_string()),
                ("minmagnitude", self.min_magnitude.to_string()),
                ("orderby", self.order_by.clone()),
            ],
        )?;
        Ok(url)
    }
}
