//! GeoJSON parser for USGS FDSN event catalogs.

use anyhow::Result;
use serde::Deserialize;

/// A parsed event catalog: the `FeatureCollection` returned by the
/// FDSN query endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct Catalog {
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub features: Vec<Quake>,
}

/// Feed-level metadata. `count` is reported by the service and logged
/// for comparison, never used in place of the computed count.
#[derive(Debug, Default, Deserialize)]
pub struct Metadata {
    pub count: Option<usize>,
    pub title: Option<String>,
}

/// One reported earthquake event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Quake {
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    /// Magnitude; the feed reports `null` for some events.
    pub mag: Option<f64>,
    /// Event time in milliseconds since the Unix epoch.
    pub time: Option<i64>,
    pub place: Option<String>,
}

/// Point geometry. Coordinates are `[longitude, latitude, depth]`;
/// depth is not used by the aggregation layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// Decodes a GeoJSON [`Catalog`] from raw response bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON for a
/// `FeatureCollection`.
pub fn parse_catalog(bytes: &[u8]) -> Result<Catalog> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_catalog() {
        let json = br#"{"type":"FeatureCollection","metadata":{"count":0},"features":[]}"#;
        let catalog = parse_catalog(json).unwrap();

        assert!(catalog.features.is_empty());
        assert_eq!(catalog.metadata.unwrap().count, Some(0));
    }

    #[test]
    fn test_parse_single_feature() {
        let json = br#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"mag": 2.6, "time": 956553055700, "place": "England, United Kingdom"},
                "geometry": {"type": "Point", "coordinates": [-2.81, 54.77, 14.0]}
            }]
        }"#;
        let catalog = parse_catalog(json).unwrap();

        assert_eq!(catalog.features.len(), 1);
        let quake = &catalog.features[0];
        assert_eq!(quake.properties.mag, Some(2.6));
        assert_eq!(quake.properties.time, Some(956553055700));
        assert_eq!(quake.geometry.coordinates, vec![-2.81, 54.77, 14.0]);
    }

    #[test]
    fn test_parse_null_magnitude_is_none() {
        let json = br#"{
            "features": [{
                "properties": {"mag": null, "time": 956553055700},
                "geometry": {"coordinates": [-2.81, 54.77, 14.0]}
            }]
        }"#;
        let catalog = parse_catalog(json).unwrap();

        assert_eq!(catalog.features[0].properties.mag, None);
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let result = parse_catalog(b"not json at all");
        assert!(result.is_err());
    }
}
