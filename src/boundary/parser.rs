//! GeoJSON boundary parsing.
//!
//! Accepts a `FeatureCollection`, a single `Feature` or a bare geometry. Only
//! `Polygon` and `MultiPolygon` geometries are kept; features with any other
//! geometry, or with coordinates that don't decode, are skipped one by one.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::boundary::types::{BoundaryDataset, BoundaryGeometry, BoundaryRing};
use crate::core::GeoPoint;

type RawRing = Vec<Vec<f64>>;

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// Parse a GeoJSON document into boundary rings.
///
/// Fails on invalid JSON and when no polygon rings survive parsing.
pub fn parse_boundary(body: &str) -> Result<BoundaryDataset> {
    let value: Value = serde_json::from_str(body).context("invalid json")?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let geometries: Vec<Value> = match kind.as_str() {
        "FeatureCollection" => {
            let collection: RawFeatureCollection =
                serde_json::from_value(value).context("invalid feature collection")?;
            collection
                .features
                .into_iter()
                .filter_map(|feature| feature.geometry)
                .collect()
        }
        "Feature" => {
            let feature: RawFeature = serde_json::from_value(value).context("invalid feature")?;
            feature.geometry.into_iter().collect()
        }
        "Polygon" | "MultiPolygon" => vec![value],
        other => anyhow::bail!("unsupported geojson type '{}'", other),
    };

    let total = geometries.len();
    let dataset = BoundaryDataset {
        geometries: geometries.into_iter().filter_map(convert_geometry).collect(),
    };

    if dataset.renderable_ring_count() == 0 {
        anyhow::bail!("no polygon rings in {} geometries", total);
    }
    Ok(dataset)
}

fn convert_geometry(value: Value) -> Option<BoundaryGeometry> {
    let raw: RawGeometry = serde_json::from_value(value).ok()?;
    match raw.kind.as_str() {
        "Polygon" => {
            let rings: Vec<RawRing> = serde_json::from_value(raw.coordinates).ok()?;
            Some(BoundaryGeometry::Polygon(convert_rings(rings)))
        }
        "MultiPolygon" => {
            let polygons: Vec<Vec<RawRing>> = serde_json::from_value(raw.coordinates).ok()?;
            Some(BoundaryGeometry::MultiPolygon(
                polygons.into_iter().map(convert_rings).collect(),
            ))
        }
        _ => None,
    }
}

fn convert_rings(rings: Vec<RawRing>) -> Vec<BoundaryRing> {
    rings
        .into_iter()
        .map(|ring| {
            BoundaryRing::new(
                ring.iter()
                    .filter_map(|position| GeoPoint::from_lon_lat(position))
                    .collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "ARE",
                "properties": { "name": "United Arab Emirates" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[51.58, 24.24], [56.39, 26.39], [56.08, 24.74], [51.58, 24.24]]]
                }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[53.0, 24.0], [53.1, 24.0], [53.1, 24.1]]],
                        [[[54.0, 24.5], [54.2, 24.5], [54.2, 24.7], [54.0, 24.5]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let dataset = parse_boundary(SAMPLE).unwrap();
        assert_eq!(dataset.geometries.len(), 2);
        assert_eq!(dataset.ring_count(), 3);

        let first = dataset.rings().next().unwrap();
        // Closing point is kept
        assert_eq!(first.len(), 4);
        assert_eq!(first.points[0], GeoPoint::new(24.24, 51.58));
    }

    #[test]
    fn test_skips_unsupported_and_malformed_features() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [54.0, 24.0] } },
                { "type": "Feature", "geometry": null },
                { "type": "Feature", "geometry": { "type": "Polygon", "coordinates": "oops" } },
                { "type": "Feature", "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[54.0, 24.0, 12.0], [55.0, 24.0], [55.0, 25.0]]]
                } }
            ]
        }"#;
        let dataset = parse_boundary(body).unwrap();
        assert_eq!(dataset.geometries.len(), 1);
        assert_eq!(dataset.renderable_ring_count(), 1);
    }

    #[test]
    fn test_accepts_bare_geometry_and_feature() {
        let geometry = r#"{ "type": "Polygon", "coordinates": [[[1, 2], [3, 4], [5, 6]]] }"#;
        assert_eq!(parse_boundary(geometry).unwrap().ring_count(), 1);

        let feature = format!(r#"{{ "type": "Feature", "geometry": {geometry} }}"#);
        assert_eq!(parse_boundary(&feature).unwrap().ring_count(), 1);
    }

    #[test]
    fn test_rejects_invalid_or_empty_documents() {
        assert!(parse_boundary("not json").is_err());
        assert!(parse_boundary(r#"{ "type": "FeatureCollection", "features": [] }"#).is_err());
        assert!(parse_boundary(r#"{ "type": "Topology" }"#).is_err());
        // Only degenerate rings
        let degenerate = r#"{ "type": "Polygon", "coordinates": [[[1, 2], [3, 4]]] }"#;
        assert!(parse_boundary(degenerate).is_err());
    }
}
