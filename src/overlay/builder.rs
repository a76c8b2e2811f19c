//! Overlay mesh construction from boundary rings.
//!
//! Each ring with at least three points yields one outline and one fill. The
//! fill is a fan around the ring's centroid pushed back out to the fill radius,
//! which is fine for small, mostly convex regions.

use bevy::prelude::*;

use crate::boundary::{BoundaryDataset, BoundaryRing};
use crate::overlay::{OverlayGroup, OverlayKind, OverlayMesh};

pub fn build_overlays(
    dataset: &BoundaryDataset,
    outline_radius: f32,
    fill_radius: f32,
) -> OverlayGroup {
    let mut group = OverlayGroup::default();
    let mut skipped = 0;
    for ring in dataset.rings() {
        let Some((outline, fill)) = build_ring(ring, outline_radius, fill_radius) else {
            skipped += 1;
            continue;
        };
        group.outlines.push(outline);
        group.fills.push(fill);
    }
    if skipped > 0 {
        debug!("Skipped {} boundary rings with fewer than 3 points", skipped);
    }
    group
}

/// Outline and fan fill for one ring, `None` for degenerate rings.
pub fn build_ring(
    ring: &BoundaryRing,
    outline_radius: f32,
    fill_radius: f32,
) -> Option<(OverlayMesh, OverlayMesh)> {
    if !ring.is_renderable() {
        return None;
    }

    let outline: Vec<Vec3> = ring.points.iter().map(|p| p.project(outline_radius)).collect();
    let rim: Vec<Vec3> = ring.points.iter().map(|p| p.project(fill_radius)).collect();

    let n = rim.len();
    let mean = rim.iter().copied().sum::<Vec3>() / n as f32;
    let center = mean
        .try_normalize()
        .unwrap_or_else(|| rim[0].normalize_or_zero())
        * fill_radius;

    let mut triangles = Vec::with_capacity(n * 3);
    for (i, point) in rim.iter().enumerate() {
        let next = rim[(i + 1) % n];
        triangles.extend([center, *point, next]);
    }

    Some((
        OverlayMesh::new(OverlayKind::Outline, outline),
        OverlayMesh::new(OverlayKind::Fill, triangles),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryGeometry;
    use crate::core::GeoPoint;

    const EPSILON: f32 = 1e-5;

    fn ring(points: &[(f64, f64)]) -> BoundaryRing {
        BoundaryRing::new(
            points
                .iter()
                .map(|(lat, lon)| GeoPoint::new(*lat, *lon))
                .collect(),
        )
    }

    fn uae_like() -> BoundaryRing {
        ring(&[
            (24.24, 51.58),
            (24.0, 52.6),
            (22.6, 55.2),
            (24.9, 56.3),
            (26.39, 56.39),
            (25.6, 55.5),
            (24.24, 51.58),
        ])
    }

    #[test]
    fn test_fan_has_one_triangle_per_point() {
        let ring = uae_like();
        let (outline, fill) = build_ring(&ring, 1.008, 1.009).unwrap();
        assert_eq!(outline.vertices.len(), ring.len());
        assert_eq!(fill.vertices.len(), ring.len() * 3);
        assert_eq!(fill.triangles().count(), ring.len());
    }

    #[test]
    fn test_square_ring_builds_four_triangle_fan() {
        let square = ring(&[(24.0, 54.0), (24.0, 55.0), (25.0, 55.0), (25.0, 54.0)]);
        let group = build_overlays(
            &BoundaryDataset {
                geometries: vec![BoundaryGeometry::Polygon(vec![square])],
            },
            1.008,
            1.009,
        );
        assert_eq!(group.outlines.len(), 1);
        assert_eq!(group.outlines[0].vertices.len(), 4);
        assert_eq!(group.fills.len(), 1);
        assert_eq!(group.fills[0].triangles().count(), 4);
        assert!(
            group.fills[0]
                .vertices
                .iter()
                .all(|v| (v.length() - 1.009).abs() < EPSILON)
        );
    }

    #[test]
    fn test_fill_vertices_sit_on_fill_radius() {
        let (_, fill) = build_ring(&uae_like(), 1.008, 1.009).unwrap();
        for triangle in fill.triangles() {
            for vertex in triangle {
                assert!((vertex.length() - 1.009).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_outline_vertices_sit_on_outline_radius() {
        let (outline, _) = build_ring(&uae_like(), 1.008, 1.009).unwrap();
        assert!(outline.vertices.iter().all(|v| (v.length() - 1.008).abs() < EPSILON));
    }

    #[test]
    fn test_new_overlays_start_hidden() {
        let (outline, fill) = build_ring(&uae_like(), 1.008, 1.009).unwrap();
        assert_eq!(outline.opacity, 0.0);
        assert_eq!(fill.opacity, 0.0);
    }

    #[test]
    fn test_degenerate_rings_are_skipped() {
        let dataset = BoundaryDataset {
            geometries: vec![
                BoundaryGeometry::Polygon(vec![ring(&[(24.0, 54.0), (25.0, 54.0)])]),
                BoundaryGeometry::MultiPolygon(vec![
                    vec![uae_like()],
                    vec![ring(&[(24.5, 54.5)]), ring(&[(24.1, 53.0), (24.2, 53.1), (24.3, 53.0)])],
                ]),
            ],
        };
        let group = build_overlays(&dataset, 1.008, 1.009);
        assert_eq!(group.outlines.len(), 2);
        assert_eq!(group.fills.len(), 2);
        assert_eq!(group.fills[1].triangles().count(), 3);
    }

    #[test]
    fn test_empty_dataset_builds_nothing() {
        let group = build_overlays(&BoundaryDataset::default(), 1.008, 1.009);
        assert!(group.is_empty());
    }
}
