//! Boundary data types and worker channels.

use bevy::prelude::*;
use std::sync::{
    Arc, Mutex,
    mpsc::{Receiver, Sender},
};

use crate::core::GeoPoint;

/// One closed polygon ring, in source order.
///
/// GeoJSON rings repeat the first position at the end; that closing point is
/// kept as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryRing {
    pub points: Vec<GeoPoint>,
}

impl BoundaryRing {
    /// Rings shorter than this have no area and are skipped when building meshes.
    pub const MIN_POINTS: usize = 3;

    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_renderable(&self) -> bool {
        self.points.len() >= Self::MIN_POINTS
    }
}

/// A boundary geometry: polygon rings or a list of polygons.
///
/// Holes are treated like any other ring; they get their own outline and fill.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryGeometry {
    Polygon(Vec<BoundaryRing>),
    MultiPolygon(Vec<Vec<BoundaryRing>>),
}

impl BoundaryGeometry {
    pub fn rings(&self) -> impl Iterator<Item = &BoundaryRing> {
        let polygons: &[Vec<BoundaryRing>] = match self {
            Self::Polygon(rings) => std::slice::from_ref(rings),
            Self::MultiPolygon(polygons) => polygons,
        };
        polygons.iter().flatten()
    }
}

/// Parsed boundary of the highlighted region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryDataset {
    pub geometries: Vec<BoundaryGeometry>,
}

impl BoundaryDataset {
    pub fn rings(&self) -> impl Iterator<Item = &BoundaryRing> {
        self.geometries.iter().flat_map(BoundaryGeometry::rings)
    }

    pub fn ring_count(&self) -> usize {
        self.rings().count()
    }

    pub fn renderable_ring_count(&self) -> usize {
        self.rings().filter(|ring| ring.is_renderable()).count()
    }

    /// Lat/lon box around every point, `None` when there are no points.
    pub fn bounds(&self) -> Option<GeoBounds> {
        let mut points = self.rings().flat_map(|ring| ring.points.iter());
        let first = points.next()?;
        let mut bounds = GeoBounds::from_point(*first);
        for point in points {
            bounds.extend(*point);
        }
        Some(bounds)
    }
}

/// Axis-aligned lat/lon rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            south: point.latitude,
            west: point.longitude,
            north: point.latitude,
            east: point.longitude,
        }
    }

    pub fn extend(&mut self, point: GeoPoint) {
        self.south = self.south.min(point.latitude);
        self.north = self.north.max(point.latitude);
        self.west = self.west.min(point.longitude);
        self.east = self.east.max(point.longitude);
    }

    /// Grow each side by `ratio` of the box's extent on that axis.
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = (self.north - self.south).abs() * ratio;
        let lon_buffer = (self.east - self.west).abs() * ratio;
        Self {
            south: self.south - lat_buffer,
            west: self.west - lon_buffer,
            north: self.north + lat_buffer,
            east: self.east + lon_buffer,
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}

#[derive(Debug, Clone)]
pub enum BoundaryCommand {
    Fetch { url: String },
}

#[derive(Debug, Clone)]
pub enum BoundaryResult {
    Loaded { dataset: BoundaryDataset },
    Error { error: String },
}

#[derive(Resource)]
pub struct BoundaryChannels {
    pub cmd_tx: Sender<BoundaryCommand>,
    pub res_rx: Arc<Mutex<Receiver<BoundaryResult>>>,
}
