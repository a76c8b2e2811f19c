//! Geographic coordinate utilities
//!
//! Every geographic position drawn on the globe goes through [`project`], so the
//! axis convention below must not be duplicated anywhere else:
//! - +Y is the polar axis (north up)
//! - longitude 0 lies on +X, longitude 90 on -Z, longitude 180 on -X
//!
//! Overlays, the logo and the beam are all placed through it, so they stay
//! registered with each other.

use bevy::math::{DVec3, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Radius of the globe in scene units. Every other radius is relative to this.
pub const GLOBE_RADIUS: f32 = 1.0;

/// A latitude/longitude pair in degrees.
///
/// No range validation is performed: out-of-range values still project to a
/// well-defined (if geometrically odd) point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build from a GeoJSON position, which is ordered `[longitude, latitude]`.
    pub fn from_lon_lat(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some(Self::new(*lat, *lon)),
            _ => None,
        }
    }

    pub fn project(&self, radius: f32) -> Vec3 {
        project(self.latitude, self.longitude, radius)
    }
}

/// Spherical to Cartesian conversion on a sphere of `radius`.
pub fn project(latitude: f64, longitude: f64, radius: f32) -> Vec3 {
    // Compute in f64, the scene itself is f32
    let phi = (90.0 - latitude) * (PI / 180.0);
    let theta = (longitude + 180.0) * (PI / 180.0);
    let r = radius as f64;
    let p = DVec3::new(
        -r * phi.sin() * theta.cos(),
        r * phi.cos(),
        r * phi.sin() * theta.sin(),
    );
    p.as_vec3()
}

/// Orientation of the globe group: a fixed axial tilt about Z and an idle spin about Y.
///
/// Overlays, the logo and the beam are children of the globe, so anything that
/// needs their world position (the focus transition) goes through here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeFrame {
    pub tilt_rad: f32,
    pub spin_rad: f32,
}

impl Default for GlobeFrame {
    fn default() -> Self {
        Self {
            tilt_rad: AXIAL_TILT_DEG.to_radians(),
            spin_rad: 0.0,
        }
    }
}

/// Axial tilt applied to the globe group, degrees about Z.
pub const AXIAL_TILT_DEG: f32 = -23.4;

impl GlobeFrame {
    /// Tilt is applied first, then spin.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.spin_rad) * Quat::from_rotation_z(self.tilt_rad)
    }

    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.rotation() * local
    }
}

// =================================== Tests ===================================
