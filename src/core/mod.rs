//! Core geometry shared by every other module.

pub mod coordinates;

pub use coordinates::{GeoPoint, GlobeFrame, project};
