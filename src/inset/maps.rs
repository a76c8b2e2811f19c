//! The two inset maps: the whole region, and a closer look at the point of interest.

use bevy::prelude::*;
use std::sync::Arc;

use crate::boundary::{BoundaryDataset, GeoBounds};
use crate::context::GlobeConfig;
use crate::core::GeoPoint;
use crate::inset::widget::{
    BoundaryStyle, InsetMap, MapOptions, MapWidget, Marker, MarkerIcon, TileStyle,
};

/// Pixel size of each inset panel.
pub const INSET_SIZE: Vec2 = Vec2::new(280.0, 200.0);

#[derive(Debug, Clone, Copy)]
pub struct Landmark {
    pub name: &'static str,
    pub position: GeoPoint,
    /// Shown on the point map too, with a larger highlighted icon.
    pub point_of_interest: bool,
}

pub const LANDMARKS: [Landmark; 7] = [
    Landmark {
        name: "Abu Dhabi",
        position: GeoPoint::new(24.4539, 54.3773),
        point_of_interest: false,
    },
    Landmark {
        name: "Dubai",
        position: GeoPoint::new(25.2048, 55.2708),
        point_of_interest: false,
    },
    Landmark {
        name: "Sharjah",
        position: GeoPoint::new(25.3463, 55.4209),
        point_of_interest: false,
    },
    Landmark {
        name: "Ajman",
        position: GeoPoint::new(25.4052, 55.5136),
        point_of_interest: false,
    },
    Landmark {
        name: "Umm Al Quwain",
        position: GeoPoint::new(25.5647, 55.5552),
        point_of_interest: false,
    },
    Landmark {
        name: "Fujairah",
        position: GeoPoint::new(25.1288, 56.3265),
        point_of_interest: false,
    },
    Landmark {
        name: "Ras Al Khaimah",
        position: GeoPoint::new(25.8, 55.98),
        point_of_interest: true,
    },
];

#[derive(Debug, Clone)]
pub struct InsetMaps {
    pub region: InsetMap,
    pub point: InsetMap,
    point_style: TileStyle,
    /// Padded region bounds, known once the boundary has loaded.
    bounds: Option<GeoBounds>,
    initialized: bool,
}

impl InsetMaps {
    pub fn new(config: &GlobeConfig) -> Self {
        let mut region = InsetMap::new(MapOptions::locked(), INSET_SIZE);
        region.set_tile_layer(TileStyle::Satellite);

        let mut point = InsetMap::new(MapOptions::interactive(), INSET_SIZE);
        point.set_tile_layer(TileStyle::Satellite);
        point.set_view(config.point_of_interest, config.point_of_interest_zoom as f32);

        Self {
            region,
            point,
            point_style: TileStyle::Satellite,
            bounds: None,
            initialized: false,
        }
    }

    /// Attach the boundary and landmarks. Safe to call again; layers are replaced.
    pub fn initialize(&mut self, dataset: Arc<BoundaryDataset>, config: &GlobeConfig) {
        let style = BoundaryStyle::default();
        self.region.set_boundary_layer(dataset.clone(), style);
        self.point.set_boundary_layer(dataset.clone(), style);

        self.bounds = dataset
            .bounds()
            .map(|bounds| bounds.pad(config.inset_bounds_padding));
        if let Some(bounds) = self.bounds {
            self.region.fit_bounds(bounds);
        }
        self.point
            .set_view(config.point_of_interest, config.point_of_interest_zoom as f32);

        apply_landmarks(&mut self.region, true);
        apply_landmarks(&mut self.point, false);
        self.initialized = true;
        info!(
            "Inset maps initialized ({} region markers)",
            self.region.markers().len()
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn reveal(&mut self, config: &GlobeConfig) {
        for map in [&mut self.region, &mut self.point] {
            map.set_visible(true);
            map.invalidate_size();
        }
        if let Some(bounds) = self.bounds {
            self.region.fit_bounds(bounds);
        }
        if self.initialized {
            self.point
                .set_view(config.point_of_interest, config.point_of_interest_zoom as f32);
        }
    }

    pub fn hide(&mut self) {
        self.region.set_visible(false);
        self.point.set_visible(false);
    }

    pub fn is_visible(&self) -> bool {
        self.region.is_visible()
    }

    /// Switch the point map between imagery and streets, returning the new style.
    pub fn toggle_point_tile_style(&mut self) -> TileStyle {
        self.point_style = self.point_style.toggled();
        self.point.set_tile_layer(self.point_style);
        self.point_style
    }

    pub fn point_tile_style(&self) -> TileStyle {
        self.point_style
    }

    pub fn on_resize(&mut self) {
        self.region.invalidate_size();
        self.point.invalidate_size();
    }
}

fn apply_landmarks<M: MapWidget>(map: &mut M, show_all: bool) {
    let markers = LANDMARKS
        .iter()
        .filter(|landmark| show_all || landmark.point_of_interest)
        .map(landmark_marker)
        .collect();
    map.set_markers(markers);
}

fn landmark_marker(landmark: &Landmark) -> Marker {
    let icon = if landmark.point_of_interest {
        MarkerIcon {
            size: UVec2::new(60, 30),
            anchor: UVec2::new(30, 25),
            color: Color::srgb_u8(0x4f, 0xc3, 0xf7),
            highlighted: true,
        }
    } else {
        MarkerIcon {
            size: UVec2::new(10, 10),
            anchor: UVec2::new(5, 5),
            color: Color::srgb_u8(0xff, 0x2b, 0x2b),
            highlighted: false,
        }
    };
    Marker {
        name: landmark.name.to_string(),
        position: landmark.position,
        icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{BoundaryGeometry, BoundaryRing};

    fn dataset() -> Arc<BoundaryDataset> {
        Arc::new(BoundaryDataset {
            geometries: vec![BoundaryGeometry::Polygon(vec![BoundaryRing::new(vec![
                GeoPoint::new(22.6, 51.6),
                GeoPoint::new(26.0, 56.3),
                GeoPoint::new(24.0, 55.0),
            ])])],
        })
    }

    #[test]
    fn test_new_maps_have_tiles_but_no_boundary() {
        let maps = InsetMaps::new(&GlobeConfig::default());
        assert!(!maps.is_initialized());
        assert!(!maps.is_visible());
        assert_eq!(maps.region.tile_layer(), Some(TileStyle::Satellite));
        assert!(maps.region.boundary().is_none());
        assert!(!maps.region.options().any_gesture());
        assert!(maps.point.options().zoom_control);
    }

    #[test]
    fn test_initialize_fits_region_and_centers_point() {
        let config = GlobeConfig::default();
        let mut maps = InsetMaps::new(&config);
        maps.initialize(dataset(), &config);

        let region_view = maps.region.view().unwrap();
        let padded = dataset().bounds().unwrap().pad(0.1);
        assert_eq!(region_view.center, padded.center());

        let point_view = maps.point.view().unwrap();
        assert_eq!(point_view.center, GeoPoint::new(25.8, 55.98));
        assert_eq!(point_view.zoom, 9.0);
    }

    #[test]
    fn test_landmarks_per_map() {
        let config = GlobeConfig::default();
        let mut maps = InsetMaps::new(&config);
        maps.initialize(dataset(), &config);

        assert_eq!(maps.region.markers().len(), 7);
        let point_markers = maps.point.markers();
        assert_eq!(point_markers.len(), 1);
        assert_eq!(point_markers[0].name, "Ras Al Khaimah");
        assert!(point_markers[0].icon.highlighted);
        assert_eq!(
            maps.region
                .markers()
                .iter()
                .filter(|m| m.icon.highlighted)
                .count(),
            1
        );
    }

    #[test]
    fn test_reinitialize_replaces_layers() {
        let config = GlobeConfig::default();
        let mut maps = InsetMaps::new(&config);
        maps.initialize(dataset(), &config);
        let replacement = dataset();
        maps.initialize(replacement.clone(), &config);
        assert!(Arc::ptr_eq(
            &maps.region.boundary().unwrap().dataset,
            &replacement
        ));
        assert_eq!(maps.region.markers().len(), 7);
    }

    #[test]
    fn test_reveal_and_hide() {
        let config = GlobeConfig::default();
        let mut maps = InsetMaps::new(&config);
        maps.reveal(&config);
        assert!(maps.is_visible());
        assert!(maps.point.is_visible());
        assert_eq!(maps.region.size_invalidations(), 1);
        // No boundary yet, so nothing to fit
        assert!(maps.region.view().is_none());

        maps.hide();
        assert!(!maps.is_visible());
        assert!(!maps.point.is_visible());
    }

    #[test]
    fn test_point_tile_style_toggles() {
        let mut maps = InsetMaps::new(&GlobeConfig::default());
        assert_eq!(maps.toggle_point_tile_style(), TileStyle::Streets);
        assert_eq!(maps.point.tile_layer(), Some(TileStyle::Streets));
        assert_eq!(maps.toggle_point_tile_style(), TileStyle::Satellite);
        // Region map never changes
        assert_eq!(maps.region.tile_layer(), Some(TileStyle::Satellite));
    }

    #[test]
    fn test_resize_invalidates_both() {
        let mut maps = InsetMaps::new(&GlobeConfig::default());
        maps.on_resize();
        maps.on_resize();
        assert_eq!(maps.region.size_invalidations(), 2);
        assert_eq!(maps.point.size_invalidations(), 2);
    }
}
