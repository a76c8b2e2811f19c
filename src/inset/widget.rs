//! 2D map widget contract and a state-backed implementation.
//!
//! Tile imagery, marker drawing and gesture handling belong to whatever draws
//! the widget. This module only tracks what the widget should show.

use bevy::prelude::*;
use std::f64::consts::PI;
use std::sync::Arc;

use crate::boundary::{BoundaryDataset, GeoBounds};
use crate::core::GeoPoint;

const TILE_SIZE: f64 = 256.0;
const MAX_ZOOM: f32 = 18.0;

/// Interaction switches for a map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    pub dragging: bool,
    pub scroll_wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub box_zoom: bool,
    pub keyboard: bool,
    pub tap: bool,
    pub zoom_control: bool,
    pub attribution_control: bool,
}

impl MapOptions {
    /// Fixed view: no gestures, no controls.
    pub fn locked() -> Self {
        Self {
            dragging: false,
            scroll_wheel_zoom: false,
            double_click_zoom: false,
            box_zoom: false,
            keyboard: false,
            tap: false,
            zoom_control: false,
            attribution_control: false,
        }
    }

    pub fn interactive() -> Self {
        Self {
            dragging: true,
            scroll_wheel_zoom: true,
            double_click_zoom: true,
            box_zoom: true,
            keyboard: true,
            tap: true,
            zoom_control: true,
            attribution_control: false,
        }
    }

    pub fn any_gesture(&self) -> bool {
        self.dragging
            || self.scroll_wheel_zoom
            || self.double_click_zoom
            || self.box_zoom
            || self.keyboard
            || self.tap
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileStyle {
    #[default]
    Satellite,
    Streets,
}

impl TileStyle {
    pub fn url_template(self) -> &'static str {
        match self {
            Self::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
            Self::Streets => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        }
    }

    pub fn attribution(self) -> &'static str {
        match self {
            Self::Satellite => "Tiles © Esri",
            Self::Streets => "© OpenStreetMap contributors",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Satellite => "Satellite",
            Self::Streets => "Streets",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Satellite => Self::Streets,
            Self::Streets => Self::Satellite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryStyle {
    pub stroke_color: Color,
    pub stroke_weight: f32,
    pub fill_color: Color,
    pub fill_opacity: f32,
}

impl Default for BoundaryStyle {
    fn default() -> Self {
        let red = Color::srgb_u8(0xff, 0x2b, 0x2b);
        Self {
            stroke_color: red,
            stroke_weight: 2.0,
            fill_color: red,
            fill_opacity: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLayer {
    pub dataset: Arc<BoundaryDataset>,
    pub style: BoundaryStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerIcon {
    pub size: UVec2,
    pub anchor: UVec2,
    pub color: Color,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub position: GeoPoint,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: f32,
}

/// What the choreography needs from a 2D map widget.
pub trait MapWidget {
    fn options(&self) -> &MapOptions;
    fn set_tile_layer(&mut self, style: TileStyle);
    /// Replaces any previous boundary layer.
    fn set_boundary_layer(&mut self, dataset: Arc<BoundaryDataset>, style: BoundaryStyle);
    /// Replaces any previous markers.
    fn set_markers(&mut self, markers: Vec<Marker>);
    fn fit_bounds(&mut self, bounds: GeoBounds);
    fn set_view(&mut self, center: GeoPoint, zoom: f32);
    /// Host container changed size; recompute layout.
    fn invalidate_size(&mut self);
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct InsetMap {
    options: MapOptions,
    size: Vec2,
    tile_layer: Option<TileStyle>,
    boundary: Option<BoundaryLayer>,
    markers: Vec<Marker>,
    view: Option<MapView>,
    visible: bool,
    size_invalidations: u32,
}

impl InsetMap {
    pub fn new(options: MapOptions, size: Vec2) -> Self {
        Self {
            options,
            size,
            tile_layer: None,
            boundary: None,
            markers: Vec::new(),
            view: None,
            visible: false,
            size_invalidations: 0,
        }
    }

    pub fn tile_layer(&self) -> Option<TileStyle> {
        self.tile_layer
    }

    pub fn boundary(&self) -> Option<&BoundaryLayer> {
        self.boundary.as_ref()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn view(&self) -> Option<MapView> {
        self.view
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn size_invalidations(&self) -> u32 {
        self.size_invalidations
    }
}

impl MapWidget for InsetMap {
    fn options(&self) -> &MapOptions {
        &self.options
    }

    fn set_tile_layer(&mut self, style: TileStyle) {
        self.tile_layer = Some(style);
    }

    fn set_boundary_layer(&mut self, dataset: Arc<BoundaryDataset>, style: BoundaryStyle) {
        self.boundary = Some(BoundaryLayer { dataset, style });
    }

    fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    fn fit_bounds(&mut self, bounds: GeoBounds) {
        self.view = Some(MapView {
            center: bounds.center(),
            zoom: zoom_to_fit(bounds, self.size),
        });
    }

    fn set_view(&mut self, center: GeoPoint, zoom: f32) {
        self.view = Some(MapView { center, zoom });
    }

    fn invalidate_size(&mut self) {
        self.size_invalidations += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Largest whole Web Mercator zoom at which `bounds` fits inside `size` pixels.
pub fn zoom_to_fit(bounds: GeoBounds, size: Vec2) -> f32 {
    let lon_fraction = ((bounds.east - bounds.west).abs() / 360.0).max(f64::EPSILON);
    let lat_fraction =
        ((mercator_y(bounds.north) - mercator_y(bounds.south)).abs() / (2.0 * PI)).max(f64::EPSILON);

    let scale_x = size.x as f64 / (TILE_SIZE * lon_fraction);
    let scale_y = size.y as f64 / (TILE_SIZE * lat_fraction);
    let zoom = scale_x.min(scale_y).max(1.0).log2().floor() as f32;
    zoom.clamp(0.0, MAX_ZOOM)
}

fn mercator_y(latitude: f64) -> f64 {
    let lat = latitude.clamp(-85.0511, 85.0511).to_radians();
    (PI / 4.0 + lat / 2.0).tan().ln()
}
