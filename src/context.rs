//! View context shared by every component
//!
//! `GlobeViewContext` replaces the page-level globals of a typical globe widget:
//! camera, orbit controls, overlays, inset maps and the view mode all live here
//! and are passed by reference. Bevy systems only copy state in and out of it.

use bevy::prelude::*;
use std::time::Duration;

use crate::choreography::{CameraState, Transition, ViewMode};
use crate::core::{GeoPoint, GlobeFrame};
use crate::inset::InsetMaps;
use crate::overlay::{OverlayGroup, RegionLabel};
use crate::render_loop::FrameParams;

/// Compiled-in parameters for the whole view.
#[derive(Clone, Debug)]
pub struct GlobeConfig {
    /// Point the focus transition, logo and beam aim at.
    pub region_center: GeoPoint,
    /// Point the secondary inset map centers on.
    pub point_of_interest: GeoPoint,
    pub point_of_interest_zoom: u8,
    pub boundary_url: String,

    pub outline_radius: f32,
    pub fill_radius: f32,
    pub logo_radius: f32,
    pub label_radius: f32,
    pub beam_origin_radius: f32,
    /// Name drawn over the region while it is highlighted.
    pub region_label: String,

    pub overview_position: Vec3,
    pub overview_target: Vec3,
    pub overview_fov_deg: f32,

    pub intro_delay: Duration,
    pub intro_duration: Duration,
    pub intro_start_scale: f32,
    pub intro_end_scale: f32,
    pub intro_start_fov_deg: f32,
    pub intro_end_fov_deg: f32,

    pub focus_duration: Duration,
    /// Focus ends this factor beyond the region surface point.
    pub focus_offset_scale: f32,
    pub return_duration: Duration,

    pub zoom_duration: Duration,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    /// Camera orbit auto-rotation, rad/s.
    pub auto_rotate_speed: f32,
    /// Idle spin of the globe group, rad/s.
    pub globe_spin_rate: f32,
    /// Extra spin of the cloud layer relative to the globe, rad/s.
    pub cloud_spin_rate: f32,

    pub revealed_outline_opacity: f32,
    pub highlighted_fill_opacity: f32,

    /// Fractional padding applied to the region bounds when fitting the inset.
    pub inset_bounds_padding: f64,
    /// Viewports narrower than this start with orbit gestures disabled.
    pub compact_viewport_width: f32,
    /// Whether the host provides the inset map panels at all.
    pub insets_enabled: bool,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            region_center: GeoPoint::new(24.8293, 54.823),
            point_of_interest: GeoPoint::new(25.8, 55.98),
            point_of_interest_zoom: 9,
            boundary_url:
                "https://raw.githubusercontent.com/johan/world.geo.json/master/countries/ARE.geo.json"
                    .to_string(),
            outline_radius: 1.008,
            fill_radius: 1.009,
            logo_radius: 1.015,
            label_radius: 1.04,
            beam_origin_radius: 1.65,
            region_label: "United Arab Emirates".to_string(),
            overview_position: Vec3::new(0.0, 0.0, 3.6),
            overview_target: Vec3::ZERO,
            overview_fov_deg: 60.0,
            intro_delay: Duration::from_millis(1000),
            intro_duration: Duration::from_millis(4000),
            intro_start_scale: 10.0,
            intro_end_scale: 2.8,
            intro_start_fov_deg: 25.0,
            intro_end_fov_deg: 45.0,
            focus_duration: Duration::from_millis(2500),
            focus_offset_scale: 1.05,
            return_duration: Duration::from_millis(1400),
            zoom_duration: Duration::from_millis(650),
            zoom_in_factor: 0.8,
            zoom_out_factor: 1.25,
            min_distance: 0.3,
            max_distance: 12.0,
            auto_rotate_speed: 0.0367,
            globe_spin_rate: 0.027,
            cloud_spin_rate: 0.018,
            revealed_outline_opacity: 1.0,
            highlighted_fill_opacity: 0.95,
            inset_bounds_padding: 0.1,
            compact_viewport_width: 768.0,
            insets_enabled: true,
        }
    }
}

/// Orbit-control surface exposed by the rendering backend.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitControls {
    pub rotate_enabled: bool,
    pub pan_enabled: bool,
    pub zoom_enabled: bool,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitControls {
    pub fn from_config(config: &GlobeConfig) -> Self {
        Self {
            rotate_enabled: true,
            pan_enabled: true,
            zoom_enabled: true,
            auto_rotate: true,
            auto_rotate_speed: config.auto_rotate_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        }
    }

    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }
}

/// Idle motion state of the globe group.
#[derive(Clone, Debug, Default)]
pub struct GlobeMotion {
    pub frame: GlobeFrame,
    pub spinning: bool,
    pub cloud_spin_rad: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Resource)]
pub struct GlobeViewContext {
    pub config: GlobeConfig,
    pub camera: CameraState,
    pub controls: OrbitControls,
    pub view_mode: ViewMode,
    pub active_transition: Option<Transition>,
    /// Start time of the intro flight while it is waiting out its delay.
    pub scheduled_intro: Option<Duration>,
    pub globe: GlobeMotion,
    pub overlays: OverlayGroup,
    pub label: RegionLabel,
    /// `None` when the host has no inset panels.
    pub insets: Option<InsetMaps>,
    /// `None` until the first viewport size is known.
    pub viewport: Option<Viewport>,
    pub frame: FrameParams,
}

impl GlobeViewContext {
    pub fn new(config: GlobeConfig) -> Self {
        let camera = CameraState {
            position: config.overview_position,
            target: config.overview_target,
            fov_deg: config.overview_fov_deg,
        };
        let insets = config.insets_enabled.then(|| InsetMaps::new(&config));
        Self {
            controls: OrbitControls::from_config(&config),
            camera,
            view_mode: ViewMode::Overview,
            active_transition: None,
            scheduled_intro: None,
            globe: GlobeMotion {
                spinning: true,
                ..default()
            },
            overlays: OverlayGroup::default(),
            label: RegionLabel::default(),
            insets,
            viewport: None,
            frame: FrameParams::default(),
            config,
        }
    }

    /// True while the choreography, not the user, owns the camera.
    pub fn drives_camera(&self) -> bool {
        self.active_transition.is_some() || self.scheduled_intro.is_some()
    }

    /// Region center on the globe surface, in world space.
    pub fn region_world_point(&self) -> Vec3 {
        let local = self.config.region_center.project(1.0);
        self.globe.frame.to_world(local)
    }

    pub fn suspend_rotation(&mut self) {
        self.controls.auto_rotate = false;
        self.globe.spinning = false;
    }

    pub fn resume_rotation(&mut self) {
        self.controls.auto_rotate = true;
        self.globe.spinning = true;
    }

    /// Viewport size changed. Idempotent; never touches the active transition.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        let next = Viewport { width, height };
        if self.viewport == Some(next) {
            return;
        }
        if self.viewport.is_none() && width < self.config.compact_viewport_width {
            // Small screens keep the page scrollable instead of orbiting
            self.controls.rotate_enabled = false;
            self.controls.pan_enabled = false;
            self.controls.zoom_enabled = false;
        }
        self.viewport = Some(next);
        if let Some(insets) = self.insets.as_mut() {
            insets.on_resize();
        }
    }
}

impl Default for GlobeViewContext {
    fn default() -> Self {
        Self::new(GlobeConfig::default())
    }
}
