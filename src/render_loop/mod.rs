//! Per-frame tick: advance the choreography and the continuous animations.
//!
//! Every frame runs in the same order: ingest (boundary results, rig state,
//! viewport), input, advance (this module), apply (scene, rig, UI).

use bevy::prelude::*;
use std::f32::consts::TAU;
use std::time::Duration;

pub mod systems;

use crate::choreography::CameraState;
use crate::context::GlobeViewContext;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Ingest,
    Input,
    Advance,
    Apply,
}

/// Everything the scene adapters need to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub elapsed_secs: f32,
    /// Tilt and spin of the globe group.
    pub globe_rotation: Quat,
    /// Breathing scale of the globe surface only.
    pub globe_scale: f32,
    /// Cloud spin relative to the globe group.
    pub cloud_rotation: Quat,
    pub cloud_scale: f32,
    pub logo_scale: f32,
    pub marker_scale: f32,
    /// Time uniform for the beam shader.
    pub beam_time: f32,
    /// Set while the choreography owns the camera, including the tick a transition ends.
    pub camera_override: Option<CameraState>,
    /// Camera orbit auto-rotation to add this frame, radians.
    pub orbit_yaw_delta: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            elapsed_secs: 0.0,
            globe_rotation: Quat::IDENTITY,
            globe_scale: 1.0,
            cloud_rotation: Quat::IDENTITY,
            cloud_scale: 1.02,
            logo_scale: 1.0,
            marker_scale: 1.0,
            beam_time: 0.0,
            camera_override: None,
            orbit_yaw_delta: 0.0,
        }
    }
}

impl GlobeViewContext {
    /// Advance everything time-driven to `now`; `dt` is the frame delta in seconds.
    pub fn tick(&mut self, now: Duration, dt: f32) -> FrameParams {
        let driven = self.drives_camera();
        let camera = self.advance(now);

        if self.globe.spinning {
            let frame = &mut self.globe.frame;
            frame.spin_rad = (frame.spin_rad + self.config.globe_spin_rate * dt).rem_euclid(TAU);
            self.globe.cloud_spin_rad =
                (self.globe.cloud_spin_rad + self.config.cloud_spin_rate * dt).rem_euclid(TAU);
        }

        let orbit_yaw_delta = if self.controls.auto_rotate && !self.drives_camera() {
            self.controls.auto_rotate_speed * dt
        } else {
            0.0
        };

        let t = now.as_secs_f32();
        self.frame = FrameParams {
            elapsed_secs: t,
            globe_rotation: self.globe.frame.rotation(),
            globe_scale: 1.0 + (t * 0.5).sin() * 0.003,
            cloud_rotation: Quat::from_rotation_y(self.globe.cloud_spin_rad),
            cloud_scale: 1.02 + (t * 0.4).sin() * 0.005,
            logo_scale: 1.0 + (t * 2.0).sin() * 0.05,
            marker_scale: 1.0 + (t * 3.0).sin() * 0.3,
            beam_time: t,
            camera_override: driven.then_some(camera),
            orbit_yaw_delta,
        };
        self.frame
    }
}

pub struct RenderLoopPlugin;

impl Plugin for RenderLoopPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSet::Ingest,
                FrameSet::Input,
                FrameSet::Advance,
                FrameSet::Apply,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                systems::track_viewport.in_set(FrameSet::Ingest),
                systems::drive_frame.in_set(FrameSet::Advance),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn secs(value: f32) -> Duration {
        Duration::from_secs_f32(value)
    }

    #[test]
    fn test_globe_spins_with_delta_time() {
        let mut ctx = GlobeViewContext::default();
        ctx.tick(secs(1.0), 0.5);
        assert!((ctx.globe.frame.spin_rad - 0.027 * 0.5).abs() < EPSILON);
        assert!((ctx.globe.cloud_spin_rad - 0.018 * 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_suspended_globe_holds_still() {
        let mut ctx = GlobeViewContext::default();
        ctx.suspend_rotation();
        let params = ctx.tick(secs(3.0), 1.0);
        assert_eq!(ctx.globe.frame.spin_rad, 0.0);
        assert_eq!(params.orbit_yaw_delta, 0.0);
    }

    #[test]
    fn test_continuous_animations_follow_time() {
        let mut ctx = GlobeViewContext::default();
        let t = 1.7_f32;
        let params = ctx.tick(secs(t), 0.016);
        assert!((params.globe_scale - (1.0 + (t * 0.5).sin() * 0.003)).abs() < EPSILON);
        assert!((params.cloud_scale - (1.02 + (t * 0.4).sin() * 0.005)).abs() < EPSILON);
        assert!((params.logo_scale - (1.0 + (t * 2.0).sin() * 0.05)).abs() < EPSILON);
        assert!((params.marker_scale - (1.0 + (t * 3.0).sin() * 0.3)).abs() < EPSILON);
        assert!((params.beam_time - t).abs() < EPSILON);
    }

    #[test]
    fn test_beam_time_is_monotonic() {
        let mut ctx = GlobeViewContext::default();
        let mut previous = -1.0;
        for ms in [0_u64, 16, 33, 1000, 1016, 60_000] {
            let params = ctx.tick(Duration::from_millis(ms), 0.016);
            assert!(params.beam_time > previous);
            previous = params.beam_time;
        }
    }

    #[test]
    fn test_auto_rotate_only_when_user_owns_camera() {
        let mut ctx = GlobeViewContext::default();
        let params = ctx.tick(secs(1.0), 1.0);
        assert!((params.orbit_yaw_delta - 0.0367).abs() < EPSILON);
        assert!(params.camera_override.is_none());

        ctx.zoom_in(secs(1.0));
        let params = ctx.tick(secs(1.2), 0.2);
        assert_eq!(params.orbit_yaw_delta, 0.0);
        assert!(params.camera_override.is_some());
    }

    #[test]
    fn test_override_covers_final_tick() {
        let mut ctx = GlobeViewContext::default();
        ctx.zoom_in(secs(0.0));
        let params = ctx.tick(secs(1.0), 1.0);
        let camera = params.camera_override.unwrap();
        assert!((camera.position.length() - 3.6 * 0.8).abs() < 1e-4);
        assert!(ctx.tick(secs(1.1), 0.1).camera_override.is_none());
    }

    #[test]
    fn test_globe_rotation_includes_tilt() {
        let mut ctx = GlobeViewContext::default();
        let params = ctx.tick(secs(0.0), 0.0);
        assert_eq!(params.globe_rotation, ctx.globe.frame.rotation());
        assert!(params.globe_rotation.angle_between(Quat::IDENTITY) > 0.1);
    }
}
