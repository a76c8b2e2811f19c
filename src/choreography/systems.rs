//! Adapters between the choreography and the `PanOrbitCamera` rig.

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::choreography::{MainCamera, ViewMode};
use crate::context::GlobeViewContext;

/// Orbit sensitivities used when the matching gesture is enabled.
const ROTATE_SENSITIVITY: f32 = 0.5;
const PAN_SENSITIVITY: f32 = 1.0;
const ZOOM_SENSITIVITY: f32 = 1.2;

pub fn schedule_intro_flight(time: Res<Time>, mut ctx: ResMut<GlobeViewContext>) {
    ctx.schedule_intro(time.elapsed());
    println!("[INIT] Intro flight scheduled");
}

/// While the user owns the camera, mirror the rig into the context so the next
/// transition starts from what is on screen.
pub fn sync_camera_from_rig(
    mut ctx: ResMut<GlobeViewContext>,
    camera_q: Query<(&Transform, &PanOrbitCamera, &Projection), With<MainCamera>>,
) {
    if ctx.drives_camera() {
        return;
    }
    let Ok((transform, orbit, projection)) = camera_q.single() else {
        return;
    };
    ctx.camera.position = transform.translation;
    ctx.camera.target = orbit.focus;
    if let Projection::Perspective(perspective) = projection {
        ctx.camera.fov_deg = perspective.fov.to_degrees();
    }
}

pub fn apply_camera_to_rig(
    ctx: Res<GlobeViewContext>,
    mut camera_q: Query<(&mut Transform, &mut PanOrbitCamera, &mut Projection), With<MainCamera>>,
) {
    let Ok((mut transform, mut orbit, mut projection)) = camera_q.single_mut() else {
        return;
    };

    let controls = &ctx.controls;
    orbit.enabled = !ctx.drives_camera();
    orbit.orbit_sensitivity = if controls.rotate_enabled { ROTATE_SENSITIVITY } else { 0.0 };
    orbit.pan_sensitivity = if controls.pan_enabled { PAN_SENSITIVITY } else { 0.0 };
    orbit.zoom_sensitivity = if controls.zoom_enabled { ZOOM_SENSITIVITY } else { 0.0 };

    let Some(camera) = ctx.frame.camera_override else {
        if ctx.frame.orbit_yaw_delta != 0.0 {
            orbit.target_yaw += ctx.frame.orbit_yaw_delta;
        }
        // Focused views sit inside the minimum distance on purpose
        if ctx.view_mode == ViewMode::Overview {
            orbit.target_radius = controls.clamp_distance(orbit.target_radius);
        }
        return;
    };

    let Some((radius, yaw, pitch)) = orbit_angles(camera.position, camera.target) else {
        return;
    };
    orbit.focus = camera.target;
    orbit.target_focus = camera.target;
    orbit.target_radius = radius;
    orbit.target_yaw = yaw;
    orbit.target_pitch = pitch;
    orbit.radius = Some(radius);
    orbit.yaw = Some(yaw);
    orbit.pitch = Some(pitch);
    orbit.force_update = true;

    transform.translation = camera.position;
    transform.look_at(camera.target, Vec3::Y);

    if let Projection::Perspective(perspective) = &mut *projection {
        perspective.fov = camera.fov_deg.to_radians();
    }
}

/// Radius, yaw and pitch of `position` orbiting `target`, in the rig's convention.
pub fn orbit_angles(position: Vec3, target: Vec3) -> Option<(f32, f32, f32)> {
    let offset = position - target;
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return None;
    }
    let yaw = offset.x.atan2(offset.z);
    let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
    Some((radius, yaw, pitch))
}
