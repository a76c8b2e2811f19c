use bevy::prelude::*;

use crate::context::GlobeViewContext;
use crate::scene::{BeamMaterial, CloudLayer, EarthSurface, GlobeRoot, RegionLogo, RegionMarker};

type SceneNodeFilter = Or<(
    With<GlobeRoot>,
    With<EarthSurface>,
    With<CloudLayer>,
    With<RegionLogo>,
    With<RegionMarker>,
)>;

/// Copy this frame's continuous animation values onto the scene.
pub fn apply_frame_to_scene(
    ctx: Res<GlobeViewContext>,
    mut node_q: Query<
        (
            &mut Transform,
            Has<GlobeRoot>,
            Has<EarthSurface>,
            Has<CloudLayer>,
            Has<RegionLogo>,
            Has<RegionMarker>,
        ),
        SceneNodeFilter,
    >,
    beam_materials: Option<ResMut<Assets<BeamMaterial>>>,
) {
    let frame = &ctx.frame;
    for (mut transform, globe, earth, clouds, logo, marker) in &mut node_q {
        if globe {
            transform.rotation = frame.globe_rotation;
        } else if earth {
            transform.scale = Vec3::splat(frame.globe_scale);
        } else if clouds {
            transform.rotation = frame.cloud_rotation;
            transform.scale = Vec3::splat(frame.cloud_scale);
        } else if logo {
            transform.scale = Vec3::splat(frame.logo_scale);
        } else if marker {
            transform.scale = Vec3::splat(frame.marker_scale);
        }
    }

    let Some(mut beam_materials) = beam_materials else {
        return;
    };
    for (_, material) in beam_materials.iter_mut() {
        material.set_time(frame.beam_time);
    }
}
