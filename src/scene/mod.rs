//! Globe scene: the tilted, spinning globe group and its decorations.
//!
//! Everything region-related (overlays, logo, marker, beam) is a child of
//! [`GlobeRoot`], so it is placed in globe-local coordinates and inherits the
//! tilt and spin.

use bevy::mesh::{CylinderAnchor, CylinderMeshBuilder, TorusMeshBuilder};
use bevy::prelude::*;

pub mod beam_material;
pub mod systems;

pub use beam_material::BeamMaterial;

use crate::context::GlobeViewContext;
use crate::core::coordinates::GLOBE_RADIUS;
use crate::render_loop::FrameSet;

const LOGO_RADIUS: f32 = 0.035;
const MARKER_RADIUS: f32 = 0.008;
const RELAY_RADIUS: f32 = 0.02;
const BEAM_RADIUS: f32 = 0.006;

/// Tilted, spinning group every globe-attached entity hangs off.
#[derive(Component)]
pub struct GlobeRoot;

/// Globe surface; breathes independently of the group.
#[derive(Component)]
pub struct EarthSurface;

#[derive(Component)]
pub struct CloudLayer;

#[derive(Component)]
pub struct RegionLogo;

#[derive(Component)]
pub struct RegionMarker;

#[derive(Component)]
pub struct RegionBeam;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<BeamMaterial>::default())
            .add_systems(Startup, spawn_globe_scene)
            .add_systems(Update, systems::apply_frame_to_scene.in_set(FrameSet::Apply));
    }
}

pub fn spawn_globe_scene(
    mut commands: Commands,
    ctx: Res<GlobeViewContext>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut beam_materials: ResMut<Assets<BeamMaterial>>,
) {
    let config = &ctx.config;
    let region = config.region_center;
    let up = region.project(GLOBE_RADIUS);
    let facing = Quat::from_rotation_arc(Vec3::Y, up);

    let earth_mesh = meshes.add(Sphere::new(GLOBE_RADIUS).mesh().uv(96, 48));
    let earth_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.05, 0.16, 0.32),
        perceptual_roughness: 0.7,
        metallic: 0.0,
        ..default()
    });
    let cloud_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.12),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let logo_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.85, 0.3),
        emissive: LinearRgba::new(1.2, 0.9, 0.3, 1.0),
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    });
    let marker_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.2, 0.2),
        emissive: LinearRgba::new(1.5, 0.2, 0.2, 1.0),
        unlit: true,
        ..default()
    });
    let relay_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.9, 0.95),
        metallic: 0.8,
        perceptual_roughness: 0.3,
        ..default()
    });

    let beam_length = config.beam_origin_radius - GLOBE_RADIUS;
    let beam_mesh = meshes.add(
        CylinderMeshBuilder::new(BEAM_RADIUS, beam_length, 24).anchor(CylinderAnchor::Bottom),
    );
    let beam_material = beam_materials.add(BeamMaterial::new(Color::srgb(0.3, 0.8, 1.0), 1.4));

    commands
        .spawn((
            Transform::from_rotation(ctx.globe.frame.rotation()),
            Visibility::default(),
            GlobeRoot,
            Name::new("Globe"),
        ))
        .with_children(|globe| {
            globe.spawn((
                Mesh3d(earth_mesh.clone()),
                MeshMaterial3d(earth_material),
                Transform::IDENTITY,
                EarthSurface,
                Name::new("Earth Surface"),
            ));
            globe.spawn((
                Mesh3d(earth_mesh),
                MeshMaterial3d(cloud_material),
                Transform::from_scale(Vec3::splat(1.02)),
                CloudLayer,
                Name::new("Clouds"),
            ));
            globe
                .spawn((
                    Transform::from_translation(region.project(config.logo_radius))
                        .with_rotation(facing),
                    Visibility::default(),
                    RegionLogo,
                    Name::new("Region Logo"),
                ))
                .with_children(|logo| {
                    logo.spawn((
                        Mesh3d(meshes.add(Circle::new(LOGO_RADIUS))),
                        MeshMaterial3d(logo_material.clone()),
                        // Circle faces +Z; lay it flat against the surface
                        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
                    ));
                    logo.spawn((
                        Mesh3d(meshes.add(
                            TorusMeshBuilder::new(LOGO_RADIUS * 1.2, LOGO_RADIUS * 1.35)
                                .major_resolution(48)
                                .minor_resolution(8),
                        )),
                        MeshMaterial3d(logo_material),
                        Transform::IDENTITY,
                    ));
                });
            globe.spawn((
                Mesh3d(meshes.add(Sphere::new(MARKER_RADIUS).mesh().uv(16, 8))),
                MeshMaterial3d(marker_material),
                Transform::from_translation(region.project(config.outline_radius)),
                RegionMarker,
                Name::new("Region Marker"),
            ));
            globe.spawn((
                Mesh3d(meshes.add(Sphere::new(RELAY_RADIUS).mesh().uv(16, 8))),
                MeshMaterial3d(relay_material),
                Transform::from_translation(region.project(config.beam_origin_radius)),
                Name::new("Relay Satellite"),
            ));
            globe.spawn((
                Mesh3d(beam_mesh),
                MeshMaterial3d(beam_material),
                Transform::from_translation(up).with_rotation(facing),
                RegionBeam,
                Name::new("Region Beam"),
            ));
        });

    println!("[INIT] Globe scene spawned");
}
