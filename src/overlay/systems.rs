//! Overlay systems: spawn meshes once the boundary is in, then track opacity.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;

use crate::boundary::BoundaryDataCache;
use crate::boundary::systems::acquire_boundary;
use crate::boundary::types::BoundaryChannels;
use crate::context::GlobeViewContext;
use crate::overlay::{OverlayKind, OverlayMesh, build_overlays};
use crate::scene::GlobeRoot;

const OUTLINE_COLOR: Color = Color::srgb(1.0, 0.2, 0.2);
const FILL_COLOR: Color = Color::srgb(1.0, 0.133, 0.133);

/// Links a spawned mesh to its entry in `GlobeViewContext::overlays`.
#[derive(Component, Debug, Clone, Copy)]
pub struct OverlayVisual {
    pub kind: OverlayKind,
    pub index: usize,
}

pub fn build_region_overlays(
    mut commands: Commands,
    mut ctx: ResMut<GlobeViewContext>,
    mut cache: ResMut<BoundaryDataCache>,
    channels: Option<Res<BoundaryChannels>>,
    globe_q: Query<Entity, With<GlobeRoot>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut built: Local<bool>,
) {
    if *built {
        return;
    }
    let Ok(globe) = globe_q.single() else { return };
    let Some(dataset) = acquire_boundary(
        &mut cache,
        channels.as_deref(),
        &ctx.config.boundary_url,
    ) else {
        return;
    };
    *built = true;

    let group = build_overlays(&dataset, ctx.config.outline_radius, ctx.config.fill_radius);
    info!(
        "Region overlays built: {} outlines, {} fills",
        group.outlines.len(),
        group.fills.len()
    );

    let visuals = group
        .outlines
        .iter()
        .enumerate()
        .chain(group.fills.iter().enumerate())
        .map(|(index, overlay)| {
            let visual = OverlayVisual {
                kind: overlay.kind,
                index,
            };
            (visual, meshes.add(overlay_mesh(overlay)))
        })
        .collect::<Vec<_>>();

    commands.entity(globe).with_children(|parent| {
        for (visual, mesh) in visuals {
            let color = match visual.kind {
                OverlayKind::Outline => OUTLINE_COLOR,
                OverlayKind::Fill => FILL_COLOR,
            };
            let material = materials.add(StandardMaterial {
                base_color: color.with_alpha(0.0),
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                cull_mode: None,
                double_sided: true,
                depth_bias: 1.0,
                ..default()
            });
            parent.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::IDENTITY,
                visual,
                Name::new(format!("Region {:?} {}", visual.kind, visual.index)),
            ));
        }
    });

    ctx.overlays = group;
}

/// Push context opacities into the overlay materials.
pub fn sync_overlay_materials(
    ctx: Res<GlobeViewContext>,
    overlay_q: Query<(&OverlayVisual, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (visual, material) in &overlay_q {
        let Some(overlay) = ctx.overlays.get(visual.kind, visual.index) else {
            continue;
        };
        let Some(current) = materials.get(&material.0) else {
            continue;
        };
        if (current.base_color.alpha() - overlay.opacity).abs() <= f32::EPSILON {
            continue;
        }
        if let Some(mut current) = materials.get_mut(&material.0) {
            current.base_color.set_alpha(overlay.opacity);
        }
    }
}

fn overlay_mesh(overlay: &OverlayMesh) -> Mesh {
    let topology = match overlay.kind {
        OverlayKind::Outline => PrimitiveTopology::LineStrip,
        OverlayKind::Fill => PrimitiveTopology::TriangleList,
    };
    let mut positions = overlay.vertices.clone();
    // Rings are closed; a strip only draws n - 1 segments unless the first point repeats
    if overlay.kind == OverlayKind::Outline
        && let (Some(first), Some(last)) = (positions.first().copied(), positions.last().copied())
        && first != last
    {
        positions.push(first);
    }
    let normals: Vec<Vec3> = positions.iter().map(|v| v.normalize_or_zero()).collect();

    let mut mesh = Mesh::new(topology, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_mesh_topology() {
        let outline = OverlayMesh::new(OverlayKind::Outline, vec![Vec3::X, Vec3::Y, Vec3::Z]);
        assert_eq!(
            overlay_mesh(&outline).primitive_topology(),
            PrimitiveTopology::LineStrip
        );

        let fill = OverlayMesh::new(OverlayKind::Fill, vec![Vec3::X, Vec3::Y, Vec3::Z]);
        let mesh = overlay_mesh(&fill);
        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::TriangleList);
        assert_eq!(mesh.count_vertices(), 3);
    }

    #[test]
    fn test_open_outline_draws_closing_edge() {
        let square = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        let outline = OverlayMesh::new(OverlayKind::Outline, square.clone());
        let mesh = overlay_mesh(&outline);
        // Line strip of 5 positions: 4 segments, the last back to the start
        assert_eq!(mesh.count_vertices(), 5);
        assert_eq!(outline.vertices.len(), 4);

        let mut closed = square;
        closed.push(closed[0]);
        let already_closed = OverlayMesh::new(OverlayKind::Outline, closed);
        assert_eq!(overlay_mesh(&already_closed).count_vertices(), 5);
    }
}
