//! Region overlays drawn on the globe (boundary outlines + translucent fills).

use bevy::prelude::*;

pub mod builder;
pub mod label;
pub mod sync;
pub mod systems;

pub use builder::build_overlays;
pub use label::RegionLabel;

use crate::render_loop::FrameSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Closed polyline, vertices in ring order.
    Outline,
    /// Triangle list, three vertices per triangle.
    Fill,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMesh {
    pub kind: OverlayKind,
    pub vertices: Vec<Vec3>,
    pub opacity: f32,
}

impl OverlayMesh {
    /// New meshes start fully transparent.
    pub fn new(kind: OverlayKind, vertices: Vec<Vec3>) -> Self {
        Self {
            kind,
            vertices,
            opacity: 0.0,
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = &[Vec3]> {
        let chunk = match self.kind {
            OverlayKind::Fill => 3,
            // Outlines have no triangles; an oversized chunk yields none
            OverlayKind::Outline => usize::MAX,
        };
        self.vertices.chunks_exact(chunk)
    }
}

/// All outline and fill meshes of the region, in ring order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayGroup {
    pub outlines: Vec<OverlayMesh>,
    pub fills: Vec<OverlayMesh>,
}

impl OverlayGroup {
    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty() && self.fills.is_empty()
    }

    pub fn set_opacity(&mut self, outline: f32, fill: f32) {
        for mesh in &mut self.outlines {
            mesh.opacity = outline;
        }
        for mesh in &mut self.fills {
            mesh.opacity = fill;
        }
    }

    pub fn get(&self, kind: OverlayKind, index: usize) -> Option<&OverlayMesh> {
        match kind {
            OverlayKind::Outline => self.outlines.get(index),
            OverlayKind::Fill => self.fills.get(index),
        }
    }
}

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, label::spawn_region_label).add_systems(
            Update,
            (
                systems::build_region_overlays
                    .in_set(FrameSet::Ingest)
                    .after(crate::boundary::systems::apply_boundary_results),
                (systems::sync_overlay_materials, label::sync_region_label)
                    .in_set(FrameSet::Apply),
            ),
        );
    }
}
