//! Region boundary module (GeoJSON fetch, parse and shared cache).

use bevy::prelude::*;

pub mod cache;
pub mod fetcher;
pub mod parser;
pub mod systems;
pub mod types;

pub use cache::BoundaryDataCache;
pub use types::{BoundaryDataset, BoundaryGeometry, BoundaryRing, GeoBounds};

use crate::render_loop::FrameSet;

pub struct BoundaryPlugin;

impl Plugin for BoundaryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoundaryDataCache>()
            .add_systems(Startup, systems::setup_boundary_worker)
            .add_systems(
                Update,
                systems::apply_boundary_results.in_set(FrameSet::Ingest),
            );
    }
}
