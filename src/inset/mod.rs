//! Inset 2D maps shown next to the globe while the region is focused.

use bevy::prelude::*;

pub mod maps;
pub mod systems;
pub mod widget;

pub use maps::InsetMaps;
pub use widget::{InsetMap, MapWidget, TileStyle};

use crate::render_loop::FrameSet;

pub struct InsetPlugin;

impl Plugin for InsetPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, systems::spawn_inset_panels)
            .add_systems(
                Update,
                (
                    systems::initialize_inset_maps
                        .in_set(FrameSet::Ingest)
                        .after(crate::boundary::systems::apply_boundary_results),
                    systems::sync_inset_panels.in_set(FrameSet::Apply),
                ),
            );
    }
}
