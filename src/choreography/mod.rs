//! Camera choreography module (timed transitions + orbit rig adapters).

use bevy::prelude::*;

pub mod choreographer;
pub mod systems;
pub mod transition;

pub use transition::{Completion, Easing, Transition, TransitionKind};

use crate::render_loop::FrameSet;

/// Position, look-at target and vertical field of view of the main camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_deg: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Overview,
    FocusedOnRegion,
}

impl ViewMode {
    /// Label for the focus toggle, describing what pressing it will do.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Overview => "Show me",
            Self::FocusedOnRegion => "Take me back",
        }
    }
}

/// Marks the camera driven by the choreography.
#[derive(Component)]
pub struct MainCamera;

pub struct ChoreographyPlugin;

impl Plugin for ChoreographyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, systems::schedule_intro_flight)
            .add_systems(
                Update,
                (
                    systems::sync_camera_from_rig.in_set(FrameSet::Ingest),
                    systems::apply_camera_to_rig.in_set(FrameSet::Apply),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_label_follows_mode() {
        assert_eq!(ViewMode::Overview.toggle_label(), "Show me");
        assert_eq!(ViewMode::FocusedOnRegion.toggle_label(), "Take me back");
    }
}
