//! Region name drawn over the globe while the region is highlighted.
//!
//! The anchor sits in globe-local space above the region center. Each frame it
//! is projected through the main camera and a UI text node is moved there.

use bevy::prelude::*;

use crate::choreography::MainCamera;
use crate::context::GlobeViewContext;

const LABEL_FONT_SIZE: f32 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionLabel {
    pub opacity: f32,
}

#[derive(Component)]
pub struct RegionLabelText;

impl GlobeViewContext {
    /// World-space anchor of the region label.
    pub fn region_label_anchor(&self) -> Vec3 {
        let local = self.config.region_center.project(self.config.label_radius);
        self.globe.frame.to_world(local)
    }
}

/// Whether `anchor` on the globe is on the hemisphere seen from `eye`.
pub fn faces_camera(anchor: Vec3, eye: Vec3) -> bool {
    anchor.dot(eye - anchor) > 0.0
}

pub fn spawn_region_label(mut commands: Commands, ctx: Res<GlobeViewContext>) {
    commands.spawn((
        Text::new(ctx.config.region_label.clone()),
        TextFont {
            font_size: LABEL_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE.with_alpha(0.0)),
        Node {
            position_type: PositionType::Absolute,
            ..default()
        },
        Visibility::Hidden,
        RegionLabelText,
        Name::new("Region Label"),
    ));
}

pub fn sync_region_label(
    ctx: Res<GlobeViewContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut label_q: Query<
        (
            &mut Node,
            &mut TextColor,
            &mut Visibility,
            Option<&ComputedNode>,
        ),
        With<RegionLabelText>,
    >,
) {
    let Ok((mut node, mut color, mut visibility, computed)) = label_q.single_mut() else {
        return;
    };

    let opacity = ctx.label.opacity;
    if (color.0.alpha() - opacity).abs() > f32::EPSILON {
        color.0.set_alpha(opacity);
    }

    let anchor = ctx.region_label_anchor();
    let screen = camera_q
        .single()
        .ok()
        .filter(|(_, transform)| faces_camera(anchor, transform.translation()))
        .and_then(|(camera, transform)| camera.world_to_viewport(transform, anchor).ok());

    let next = match screen {
        Some(position) if opacity > 0.0 => {
            let half = computed
                .map(|c| c.size() * c.inverse_scale_factor() * 0.5)
                .unwrap_or(Vec2::ZERO);
            node.left = Val::Px(position.x - half.x);
            node.top = Val::Px(position.y - half.y);
            Visibility::Inherited
        }
        _ => Visibility::Hidden,
    };
    if *visibility != next {
        *visibility = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_sits_above_region() {
        let mut ctx = GlobeViewContext::default();
        ctx.globe.frame.spin_rad = 1.1;
        let anchor = ctx.region_label_anchor();
        assert!((anchor.length() - 1.04).abs() < 1e-5);
        assert!(anchor.normalize().abs_diff_eq(ctx.region_world_point(), 1e-5));
    }

    #[test]
    fn test_far_side_does_not_face_camera() {
        let anchor = Vec3::new(0.0, 0.0, 1.04);
        assert!(faces_camera(anchor, Vec3::new(0.0, 0.0, 3.6)));
        assert!(!faces_camera(anchor, Vec3::new(0.0, 0.0, -3.6)));
    }

    #[test]
    fn test_label_color_follows_context_without_camera() {
        let mut app = App::new();
        let mut ctx = GlobeViewContext::default();
        ctx.label.opacity = 0.95;
        app.insert_resource(ctx)
            .add_systems(Update, sync_region_label);
        let label = app
            .world_mut()
            .spawn((
                Node::default(),
                TextColor(Color::WHITE.with_alpha(0.0)),
                Visibility::Inherited,
                RegionLabelText,
            ))
            .id();
        app.update();

        let world = app.world();
        assert_eq!(
            world.get::<TextColor>(label).map(|c| c.0.alpha()),
            Some(0.95)
        );
        // Nothing to project through yet
        assert_eq!(world.get::<Visibility>(label), Some(&Visibility::Hidden));
    }
}
