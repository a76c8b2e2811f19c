//! User-facing controls: on-screen buttons and their keyboard shortcuts.

use bevy::prelude::*;
use bevy_feathers::palette;
use std::time::Duration;

use crate::context::GlobeViewContext;
use crate::overlay::sync::dismiss_overlay;
use crate::render_loop::FrameSet;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ToggleFocus,
    ZoomIn,
    ZoomOut,
    ToggleAutoRotate,
    DismissOverlay,
    ToggleTileStyle,
}

impl ControlAction {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyF => Some(Self::ToggleFocus),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(Self::ZoomIn),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(Self::ZoomOut),
            KeyCode::KeyR => Some(Self::ToggleAutoRotate),
            KeyCode::Escape => Some(Self::DismissOverlay),
            KeyCode::KeyT => Some(Self::ToggleTileStyle),
            _ => None,
        }
    }

    /// Button text for the current state.
    pub fn label(self, ctx: &GlobeViewContext) -> String {
        match self {
            Self::ToggleFocus => ctx.view_mode.toggle_label().to_string(),
            Self::ZoomIn => "+".to_string(),
            Self::ZoomOut => "-".to_string(),
            Self::ToggleAutoRotate => {
                let state = if ctx.controls.auto_rotate { "on" } else { "off" };
                format!("Auto-rotate: {}", state)
            }
            Self::DismissOverlay => "Close maps".to_string(),
            Self::ToggleTileStyle => {
                let next = ctx
                    .insets
                    .as_ref()
                    .map(|insets| insets.point_tile_style().toggled())
                    .unwrap_or_default();
                format!("{} view", next.label())
            }
        }
    }
}

pub fn apply_control(ctx: &mut GlobeViewContext, action: ControlAction, now: Duration) {
    match action {
        ControlAction::ToggleFocus => ctx.toggle_focus(now),
        ControlAction::ZoomIn => ctx.zoom_in(now),
        ControlAction::ZoomOut => ctx.zoom_out(now),
        ControlAction::ToggleAutoRotate => ctx.toggle_auto_rotate(),
        ControlAction::DismissOverlay => dismiss_overlay(ctx),
        ControlAction::ToggleTileStyle => {
            if let Some(insets) = ctx.insets.as_mut() {
                let style = insets.toggle_point_tile_style();
                info!("Point map tiles: {}", style.label());
            }
        }
    }
}

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_control_bar).add_systems(
            Update,
            (
                (handle_keyboard, handle_control_buttons).in_set(FrameSet::Input),
                sync_control_labels.in_set(FrameSet::Apply),
            ),
        );
    }
}

pub fn spawn_control_bar(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                bottom: Val::Px(16.0),
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(8.0),
                ..default()
            },
            Name::new("Control Bar"),
        ))
        .with_children(|bar| {
            for action in [
                ControlAction::ToggleFocus,
                ControlAction::ZoomIn,
                ControlAction::ZoomOut,
                ControlAction::ToggleAutoRotate,
                ControlAction::DismissOverlay,
            ] {
                bar.spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.06, 0.12, 0.16, 0.9)),
                    action,
                ))
                .with_children(|button| {
                    button.spawn((Text::new(""), TextColor(palette::LIGHT_GRAY_1)));
                });
            }
        });
}

pub fn handle_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut ctx: ResMut<GlobeViewContext>,
) {
    let now = time.elapsed();
    for key in keys.get_just_pressed() {
        if let Some(action) = ControlAction::from_key(*key) {
            apply_control(&mut ctx, action, now);
        }
    }
}

pub fn handle_control_buttons(
    time: Res<Time>,
    mut ctx: ResMut<GlobeViewContext>,
    button_q: Query<(&Interaction, &ControlAction), Changed<Interaction>>,
) {
    for (interaction, action) in &button_q {
        if *interaction == Interaction::Pressed {
            apply_control(&mut ctx, *action, time.elapsed());
        }
    }
}

pub fn sync_control_labels(
    ctx: Res<GlobeViewContext>,
    button_q: Query<(&ControlAction, &Children)>,
    mut text_q: Query<&mut Text>,
) {
    for (action, children) in &button_q {
        let label = action.label(&ctx);
        for child in children.iter() {
            if let Ok(mut text) = text_q.get_mut(child)
                && text.0 != label
            {
                text.0 = label.clone();
            }
        }
    }
}
