//! Inset panel systems: attach boundary data and mirror map state into the UI.

use bevy::prelude::*;
use bevy_feathers::palette;

use crate::boundary::BoundaryDataCache;
use crate::boundary::systems::acquire_boundary;
use crate::boundary::types::BoundaryChannels;
use crate::context::GlobeViewContext;
use crate::controls::ControlAction;
use crate::inset::maps::INSET_SIZE;
use crate::inset::widget::{InsetMap, MapWidget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsetKind {
    Region,
    Point,
}

impl InsetKind {
    fn title(self) -> &'static str {
        match self {
            Self::Region => "United Arab Emirates",
            Self::Point => "Ras Al Khaimah",
        }
    }
}

#[derive(Component)]
pub struct InsetPanel {
    pub kind: InsetKind,
}

#[derive(Component)]
pub struct InsetCaption {
    pub kind: InsetKind,
}

pub fn spawn_inset_panels(mut commands: Commands, ctx: Res<GlobeViewContext>) {
    if ctx.insets.is_none() {
        return;
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                bottom: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(12.0),
                ..default()
            },
            Name::new("Inset Panels"),
        ))
        .with_children(|root| {
            for kind in [InsetKind::Region, InsetKind::Point] {
                root.spawn((
                    Node {
                        width: Val::Px(INSET_SIZE.x),
                        height: Val::Px(INSET_SIZE.y),
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(6.0),
                        padding: UiRect::all(Val::Px(8.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.04, 0.08, 0.12, 0.9)),
                    Visibility::Hidden,
                    InsetPanel { kind },
                ))
                .with_children(|panel| {
                    panel.spawn((Text::new(kind.title()), TextColor(palette::LIGHT_GRAY_1)));
                    panel.spawn((
                        Text::new(""),
                        TextColor(palette::LIGHT_GRAY_2),
                        InsetCaption { kind },
                    ));
                    if kind == InsetKind::Point {
                        panel
                            .spawn((
                                Button,
                                Node {
                                    padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                                    ..default()
                                },
                                BackgroundColor(Color::srgba(0.06, 0.12, 0.16, 0.9)),
                                ControlAction::ToggleTileStyle,
                            ))
                            .with_children(|button| {
                                button.spawn((Text::new(""), TextColor(palette::ACCENT)));
                            });
                    }
                });
            }
        });
    println!("[INIT] Inset panels spawned");
}

/// Attach the boundary to the inset maps once it has loaded.
pub fn initialize_inset_maps(
    mut ctx: ResMut<GlobeViewContext>,
    mut cache: ResMut<BoundaryDataCache>,
    channels: Option<Res<BoundaryChannels>>,
) {
    if ctx.insets.as_ref().is_none_or(|insets| insets.is_initialized()) {
        return;
    }
    let Some(dataset) = acquire_boundary(
        &mut cache,
        channels.as_deref(),
        &ctx.config.boundary_url,
    ) else {
        return;
    };
    let ctx = &mut *ctx;
    if let Some(insets) = ctx.insets.as_mut() {
        insets.initialize(dataset, &ctx.config);
    }
}

pub fn sync_inset_panels(
    ctx: Res<GlobeViewContext>,
    mut panel_q: Query<(&InsetPanel, &mut Visibility)>,
    mut caption_q: Query<(&InsetCaption, &mut Text)>,
) {
    let Some(insets) = ctx.insets.as_ref() else {
        return;
    };
    let map_for = |kind: InsetKind| match kind {
        InsetKind::Region => &insets.region,
        InsetKind::Point => &insets.point,
    };

    for (panel, mut visibility) in &mut panel_q {
        let next = if map_for(panel.kind).is_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != next {
            *visibility = next;
        }
    }

    for (caption, mut text) in &mut caption_q {
        let next = caption_text(map_for(caption.kind));
        if text.0 != next {
            text.0 = next;
        }
    }
}

/// One-line summary of what a map is showing.
pub fn caption_text(map: &InsetMap) -> String {
    let Some(view) = map.view() else {
        return "Loading…".to_string();
    };
    let tiles = map.tile_layer().map(|style| style.label()).unwrap_or("No tiles");
    format!(
        "{:.2}°N {:.2}°E · zoom {} · {} · {} markers",
        view.center.latitude,
        view.center.longitude,
        view.zoom,
        tiles,
        map.markers().len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GlobeConfig;
    use crate::inset::InsetMaps;

    #[test]
    fn test_caption_before_and_after_view() {
        let maps = InsetMaps::new(&GlobeConfig::default());
        assert_eq!(caption_text(&maps.region), "Loading…");

        let caption = caption_text(&maps.point);
        assert!(caption.starts_with("25.80°N 55.98°E"));
        assert!(caption.contains("zoom 9"));
        assert!(caption.contains("Satellite"));
    }

    #[test]
    fn test_sync_panels_follow_visibility() {
        let mut app = App::new();
        let mut ctx = GlobeViewContext::default();
        if let Some(insets) = ctx.insets.as_mut() {
            insets.reveal(&GlobeConfig::default());
        }
        app.insert_resource(ctx)
            .add_systems(Update, sync_inset_panels);
        let panel = app
            .world_mut()
            .spawn((InsetPanel { kind: InsetKind::Point }, Visibility::Hidden))
            .id();
        app.update();
        assert_eq!(
            app.world().get::<Visibility>(panel),
            Some(&Visibility::Inherited)
        );

        if let Some(insets) = app.world_mut().resource_mut::<GlobeViewContext>().insets.as_mut() {
            insets.hide();
        }
        app.update();
        assert_eq!(
            app.world().get::<Visibility>(panel),
            Some(&Visibility::Hidden)
        );
    }
}
