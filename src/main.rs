use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_feathers::FeathersPlugins;
use bevy_feathers::dark_theme::create_dark_theme;
use bevy_feathers::theme::UiTheme;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod boundary;
mod choreography;
mod context;
mod controls;
mod core;
mod inset;
mod overlay;
mod render_loop;
mod scene;

use boundary::BoundaryPlugin;
use choreography::{ChoreographyPlugin, MainCamera};
use context::GlobeViewContext;
use controls::ControlsPlugin;
use inset::InsetPlugin;
use overlay::OverlayPlugin;
use render_loop::RenderLoopPlugin;
use scene::ScenePlugin;

// Setup lights and the orbit camera
pub fn setup(mut commands: Commands, ctx: Res<GlobeViewContext>) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: 400.0,
        ..default()
    });

    let camera = ctx.camera;
    let initial_distance = camera.position.distance(camera.target);

    let pan_orbit = PanOrbitCamera {
        focus: camera.target,
        radius: Some(initial_distance),
        yaw: Some(0.0),
        pitch: Some(0.0),
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_deg.to_radians(),
            near: 0.01,
            far: 1_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(camera.position).looking_at(camera.target, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 3.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Region Globe".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Feathers initializes `UiTheme` but does not populate it by default.
    app.insert_resource(UiTheme(create_dark_theme()));

    app.add_plugins(FeathersPlugins);
    app.add_plugins(PanOrbitCameraPlugin);

    app.insert_resource(GlobeViewContext::default());

    app.add_plugins(RenderLoopPlugin);
    app.add_plugins(BoundaryPlugin);
    app.add_plugins(ScenePlugin);
    app.add_plugins(OverlayPlugin);
    app.add_plugins(InsetPlugin);
    app.add_plugins(ChoreographyPlugin);
    app.add_plugins(ControlsPlugin);

    app.add_systems(Startup, setup);

    app.run();
}
