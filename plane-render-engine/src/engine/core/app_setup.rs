use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

use constants::render_settings::LIGHT_ILLUMINANCE;

use crate::engine::camera::viewport_camera::{camera_controller, spawn_viewport_camera};
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::plane::{PlaneConfig, spawn_plane};
use crate::tools::hover::{
    ActiveFades, PointerState, advance_fade_transitions, hover_highlight_system, track_pointer,
};
use crate::tools::panel::{
    PlaneConfigChanged, apply_config_changes, panel_button_system, spawn_parameter_panel,
    update_panel_labels,
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default());

    app.init_resource::<PlaneConfig>()
        .init_resource::<PointerState>()
        .init_resource::<ActiveFades>()
        .add_event::<PlaneConfigChanged>();

    app.add_systems(Startup, setup).add_systems(
        Update,
        (
            camera_controller,
            track_pointer,
            // Hover flashes first so the newest fade writes last.
            (hover_highlight_system, advance_fade_transitions).chain(),
            (panel_button_system, apply_config_changes, update_panel_labels).chain(),
        ),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        use crate::engine::systems::fps_tracking::fps_text_update_system;
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PlaneConfig>,
) {
    println!("=== JAGGED PLANE VIEWER ===");

    spawn_lighting(&mut commands);
    spawn_viewport_camera(&mut commands);
    spawn_plane(&mut commands, &mut meshes, &mut materials, &config);
    spawn_parameter_panel(&mut commands, &config);

    #[cfg(not(target_arch = "wasm32"))]
    {
        use crate::engine::systems::fps_tracking::spawn_fps_overlay;
        spawn_fps_overlay(&mut commands);
    }
}

/// The reference lights the plane from the front and adds a dim back light
/// so the underside stays readable when orbiting.
fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: LIGHT_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: LIGHT_ILLUMINANCE * 0.5,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, -1.0, -1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
