use bevy::asset::AssetMetaCheck;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::overlay_config::OverlayConfig;
use crate::engine::core::app_state::{AppState, StatusText, log_running_state};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{ConfigLoader, load_config_system, start_loading};
use crate::engine::scene::setup::{spawn_camera, spawn_floor_reference, spawn_lighting};
use crate::engine::systems::detection_toggle::toggle_detection_on_space;
use crate::engine::systems::status_overlay::status_text_update_system;
use crate::surfaces::SurfaceOverlayPlugin;
use crate::tracking::session::handle_detection_requests;

/// Extension registered for [`OverlayConfig`] assets.
pub const OVERLAY_CONFIG_EXTENSION: &str = "config.json";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers OverlayConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<OverlayConfig>::new(&[OVERLAY_CONFIG_EXTENSION]))
        .add_plugins(SurfaceOverlayPlugin)
        .init_resource::<ConfigLoader>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            load_config_system
                .run_if(in_state(AppState::LoadingConfig))
                .before(handle_detection_requests),
        )
        .add_systems(OnEnter(AppState::Running), log_running_state)
        .add_systems(
            Update,
            (toggle_detection_on_space, status_text_update_system)
                .run_if(in_state(AppState::Running)),
        );

    app
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_lighting(&mut commands);
    spawn_camera(&mut commands);
    spawn_floor_reference(&mut commands, &mut meshes, &mut materials);
    create_native_overlays(&mut commands);
}

fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("Detection: loading"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
        });
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

    let log_config = LogPlugin {
        filter: "wgpu=error,naga=warn,surface_overlay=info".to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
