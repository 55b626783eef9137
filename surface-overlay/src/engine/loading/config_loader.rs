use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::overlay_config::OverlayConfig;
use crate::engine::core::app_state::AppState;
use crate::tracking::provider::TrackingProvider;
use crate::tracking::session::SurfaceDetectionRequest;
use crate::tracking::simulated::SimulatedTrackingProvider;

pub const OVERLAY_CONFIG_PATH: &str = "overlay.config.json";

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<OverlayConfig>>,
}

// Start the loading process
pub fn start_loading(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    config_loader.handle = Some(asset_server.load(OVERLAY_CONFIG_PATH));
}

/// Wait for the config to resolve, install it and request detection.
pub fn load_config_system(
    config_loader: Res<ConfigLoader>,
    configs: Res<Assets<OverlayConfig>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = &config_loader.handle else {
        return;
    };

    let config = if let Some(config) = configs.get(handle) {
        info!("Overlay config loaded from {}", OVERLAY_CONFIG_PATH);
        config.clone()
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!("Overlay config unavailable ({err}), using defaults");
        OverlayConfig::default()
    } else {
        return;
    };

    install_overlay_config(&mut commands, config);
    next_state.set(AppState::Running);
}

/// Replace detection filter, style and provider with the loaded config,
/// then request detection.
///
/// The start request is queued behind the inserts so it can never be
/// handled before the provider exists.
pub fn install_overlay_config(commands: &mut Commands, config: OverlayConfig) {
    let provider = SimulatedTrackingProvider::from_config(&config.simulation);
    commands.insert_resource(config.detection);
    commands.insert_resource(config.style);
    commands.insert_resource(TrackingProvider::new(provider));
    commands.send_event(SurfaceDetectionRequest::Start);
}
