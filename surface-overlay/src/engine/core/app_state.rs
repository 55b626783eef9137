use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for `overlay.config.json` to load or fail.
    #[default]
    LoadingConfig,
    Running,
}

#[derive(Component)]
pub struct StatusText;

pub fn log_running_state() {
    info!("Overlay config applied, transitioning to Running state");
}
