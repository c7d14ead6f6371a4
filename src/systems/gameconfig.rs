//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and applies the loop settings to the
//! running [`FrameClock`].

use crate::resources::frameclock::FrameClock;
use crate::resources::gameconfig::GameConfig;
use bevy_ecs::prelude::*;
use log::info;

/// System that applies game configuration changes.
///
/// Runs the update when [`GameConfig`] is added or modified. Timing phase and
/// counters of the clock are kept; only fps and tolerance change.
pub fn apply_gameconfig_changes(
    maybe_config: Option<Res<GameConfig>>,
    mut clock: ResMut<FrameClock>,
) {
    let Some(config) = maybe_config else {
        return;
    };

    if config.is_changed() || config.is_added() {
        if clock.fps != config.fps {
            info!("Frame rate: {} -> {} ticks/s", clock.fps, config.fps);
            clock.set_fps(config.fps);
        }
        if clock.tolerance != config.tolerance {
            clock.tolerance = config.tolerance;
        }
    }
}
