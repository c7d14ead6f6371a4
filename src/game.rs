//! World setup and tick driving.
//!
//! Builds the ECS world with every resource and observer the accessory
//! systems need, spawns characters the way the host does, and runs one
//! frame through the frame clock and the update schedule.
//!
//! # Schedule order
//!
//! 1. `apply_gameconfig_changes` – push config edits into the frame clock
//! 2. `page_setup_system` – trigger page setup for new or changed pages
//! 3. `walk_cycle_system` – host base frame for this tick
//! 4. `rebuild_accessory_overlays` – after page setup has replaced lists
//! 5. `update_accessory_frames` – after the base frame and the rebuild
//! 6. `log_accessory_changes`

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::accessories::Accessories;
use crate::components::character::{CharacterFrame, CharacterKind};
use crate::components::eventpage::EventPage;
use crate::resources::accessorypresets::AccessoryPresets;
use crate::resources::accessoryrng::AccessoryRng;
use crate::resources::frameclock::FrameClock;
use crate::resources::gameconfig::GameConfig;
use crate::systems::accessories::{
    log_accessory_changes, rebuild_accessory_overlays, update_accessory_frames,
};
use crate::systems::character::walk_cycle_system;
use crate::systems::comments::{page_setup_system, proceed_comments};
use crate::systems::gameconfig::apply_gameconfig_changes;
use crate::systems::time::advance_frame_clock;

/// Build the timing pattern table: built-ins plus the configured file.
pub fn load_presets(config: &GameConfig) -> AccessoryPresets {
    let mut presets = AccessoryPresets::builtin();
    if let Some(path) = &config.presets_path {
        if let Err(e) = presets.load_from_file(path) {
            warn!("{}; using built-in accessory patterns only", e);
        }
    }
    presets
}

/// Create a world with the accessory resources and observers registered.
pub fn setup_world(config: GameConfig) -> World {
    let mut world = World::new();

    world.insert_resource(FrameClock::new(config.fps, config.tolerance, 0.0));
    world.insert_resource(load_presets(&config));
    world.insert_resource(match config.seed {
        Some(seed) => AccessoryRng::with_seed(seed),
        None => AccessoryRng::default(),
    });
    world.insert_resource(config);

    world.spawn(Observer::new(proceed_comments));
    // Ensure the observer is registered before any page setup is triggered.
    world.flush();

    info!(
        "World ready with {} accessory pattern(s)",
        world.resource::<AccessoryPresets>().len()
    );
    world
}

/// The per-tick update schedule.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(apply_gameconfig_changes);
    update.add_systems(page_setup_system);
    update.add_systems(walk_cycle_system);
    update.add_systems(rebuild_accessory_overlays.after(page_setup_system));
    update.add_systems(
        update_accessory_frames
            .after(rebuild_accessory_overlays)
            .after(walk_cycle_system),
    );
    update.add_systems(log_accessory_changes.after(update_accessory_frames));
    update
}

/// Spawn a map event showing `page`. Its comments are read on the next tick.
pub fn spawn_map_event(world: &mut World, page: EventPage, frame: CharacterFrame) -> Entity {
    world
        .spawn((CharacterKind::Event, page, Accessories::default(), frame))
        .id()
}

/// Switch a map event to another page.
pub fn set_event_page(world: &mut World, entity: Entity, page: EventPage) {
    if let Some(mut current) = world.get_mut::<EventPage>(entity) {
        *current = page;
    } else {
        world.entity_mut(entity).insert(page);
    }
}

/// Spawn a player character with the default player accessories.
pub fn spawn_player(world: &mut World, frame: CharacterFrame) -> Entity {
    world
        .spawn((CharacterKind::Player, Accessories::player_defaults(), frame))
        .id()
}

/// Spawn a character that never carries accessories (follower, vehicle).
pub fn spawn_other_character(world: &mut World, frame: CharacterFrame) -> Entity {
    world.spawn((CharacterKind::Other, frame)).id()
}

/// Run one host frame arriving at `now_ms`. Returns whether a tick ran.
pub fn run_frame(world: &mut World, update: &mut Schedule, now_ms: f64) -> bool {
    if !advance_frame_clock(world, now_ms) {
        return false;
    }
    update.run(world);
    world.clear_trackers(); // Clear changed components for next frame
    true
}
