//! Accessory overlay systems.
//!
//! - [`rebuild_accessory_overlays`] keeps one overlay child per accessory
//!   descriptor. It rebuilds every overlay of a character whenever the
//!   character's accessory list generation changes.
//! - [`update_accessory_frames`] advances each overlay's timing state and
//!   writes its frame and visibility. It must run after the host has written
//!   the character's [`CharacterFrame`] for the tick.
//!
//! # Frames
//!
//! Overlay sheets share the character sheet layout. A static accessory with
//! frame `id` uses the character block `id` (four blocks per row, each three
//! cells wide and four tall) offset by the character's current cell. An
//! animated accessory uses its last selected block offset plus the current
//! cell, re-applied every tick so it follows the character's steps and
//! facing even while its own timing is waiting.
//!
//! # Related
//!
//! - [`crate::resources::accessorypresets::AccessoryPresets`] – timing patterns
//! - [`crate::systems::comments`] – where descriptor lists come from

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::accessories::Accessories;
use crate::components::accessorysprite::{
    AccessoryOverlays, AccessorySlot, AccessorySprite, AccessoryState, FrameRect,
};
use crate::components::character::{CharacterFrame, CharacterKind};
use crate::resources::accessorypresets::{AccessoryPresets, BlockOffset, PatternStep};
use crate::resources::accessoryrng::AccessoryRng;

/// Character blocks per sheet row.
const BLOCKS_PER_ROW: u32 = 4;
/// Cells per character block, horizontally.
const BLOCK_COLUMNS: i64 = 3;
/// Cells per character block, vertically.
const BLOCK_ROWS: i64 = 4;

/// What a single timing step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A delay was running; it was decremented and nothing else happened.
    Waiting,
    /// The overlay should be shown or hidden.
    Visibility(bool),
    /// A new delay was set.
    DelaySet(u32),
    /// A new block offset was remembered.
    BlockSet(BlockOffset),
    /// The pattern has no steps.
    Idle,
}

/// Advance one accessory's timing state by one tick.
///
/// A running delay is decremented. Otherwise the step at `state.index` is
/// consumed and the index moves on, wrapping to the start.
pub fn step_accessory(
    pattern: &[PatternStep],
    state: &mut AccessoryState,
    rng: &mut AccessoryRng,
) -> StepOutcome {
    if state.timeout > 0 {
        state.timeout -= 1;
        return StepOutcome::Waiting;
    }

    let Some(step) = pattern.get(state.index) else {
        state.index = 0;
        return StepOutcome::Idle;
    };

    let outcome = match *step {
        PatternStep::RandomDelay(min, max) => {
            state.timeout = rng.between(min, max);
            StepOutcome::DelaySet(state.timeout)
        }
        PatternStep::Visible(visible) => StepOutcome::Visibility(visible),
        PatternStep::Delay(ticks) => {
            state.timeout = ticks;
            StepOutcome::DelaySet(ticks)
        }
        PatternStep::Block(block) => {
            state.block = Some(block);
            StepOutcome::BlockSet(block)
        }
    };

    state.index += 1;
    if state.index >= pattern.len() {
        state.index = 0;
    }
    outcome
}

/// Pixel origin of sheet cell `block + cell`, clamped to the `i32` range.
fn cell_origin(block: i64, cell: i32, size: i32) -> i32 {
    let origin = (block + i64::from(cell)).saturating_mul(i64::from(size));
    origin.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Frame of an animated overlay for a block offset and the current cell.
pub fn block_frame(block: BlockOffset, frame: &CharacterFrame) -> FrameRect {
    FrameRect::new(
        cell_origin(i64::from(block.x), frame.pattern_x, frame.pattern_width),
        cell_origin(i64::from(block.y), frame.pattern_y, frame.pattern_height),
        frame.pattern_width,
        frame.pattern_height,
    )
}

/// Frame of a static overlay showing character block `id`.
pub fn static_frame(id: u32, frame: &CharacterFrame) -> FrameRect {
    let column = i64::from(id % BLOCKS_PER_ROW) * BLOCK_COLUMNS;
    let row = i64::from(id / BLOCKS_PER_ROW) * BLOCK_ROWS;
    FrameRect::new(
        cell_origin(column, frame.pattern_x, frame.pattern_width),
        cell_origin(row, frame.pattern_y, frame.pattern_height),
        frame.pattern_width,
        frame.pattern_height,
    )
}

fn set_frame(sprite: &mut Mut<AccessorySprite>, rect: FrameRect) {
    if sprite.frame != rect {
        sprite.frame = rect;
    }
}

fn set_visible(sprite: &mut Mut<AccessorySprite>, visible: bool) {
    if sprite.visible != visible {
        sprite.visible = visible;
    }
}

fn spawn_overlays(
    commands: &mut Commands,
    owner: Entity,
    accessories: &Accessories,
) -> AccessoryOverlays {
    let mut overlays = AccessoryOverlays {
        generation: accessories.generation(),
        ..Default::default()
    };
    for (slot, descriptor) in accessories.descriptors().iter().enumerate() {
        let sprite = commands
            .spawn((
                AccessorySprite::new(descriptor.image.clone()),
                AccessorySlot(slot),
                ChildOf(owner),
            ))
            .id();
        overlays.sprites.push(sprite);
        overlays.states.push(AccessoryState::default());
    }
    overlays
}

/// Rebuild overlay children of characters whose accessory list changed.
///
/// Old overlays are despawned before the new batch is spawned. Fresh
/// overlays start hidden with fresh timing state.
pub fn rebuild_accessory_overlays(
    mut commands: Commands,
    mut characters: Query<(
        Entity,
        &CharacterKind,
        &Accessories,
        Option<&mut AccessoryOverlays>,
    )>,
) {
    for (entity, kind, accessories, maybe_overlays) in characters.iter_mut() {
        if !kind.supports_accessories() {
            continue;
        }
        let up_to_date = maybe_overlays
            .as_ref()
            .is_some_and(|overlays| overlays.generation == accessories.generation());
        if up_to_date {
            continue;
        }

        debug!(
            "Rebuilding {} accessory overlay(s) on {:?}",
            accessories.len(),
            entity
        );
        match maybe_overlays {
            Some(mut overlays) => {
                for sprite in overlays.sprites.drain(..) {
                    commands.entity(sprite).try_despawn();
                }
                *overlays = spawn_overlays(&mut commands, entity, accessories);
            }
            None => {
                let overlays = spawn_overlays(&mut commands, entity, accessories);
                commands.entity(entity).insert(overlays);
            }
        }
    }
}

/// Advance accessory timing and update overlay frames for this tick.
///
/// # Panics
///
/// Panics if an accessory names a pattern missing from [`AccessoryPresets`].
/// Pattern names come from level authoring and are expected to be valid.
pub fn update_accessory_frames(
    mut characters: Query<(&Accessories, &CharacterFrame, &mut AccessoryOverlays)>,
    mut sprites: Query<&mut AccessorySprite>,
    presets: Res<AccessoryPresets>,
    mut rng: ResMut<AccessoryRng>,
) {
    for (accessories, frame, mut overlays) in characters.iter_mut() {
        // Not rebuilt yet for the current list.
        if overlays.generation != accessories.generation() {
            continue;
        }

        let AccessoryOverlays {
            sprites: overlay_sprites,
            states,
            ..
        } = &mut *overlays;

        for (slot, (sprite_entity, state)) in
            overlay_sprites.iter().zip(states.iter_mut()).enumerate()
        {
            let Some(descriptor) = accessories.descriptors().get(slot) else {
                continue;
            };
            let Ok(mut sprite) = sprites.get_mut(*sprite_entity) else {
                continue;
            };

            let Some(name) = descriptor.pattern_name() else {
                set_frame(&mut sprite, static_frame(descriptor.id, frame));
                set_visible(&mut sprite, true);
                continue;
            };

            let pattern = presets
                .get(name)
                .unwrap_or_else(|| panic!("Unknown accessory pattern '{}'", name));

            if let Some(block) = state.block {
                set_frame(&mut sprite, block_frame(block, frame));
            }

            if let StepOutcome::Visibility(visible) = step_accessory(pattern, state, &mut rng) {
                set_visible(&mut sprite, visible);
            }
        }
    }
}

/// Log overlay frame and visibility changes.
pub fn log_accessory_changes(
    query: Query<(&AccessorySprite, &AccessorySlot, &ChildOf), Changed<AccessorySprite>>,
) {
    for (sprite, slot, child_of) in query.iter() {
        info!(
            "{:?} accessory #{} '{}': visible={} frame=({}, {}, {}x{})",
            child_of.parent(),
            slot.0,
            sprite.image,
            sprite.visible,
            sprite.frame.x,
            sprite.frame.y,
            sprite.frame.width,
            sprite.frame.height
        );
    }
}
