//! Character base frame system.
//!
//! [`walk_cycle_system`] advances each [`WalkCycle`] by one tick and writes
//! the resulting base cell into the character's [`CharacterFrame`]. Accessory
//! frame updates must be ordered after it.

use bevy_ecs::prelude::*;

use crate::components::character::{CharacterFrame, WALK_PATTERN, WalkCycle};

pub fn walk_cycle_system(mut query: Query<(&mut WalkCycle, &mut CharacterFrame)>) {
    for (mut walk, mut frame) in query.iter_mut() {
        walk.elapsed_ticks += 1;
        if walk.elapsed_ticks >= walk.ticks_per_step {
            walk.elapsed_ticks = 0;
            walk.step = (walk.step + 1) % WALK_PATTERN.len();
        }

        let (x, y) = (walk.pattern_x(), walk.pattern_y());
        if frame.pattern_x != x || frame.pattern_y != y {
            frame.pattern_x = x;
            frame.pattern_y = y;
        }
    }
}
