//! Character classification and base animation frame.
//!
//! Accessory overlays are cut from the same sheet layout as the character
//! they decorate, so every overlay frame is computed relative to the
//! character's own current cell ([`CharacterFrame`]). The host writes that
//! cell every tick before accessory frames are updated.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// What kind of character a sprite belongs to.
///
/// Only players and map events carry accessories. Followers, vehicles and
/// anything else are [`CharacterKind::Other`] and never get overlays.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Player,
    Event,
    Other,
}

impl CharacterKind {
    pub fn supports_accessories(&self) -> bool {
        matches!(self, CharacterKind::Player | CharacterKind::Event)
    }
}

/// The character's current base cell and the size of one cell in pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFrame {
    /// Column of the current cell (step pattern plus character block column).
    pub pattern_x: i32,
    /// Row of the current cell (facing direction plus character block row).
    pub pattern_y: i32,
    pub pattern_width: i32,
    pub pattern_height: i32,
}

impl Default for CharacterFrame {
    fn default() -> Self {
        Self {
            pattern_x: 0,
            pattern_y: 0,
            pattern_width: 48,
            pattern_height: 48,
        }
    }
}

impl CharacterFrame {
    pub fn new(pattern_width: i32, pattern_height: i32) -> Self {
        Self {
            pattern_width,
            pattern_height,
            ..Self::default()
        }
    }
}

/// Facing direction, using the numpad convention of the map editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Down = 2,
    Left = 4,
    Right = 6,
    Up = 8,
}

impl Direction {
    /// Sheet row of this direction inside a character block.
    pub fn row(&self) -> i32 {
        (*self as i32 - 2) / 2
    }
}

/// Stepping animation that drives a character's base frame.
///
/// Stands in for the host's own walk animation in headless runs. Steps
/// through the pattern sequence `1, 2, 1, 0` every `ticks_per_step` ticks.
/// `character_index` selects one of the eight 3x4 character blocks of a
/// sheet, four blocks per row.
#[derive(Component, Debug, Clone)]
pub struct WalkCycle {
    pub character_index: i32,
    pub direction: Direction,
    pub ticks_per_step: u32,
    pub elapsed_ticks: u32,
    pub step: usize,
}

/// Step pattern columns, starting from the neutral pose.
pub const WALK_PATTERN: [i32; 4] = [1, 2, 1, 0];

impl WalkCycle {
    pub fn new(character_index: i32, direction: Direction, ticks_per_step: u32) -> Self {
        Self {
            character_index,
            direction,
            ticks_per_step: ticks_per_step.max(1),
            elapsed_ticks: 0,
            step: 0,
        }
    }

    pub fn pattern(&self) -> i32 {
        WALK_PATTERN[self.step % WALK_PATTERN.len()]
    }

    /// Base cell column: block column plus current step pattern.
    pub fn pattern_x(&self) -> i32 {
        (self.character_index % 4) * 3 + self.pattern()
    }

    /// Base cell row: block row plus facing direction.
    pub fn pattern_y(&self) -> i32 {
        (self.character_index / 4) * 4 + self.direction.row()
    }
}
