//! Overlay sprites and per-accessory runtime state.
//!
//! Each accessory of a character is drawn by one child entity carrying an
//! [`AccessorySprite`]. The character itself holds an [`AccessoryOverlays`]
//! component listing those children and the timing state of every slot.
//! Slot `i` of `sprites`, `states` and the character's descriptor list always
//! refer to the same accessory.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::resources::accessorypresets::BlockOffset;

/// Source rectangle inside the overlay's sheet, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FrameRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pivot of the overlay relative to its own frame size (0..1 on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Anchor {
    pub const BOTTOM_CENTER: Anchor = Anchor { x: 0.5, y: 1.0 };
}

/// Overlay sprite drawn on top of its parent character.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AccessorySprite {
    pub image: String,
    pub anchor: Anchor,
    pub frame: FrameRect,
    pub visible: bool,
}

impl AccessorySprite {
    /// A fresh overlay: bottom-centre anchored and hidden until its first
    /// timing evaluation shows it.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            anchor: Anchor::BOTTOM_CENTER,
            frame: FrameRect::default(),
            visible: false,
        }
    }
}

/// Position of an overlay in its character's accessory list.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorySlot(pub usize);

/// Timing state of one animated accessory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessoryState {
    /// Next pattern step to consume.
    pub index: usize,
    /// Ticks left to wait before consuming the next step.
    pub timeout: u32,
    /// Last block offset selected by the pattern.
    pub block: Option<BlockOffset>,
}

/// Overlays built for a character's current accessory list.
#[derive(Component, Debug, Clone, Default)]
pub struct AccessoryOverlays {
    /// Generation of the accessory list these overlays were built from.
    pub generation: u64,
    pub sprites: SmallVec<[Entity; 4]>,
    pub states: SmallVec<[AccessoryState; 4]>,
}

impl AccessoryOverlays {
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
