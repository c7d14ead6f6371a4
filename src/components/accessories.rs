//! Accessory descriptors attached to a character.
//!
//! An accessory is a decorative overlay drawn on top of a character sprite
//! (blinking eyes, a moving mouth, a wink). Each [`AccessoryDescriptor`] names
//! the overlay image and either a timing pattern from
//! [`AccessoryPresets`](crate::resources::accessorypresets::AccessoryPresets)
//! or a static frame id.
//!
//! The descriptor list is immutable once built. Replacing it always creates a
//! new [`Accessories`] value with a fresh generation, even when the contents
//! are equal; overlay rebuilding keys on that generation rather than on
//! contents.

use std::sync::atomic::{AtomicU64, Ordering};

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Overlay image used by the default player accessories.
pub const PLAYER_ACCESSORY_IMAGE: &str = "!MainChar_blink-breathe";

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// One entry of an `"accessories"` configuration's `layers` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryDescriptor {
    /// Character sheet the overlay frames are cut from.
    pub image: String,
    /// Name of a timing pattern. Absent or empty means a static overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Character index in the sheet for static overlays.
    #[serde(default)]
    pub id: u32,
}

impl AccessoryDescriptor {
    pub fn animated(image: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            pattern: Some(pattern.into()),
            id: 0,
        }
    }

    pub fn fixed(image: impl Into<String>, id: u32) -> Self {
        Self {
            image: image.into(),
            pattern: None,
            id,
        }
    }

    /// The timing pattern name, if this accessory is animated.
    pub fn pattern_name(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }
}

/// Accessory descriptor list owned by a character.
#[derive(Component, Debug)]
pub struct Accessories {
    descriptors: Vec<AccessoryDescriptor>,
    generation: u64,
}

/// A clone is a distinct list and gets its own generation.
impl Clone for Accessories {
    fn clone(&self) -> Self {
        Self::new(self.descriptors.clone())
    }
}

impl Default for Accessories {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Accessories {
    pub fn new(descriptors: Vec<AccessoryDescriptor>) -> Self {
        Self {
            descriptors,
            generation: next_generation(),
        }
    }

    /// Accessories every player character starts with.
    pub fn player_defaults() -> Self {
        Self::new(vec![
            AccessoryDescriptor::animated(PLAYER_ACCESSORY_IMAGE, "eyesPlayer"),
            AccessoryDescriptor::animated(PLAYER_ACCESSORY_IMAGE, "mouthPlayer"),
        ])
    }

    /// Replace the list wholesale. Always bumps the generation.
    pub fn replace(&mut self, descriptors: Vec<AccessoryDescriptor>) {
        self.descriptors = descriptors;
        self.generation = next_generation();
    }

    pub fn descriptors(&self) -> &[AccessoryDescriptor] {
        &self.descriptors
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
