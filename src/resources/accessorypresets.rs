//! Accessory timing pattern registry.
//!
//! A timing pattern is a named, immutable, round-robin list of steps that an
//! animated accessory walks through one step per tick:
//!
//! | JSON            | Step                                          |
//! |-----------------|-----------------------------------------------|
//! | `[220, 320]`    | wait a random number of ticks in the range    |
//! | `true`/`false`  | show or hide the overlay                      |
//! | `10`            | wait a fixed number of ticks                  |
//! | `{"x":3,"y":0}` | switch to this block of the overlay sheet     |
//!
//! The registry is built once at startup and shared by every character.
//! Extra patterns can be loaded from a JSON file mapping names to step
//! arrays; they override built-ins with the same name.

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Cell offset of an overlay frame, relative to the character's own cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockOffset {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl BlockOffset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A single step of a timing pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternStep {
    /// Wait a uniformly random number of ticks in `[min, max]`.
    RandomDelay(u32, u32),
    /// Show or hide the overlay.
    Visible(bool),
    /// Wait a fixed number of ticks.
    Delay(u32),
    /// Select the overlay block used for following frames.
    Block(BlockOffset),
}

fn block(x: i32, y: i32) -> PatternStep {
    PatternStep::Block(BlockOffset::new(x, y))
}

/// Process-wide table of named timing patterns.
#[derive(Resource, Debug, Clone, Default)]
pub struct AccessoryPresets {
    patterns: FxHashMap<String, Vec<PatternStep>>,
}

impl AccessoryPresets {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The patterns shipped with the game.
    pub fn builtin() -> Self {
        use PatternStep::*;

        let mut presets = Self::new();
        presets.insert(
            "eyesPlayer",
            vec![
                RandomDelay(220, 320),
                block(0, 0),
                Visible(true),
                Delay(10),
                block(3, 0),
                Delay(10),
                Visible(false),
            ],
        );
        presets.insert(
            "mouthPlayer",
            vec![
                RandomDelay(60, 120),
                block(3, 4),
                Visible(true),
                Delay(10),
                block(0, 4),
                Delay(10),
                block(3, 4),
                Delay(10),
                Visible(false),
            ],
        );
        presets.insert(
            "dogmeatSmallEyes",
            vec![
                RandomDelay(220, 320),
                block(0, 0),
                Visible(true),
                Delay(20),
                Visible(false),
            ],
        );
        presets.insert(
            "ianWink",
            vec![
                RandomDelay(220, 320),
                block(0, 0),
                Visible(true),
                Delay(10),
                Visible(false),
            ],
        );
        presets
    }

    pub fn insert(&mut self, name: impl Into<String>, steps: Vec<PatternStep>) {
        self.patterns.insert(name.into(), steps);
    }

    pub fn get(&self, name: &str) -> Option<&[PatternStep]> {
        self.patterns.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Merge patterns parsed from a JSON object of `name -> [step, ...]`.
    ///
    /// Returns the number of patterns read.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, String> {
        let parsed: FxHashMap<String, Vec<PatternStep>> =
            serde_json::from_str(json).map_err(|e| format!("Invalid presets JSON: {}", e))?;
        let count = parsed.len();
        self.patterns.extend(parsed);
        Ok(count)
    }

    /// Merge patterns from a JSON file.
    pub fn load_from_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<usize, String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read presets file {:?}: {}", path, e))?;
        let count = self.merge_json(&content)?;
        info!("Loaded {} accessory patterns from {:?}", count, path);
        Ok(count)
    }
}
