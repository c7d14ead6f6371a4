//! Accessory engine library.
//!
//! Decorative overlay sprites ("accessories") for map characters, configured
//! through JSON written in level-editor comments. This module exposes the
//! engine's ECS components, resources, systems, and events for use in
//! integration tests and by host runtimes.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
