//! ECS components for entities.
//!
//! This module groups the component types attached to map characters and
//! their overlay sprites.
//!
//! Submodules overview:
//! - [`accessories`] – accessory descriptor list owned by a character
//! - [`accessorysprite`] – overlay child sprites and per-slot timing state
//! - [`character`] – character kind, base animation cell, and walk cycle
//! - [`eventpage`] – the editor command list of a map event's current page

pub mod accessories;
pub mod accessorysprite;
pub mod character;
pub mod eventpage;
